use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::errors::AppError;

pub const DEFAULT_ACTIVITY_DAYS: u32 = 7;
pub const MAX_ACTIVITY_DAYS: u32 = 366;

/// Event totals for one calendar day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: i64,
    pub minutes: i64,
}

/// One bucket per day for the `days` days ending at `today`, oldest first.
/// Days without events are present with zero counts.
pub async fn event_activity(
    pool: &SqlitePool,
    days: u32,
    today: NaiveDate,
) -> Result<Vec<DayActivity>, AppError> {
    if days == 0 || days > MAX_ACTIVITY_DAYS {
        return Err(AppError::Validation(format!(
            "days must be between 1 and {MAX_ACTIVITY_DAYS}"
        )));
    }
    let first = today - Duration::days(i64::from(days) - 1);

    // Dates are read as text so one malformed legacy row cannot fail the window.
    let rows: Vec<(String, i64, i64)> = sqlx::query_as(
        r#"
        SELECT date, COUNT(*), COALESCE(SUM(duration_minutes), 0)
        FROM events
        WHERE date BETWEEN ? AND ?
        GROUP BY date
        "#,
    )
    .bind(first)
    .bind(today)
    .fetch_all(pool)
    .await?;

    let rows = rows
        .into_iter()
        .filter_map(|(date, count, minutes)| {
            match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                Ok(date) => Some((date, count, minutes)),
                Err(e) => {
                    warn!("Skipping {count} event(s) with undecodable date '{date}': {e}");
                    None
                }
            }
        })
        .collect();

    Ok(fill_days(first, days, rows))
}

fn fill_days(first: NaiveDate, days: u32, rows: Vec<(NaiveDate, i64, i64)>) -> Vec<DayActivity> {
    let totals: HashMap<NaiveDate, (i64, i64)> = rows
        .into_iter()
        .map(|(date, count, minutes)| (date, (count, minutes)))
        .collect();

    first
        .iter_days()
        .take(days as usize)
        .map(|date| {
            let (count, minutes) = totals.get(&date).copied().unwrap_or((0, 0));
            DayActivity {
                date,
                count,
                minutes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::event::EventIn;
    use crate::tracker::events::create_event;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fill_days_zero_fills_gaps() {
        let filled = fill_days(date("2024-02-27"), 4, vec![(date("2024-02-29"), 2, 45)]);
        let dates: Vec<String> = filled.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
        );
        assert_eq!(filled[2].count, 2);
        assert_eq!(filled[2].minutes, 45);
        assert_eq!(filled[0].count, 0);
    }

    #[tokio::test]
    async fn test_event_activity_window() {
        let pool = test_pool().await;
        for (day, minutes) in [("2024-05-07", 30), ("2024-05-07", 15), ("2024-05-01", 60), ("2024-04-30", 90)] {
            create_event(
                &pool,
                &EventIn {
                    skill_id: Some(1),
                    title: "study".to_string(),
                    date: date(day),
                    duration_minutes: minutes,
                    notes: None,
                },
            )
            .await
            .unwrap();
        }

        let activity = event_activity(&pool, 7, date("2024-05-07")).await.unwrap();
        assert_eq!(activity.len(), 7);
        assert_eq!(activity[0].date, date("2024-05-01"));
        assert_eq!(activity[0].minutes, 60);
        assert_eq!(activity[6].count, 2);
        assert_eq!(activity[6].minutes, 45);
        let total: i64 = activity.iter().map(|d| d.count).sum();
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_event_activity_skips_malformed_dates() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO events (title, date, duration_minutes) VALUES ('legacy', '2024-05-06x', 20)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO events (title, date, duration_minutes) VALUES ('ok', '2024-05-06', 10)")
            .execute(&pool)
            .await
            .unwrap();

        let activity = event_activity(&pool, 7, date("2024-05-07")).await.unwrap();
        assert_eq!(activity.len(), 7);
        let total: i64 = activity.iter().map(|d| d.count).sum();
        assert_eq!(total, 1);
        assert_eq!(activity[5].minutes, 10);
    }

    #[tokio::test]
    async fn test_event_activity_rejects_zero_days() {
        let pool = test_pool().await;
        let result = event_activity(&pool, 0, date("2024-05-07")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
