use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::event::{EventIn, EventRow};

const EVENT_COLUMNS: &str = "id, skill_id, title, date, \
    COALESCE(duration_minutes, 0) AS duration_minutes, \
    notes, created_at";

/// Inserts an event. `skill_id` is stored as given; it is not checked against `skills`.
pub async fn create_event(pool: &SqlitePool, event: &EventIn) -> Result<EventRow, AppError> {
    let row = sqlx::query_as::<_, EventRow>(&format!(
        r#"
        INSERT INTO events (skill_id, title, date, duration_minutes, notes)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(event.skill_id)
    .bind(&event.title)
    .bind(event.date)
    .bind(event.duration_minutes)
    .bind(&event.notes)
    .fetch_one(pool)
    .await?;

    info!("Created event {} on {}", row.id, row.date);
    Ok(row)
}

/// Lists events by date, newest first. The range filter applies only when
/// both bounds are given and is inclusive on both ends.
pub async fn list_events(
    pool: &SqlitePool,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<EventRow>, AppError> {
    let rows = match (start, end) {
        (Some(start), Some(end)) => {
            if start > end {
                return Err(AppError::Validation(format!(
                    "start ({start}) must not be after end ({end})"
                )));
            }
            sqlx::query(&format!(
                "SELECT {EVENT_COLUMNS} FROM events \
                 WHERE date BETWEEN ? AND ? ORDER BY date DESC, id DESC"
            ))
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?
        }
        _ => {
            sqlx::query(&format!(
                "SELECT {EVENT_COLUMNS} FROM events ORDER BY date DESC, id DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(decode_events(rows))
}

/// Decodes listed rows, skipping any whose stored `date` is not `YYYY-MM-DD`.
/// Older databases kept the date as free text.
fn decode_events(rows: Vec<SqliteRow>) -> Vec<EventRow> {
    rows.iter()
        .filter_map(|row| match EventRow::from_row(row) {
            Ok(event) => Some(event),
            Err(e) => {
                let id = row.try_get::<i64, _>("id").unwrap_or_default();
                warn!("Skipping event {id} with undecodable row: {e}");
                None
            }
        })
        .collect()
}

pub async fn delete_event(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    if found.is_none() {
        return Err(AppError::NotFound(format!("Event {id} not found")));
    }

    sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    info!("Deleted event {id}");
    Ok(())
}
