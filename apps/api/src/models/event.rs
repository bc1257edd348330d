use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct EventRow {
    pub id: i64,
    /// Loose reference to `skills.id`; never checked, may dangle.
    pub skill_id: Option<i64>,
    pub title: String,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventIn {
    #[serde(default)]
    pub skill_id: Option<i64>,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration_minutes: i64,
    #[serde(default)]
    pub notes: Option<String>,
}
