use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::event::{EventIn, EventRow};
use crate::models::skill::{SkillIn, SkillPatch, SkillRow};
use crate::state::AppState;
use crate::tracker::activity::{event_activity, DayActivity, DEFAULT_ACTIVITY_DAYS};
use crate::tracker::events::{create_event, delete_event, list_events};
use crate::tracker::skills::{
    create_skill, delete_skill, get_skill, list_skills, skill_stats, update_skill, SkillStats,
};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct EventRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub days: Option<u32>,
    /// Anchor day for the window; defaults to the server's local date.
    pub today: Option<NaiveDate>,
}

/// POST /skills/
pub async fn handle_create_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillIn>,
) -> Result<Json<SkillRow>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    Ok(Json(create_skill(&state.db, &req).await?))
}

/// GET /skills/
pub async fn handle_list_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillRow>>, AppError> {
    Ok(Json(list_skills(&state.db).await?))
}

/// GET /skills/stats
pub async fn handle_skill_stats(
    State(state): State<AppState>,
) -> Result<Json<SkillStats>, AppError> {
    Ok(Json(skill_stats(&state.db).await?))
}

/// GET /skills/:id
pub async fn handle_get_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SkillRow>, AppError> {
    Ok(Json(get_skill(&state.db, id).await?))
}

/// PATCH /skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<SkillPatch>,
) -> Result<Json<SkillRow>, AppError> {
    Ok(Json(update_skill(&state.db, id, &patch).await?))
}

/// DELETE /skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    delete_skill(&state.db, id).await?;
    Ok(Json(DeleteResponse { deleted: true, id }))
}

/// POST /events/
pub async fn handle_create_event(
    State(state): State<AppState>,
    Json(req): Json<EventIn>,
) -> Result<Json<EventRow>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(Json(create_event(&state.db, &req).await?))
}

/// GET /events/?start=&end=
pub async fn handle_list_events(
    State(state): State<AppState>,
    Query(params): Query<EventRangeQuery>,
) -> Result<Json<Vec<EventRow>>, AppError> {
    Ok(Json(list_events(&state.db, params.start, params.end).await?))
}

/// GET /events/activity?days=
pub async fn handle_event_activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> Result<Json<Vec<DayActivity>>, AppError> {
    let days = params.days.unwrap_or(DEFAULT_ACTIVITY_DAYS);
    let today = params.today.unwrap_or_else(|| Local::now().date_naive());
    Ok(Json(event_activity(&state.db, days, today).await?))
}

/// DELETE /events/:id
pub async fn handle_delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    delete_event(&state.db, id).await?;
    Ok(Json(DeleteResponse { deleted: true, id }))
}
