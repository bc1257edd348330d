use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::skill::{SkillIn, SkillPatch, SkillRow};

/// Column list shared by every skill read. Rows written before a column
/// existed may hold NULL, so the non-optional fields fall back to their defaults.
const SKILL_COLUMNS: &str = "id, name, resource_type, platform, \
    COALESCE(progress, 'started') AS progress, \
    COALESCE(hours_spent, 0.0) AS hours_spent, \
    COALESCE(difficulty, 3) AS difficulty, \
    notes, created_at";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkillStats {
    pub total_skills: i64,
    pub total_hours: f64,
    pub by_progress: BTreeMap<String, i64>,
}

pub async fn create_skill(pool: &SqlitePool, skill: &SkillIn) -> Result<SkillRow, AppError> {
    let row = sqlx::query_as::<_, SkillRow>(&format!(
        r#"
        INSERT INTO skills (name, resource_type, platform, progress, hours_spent, difficulty, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {SKILL_COLUMNS}
        "#
    ))
    .bind(&skill.name)
    .bind(&skill.resource_type)
    .bind(&skill.platform)
    .bind(&skill.progress)
    .bind(skill.hours_spent)
    .bind(skill.difficulty)
    .bind(&skill.notes)
    .fetch_one(pool)
    .await?;

    info!("Created skill {} ({})", row.id, row.name);
    Ok(row)
}

/// All skills, newest first.
pub async fn list_skills(pool: &SqlitePool) -> Result<Vec<SkillRow>, AppError> {
    let rows = sqlx::query_as::<_, SkillRow>(&format!(
        "SELECT {SKILL_COLUMNS} FROM skills ORDER BY id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_skill(pool: &SqlitePool, id: i64) -> Result<SkillRow, AppError> {
    sqlx::query_as::<_, SkillRow>(&format!("SELECT {SKILL_COLUMNS} FROM skills WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| skill_not_found(id))
}

/// Applies only the fields set in `patch`. An empty patch is a read.
pub async fn update_skill(
    pool: &SqlitePool,
    id: i64,
    patch: &SkillPatch,
) -> Result<SkillRow, AppError> {
    ensure_exists(pool, id).await?;

    if !patch.is_empty() {
        sqlx::query(
            r#"
            UPDATE skills SET
                name = COALESCE(?, name),
                resource_type = COALESCE(?, resource_type),
                platform = COALESCE(?, platform),
                progress = COALESCE(?, progress),
                hours_spent = COALESCE(?, hours_spent),
                difficulty = COALESCE(?, difficulty),
                notes = COALESCE(?, notes)
            WHERE id = ?
            "#,
        )
        .bind(&patch.name)
        .bind(&patch.resource_type)
        .bind(&patch.platform)
        .bind(&patch.progress)
        .bind(patch.hours_spent)
        .bind(patch.difficulty)
        .bind(&patch.notes)
        .bind(id)
        .execute(pool)
        .await?;
        info!("Updated skill {id}");
    }

    get_skill(pool, id).await
}

pub async fn delete_skill(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    ensure_exists(pool, id).await?;

    sqlx::query("DELETE FROM skills WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    info!("Deleted skill {id}");
    Ok(())
}

/// Dashboard totals: skill count, summed hours, and counts per progress label.
pub async fn skill_stats(pool: &SqlitePool) -> Result<SkillStats, AppError> {
    let (total_skills, total_hours): (i64, f64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(hours_spent), 0.0) FROM skills")
            .fetch_one(pool)
            .await?;

    let by_progress: Vec<(String, i64)> = sqlx::query_as(
        "SELECT COALESCE(progress, 'started'), COUNT(*) FROM skills GROUP BY 1",
    )
    .fetch_all(pool)
    .await?;

    Ok(SkillStats {
        total_skills,
        total_hours,
        by_progress: by_progress.into_iter().collect(),
    })
}

async fn ensure_exists(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM skills WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    found.map(|_| ()).ok_or_else(|| skill_not_found(id))
}

fn skill_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Skill {id} not found"))
}
