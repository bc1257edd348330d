use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

const CREATE_SKILLS: &str = r#"
    CREATE TABLE IF NOT EXISTS skills (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        resource_type TEXT,
        platform TEXT,
        progress TEXT DEFAULT 'started',
        hours_spent REAL DEFAULT 0,
        difficulty INTEGER DEFAULT 3,
        notes TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_EVENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        skill_id INTEGER,
        title TEXT NOT NULL,
        date TEXT NOT NULL,
        duration_minutes INTEGER DEFAULT 0,
        notes TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Columns added after the first release. Each entry is (table, column, DDL type).
/// Only constant defaults are allowed here; SQLite rejects `ADD COLUMN` with
/// an expression default such as CURRENT_TIMESTAMP.
const ADDITIVE_COLUMNS: &[(&str, &str, &str)] = &[
    ("skills", "difficulty", "INTEGER DEFAULT 3"),
    ("skills", "notes", "TEXT"),
    ("events", "duration_minutes", "INTEGER DEFAULT 0"),
    ("events", "notes", "TEXT"),
];

/// Creates the SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database at {database_url}");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates both tables if missing and adds any columns older databases lack.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_SKILLS).execute(pool).await?;
    sqlx::query(CREATE_EVENTS).execute(pool).await?;

    for (table, column, ddl) in ADDITIVE_COLUMNS {
        ensure_column(pool, table, column, ddl).await?;
    }

    Ok(())
}

/// Lists the column names of `table` via `PRAGMA table_info`.
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| row.try_get::<String, _>("name").map_err(Into::into))
        .collect()
}

async fn ensure_column(pool: &SqlitePool, table: &str, column: &str, ddl: &str) -> Result<()> {
    let columns = table_columns(pool, table).await?;
    if columns.iter().any(|c| c == column) {
        return Ok(());
    }

    match sqlx::query(&format!("ALTER TABLE {table} ADD COLUMN {column} {ddl}"))
        .execute(pool)
        .await
    {
        Ok(_) => {
            info!("DB: added missing column '{column}' to {table} table");
            Ok(())
        }
        Err(e) => {
            warn!("DB: failed to add '{column}' column to {table}: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool).await.expect("schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_schema_creates_tables() {
        let pool = test_pool().await;
        let skills = table_columns(&pool, "skills").await.unwrap();
        let events = table_columns(&pool, "events").await.unwrap();
        assert!(skills.contains(&"difficulty".to_string()));
        assert!(skills.contains(&"created_at".to_string()));
        assert!(events.contains(&"skill_id".to_string()));
        assert!(events.contains(&"duration_minutes".to_string()));
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = test_pool().await;
        init_schema(&pool).await.unwrap();
        let skills = table_columns(&pool, "skills").await.unwrap();
        assert_eq!(skills.iter().filter(|c| *c == "difficulty").count(), 1);
    }

    #[tokio::test]
    async fn test_migration_adds_difficulty_to_legacy_table() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("legacy.db").display());
        let pool = create_pool(&url).await.unwrap();

        sqlx::query(
            r#"
            CREATE TABLE skills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                resource_type TEXT,
                platform TEXT,
                progress TEXT DEFAULT 'started',
                hours_spent REAL DEFAULT 0,
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO skills (name) VALUES ('Rust')")
            .execute(&pool)
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();

        let difficulty: i64 = sqlx::query_scalar("SELECT difficulty FROM skills WHERE name = 'Rust'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(difficulty, 3);
    }
}
