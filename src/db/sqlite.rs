use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::AppResult;

/// Creates a SQLite connection pool
///
/// The database file is created on first run. The pool manages
/// connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates the wardrobe tables and indexes if they do not exist yet
///
/// Idempotent; runs on every startup.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS clothes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            category TEXT NOT NULL,
            color TEXT,
            season TEXT NOT NULL,
            occasion TEXT NOT NULL,
            wear_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_clothes_owner_filter
        ON clothes (owner, category, season, occasion)
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS outfit_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            top_id INTEGER,
            bottom_id INTEGER,
            footwear_id INTEGER,
            worn_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_outfit_history_owner_worn_at
        ON outfit_history (owner, worn_at)
        "#,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::debug!("Database schema initialized");

    Ok(())
}

/// In-memory pool for tests. Single connection: each `:memory:`
/// connection is its own database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    init_schema(&pool).await.unwrap();

    pool
}
