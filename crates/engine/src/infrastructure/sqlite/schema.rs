//! SQLite schema initialization.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

/// Create the `cards` and `players` tables if they are missing.
///
/// Idempotent; called once on startup. There are no migrations.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    // Every variant shares one row shape; stats a variant lacks are stored as 0.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            card_type TEXT NOT NULL,
            rarity TEXT NOT NULL,
            elixir_cost INTEGER NOT NULL,
            level INTEGER NOT NULL,
            damage INTEGER NOT NULL DEFAULT 0,
            hp INTEGER NOT NULL DEFAULT 0,
            radius INTEGER NOT NULL DEFAULT 0,
            lifetime INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepoError::database("schema", e))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            level INTEGER NOT NULL DEFAULT 1,
            trophies INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepoError::database("schema", e))?;

    tracing::info!("SQLite schema initialized (cards, players)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::testing::temp_pool;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let (_dir, pool) = temp_pool().await;
        ensure_schema(&pool).await.expect("second run");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('cards', 'players') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("query");
        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["cards".to_string(), "players".to_string()]);
    }
}
