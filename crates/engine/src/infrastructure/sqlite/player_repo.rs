//! Player repository implementation for SQLite.
//!
//! Only `name`, `level` and `trophies` are persisted; decks stay in memory.

use async_trait::async_trait;
use cardbattle_domain::{Player, PlayerId};
use sqlx::SqlitePool;

use super::write_error;
use crate::infrastructure::ports::{PlayerRepo, RepoError};

#[derive(Debug, sqlx::FromRow)]
struct PlayerRow {
    id: i64,
    name: String,
    level: i32,
    trophies: i32,
}

impl PlayerRow {
    fn into_player(self) -> Player {
        Player::new(self.name, self.level, self.trophies).with_id(PlayerId::new(self.id))
    }
}

pub struct SqlitePlayerRepo {
    pool: SqlitePool,
}

impl SqlitePlayerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepo for SqlitePlayerRepo {
    async fn create(&self, player: Player) -> Result<Player, RepoError> {
        let result = sqlx::query("INSERT INTO players (name, level, trophies) VALUES (?, ?, ?)")
            .bind(player.name())
            .bind(player.level())
            .bind(player.trophies())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("player_create", e))?;

        let id = PlayerId::new(result.last_insert_rowid());
        tracing::debug!(player_id = %id, name = %player.name(), "Saved player");
        Ok(player.with_id(id))
    }

    async fn get_all(&self) -> Result<Vec<Player>, RepoError> {
        let rows: Vec<PlayerRow> = sqlx::query_as(
            "SELECT id, name, level, trophies FROM players ORDER BY trophies DESC, name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("player_list", e))?;
        Ok(rows.into_iter().map(PlayerRow::into_player).collect())
    }

    async fn get_by_id(&self, id: PlayerId) -> Result<Player, RepoError> {
        let row: Option<PlayerRow> =
            sqlx::query_as("SELECT id, name, level, trophies FROM players WHERE id = ?")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::database("player_get", e))?;

        row.map(PlayerRow::into_player)
            .ok_or_else(|| RepoError::not_found("Player", id))
    }

    async fn update(&self, id: PlayerId, player: &Player) -> Result<(), RepoError> {
        let result =
            sqlx::query("UPDATE players SET name = ?, level = ?, trophies = ? WHERE id = ?")
                .bind(player.name())
                .bind(player.level())
                .bind(player.trophies())
                .bind(id.as_i64())
                .execute(&self.pool)
                .await
                .map_err(|e| write_error("player_update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Player", id));
        }
        tracing::debug!(player_id = %id, "Updated player");
        Ok(())
    }

    async fn delete(&self, id: PlayerId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("player_delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Player", id));
        }
        tracing::debug!(player_id = %id, "Deleted player");
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("player_count", e))?;
        Ok(count.max(0) as u64)
    }
}
