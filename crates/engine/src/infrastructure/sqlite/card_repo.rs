//! Card repository implementation for SQLite.

use async_trait::async_trait;
use cardbattle_domain::{Card, CardId, CardType, Rarity};
use sqlx::SqlitePool;

use super::card_row::CardRow;
use super::write_error;
use crate::infrastructure::ports::{CardRepo, RepoError};

const SELECT_CARD: &str = "SELECT id, name, card_type, rarity, elixir_cost, level, damage, hp, radius, lifetime FROM cards";
const ORDER_BY: &str = "ORDER BY level DESC, name ASC";

pub struct SqliteCardRepo {
    pool: SqlitePool,
}

impl SqliteCardRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        operation: &'static str,
        filter: &str,
        value: &str,
    ) -> Result<Vec<Card>, RepoError> {
        let sql = format!("{SELECT_CARD} WHERE {filter} {ORDER_BY}");
        let rows: Vec<CardRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database(operation, e))?;
        rows.into_iter().map(CardRow::into_card).collect()
    }
}

#[async_trait]
impl CardRepo for SqliteCardRepo {
    async fn create(&self, card: Card) -> Result<Card, RepoError> {
        let row = CardRow::from_card(&card);
        let result = sqlx::query(
            r#"
            INSERT INTO cards (name, card_type, rarity, elixir_cost, level, damage, hp, radius, lifetime)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.name)
        .bind(&row.card_type)
        .bind(&row.rarity)
        .bind(row.elixir_cost)
        .bind(row.level)
        .bind(row.damage)
        .bind(row.hp)
        .bind(row.radius)
        .bind(row.lifetime)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("card_create", e))?;

        let id = CardId::new(result.last_insert_rowid());
        tracing::debug!(card_id = %id, name = %row.name, "Saved card");
        Ok(card.with_id(id))
    }

    async fn get_all(&self) -> Result<Vec<Card>, RepoError> {
        let sql = format!("{SELECT_CARD} {ORDER_BY}");
        let rows: Vec<CardRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("card_list", e))?;
        rows.into_iter().map(CardRow::into_card).collect()
    }

    async fn get_by_id(&self, id: CardId) -> Result<Card, RepoError> {
        let sql = format!("{SELECT_CARD} WHERE id = ?");
        let row: Option<CardRow> = sqlx::query_as(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("card_get", e))?;

        row.ok_or_else(|| RepoError::not_found("Card", id))?
            .into_card()
    }

    async fn update(&self, id: CardId, card: &Card) -> Result<(), RepoError> {
        let row = CardRow::from_card(card);
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET name = ?, card_type = ?, rarity = ?, elixir_cost = ?, level = ?,
                damage = ?, hp = ?, radius = ?, lifetime = ?
            WHERE id = ?
            "#,
        )
        .bind(&row.name)
        .bind(&row.card_type)
        .bind(&row.rarity)
        .bind(row.elixir_cost)
        .bind(row.level)
        .bind(row.damage)
        .bind(row.hp)
        .bind(row.radius)
        .bind(row.lifetime)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("card_update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Card", id));
        }
        tracing::debug!(card_id = %id, "Updated card");
        Ok(())
    }

    async fn delete(&self, id: CardId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("card_delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Card", id));
        }
        tracing::debug!(card_id = %id, "Deleted card");
        Ok(())
    }

    async fn get_by_type(&self, card_type: CardType) -> Result<Vec<Card>, RepoError> {
        self.fetch_where("card_list_by_type", "UPPER(card_type) = ?", card_type.as_str())
            .await
    }

    async fn get_by_rarity(&self, rarity: Rarity) -> Result<Vec<Card>, RepoError> {
        self.fetch_where("card_list_by_rarity", "UPPER(rarity) = ?", rarity.as_str())
            .await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("card_count", e))?;
        Ok(count.max(0) as u64)
    }
}
