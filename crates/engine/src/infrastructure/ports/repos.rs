//! Repository port traits for card and player storage.
//!
//! Both stores share one contract: ids are assigned on create, `get_by_id`,
//! `update` and `delete` report a missing row as [`RepoError::NotFound`], and
//! list operations return rows in a stable store-defined order.

use async_trait::async_trait;
use cardbattle_domain::{Card, CardId, CardType, Player, PlayerId, Rarity};

use super::error::RepoError;

// =============================================================================
// Cards
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepo: Send + Sync {
    /// Insert a new card and hand it back carrying its store-assigned id.
    async fn create(&self, card: Card) -> Result<Card, RepoError>;

    /// All cards, highest level first, then by name.
    async fn get_all(&self) -> Result<Vec<Card>, RepoError>;

    async fn get_by_id(&self, id: CardId) -> Result<Card, RepoError>;

    /// Overwrite every persisted field of the card stored under `id`.
    async fn update(&self, id: CardId, card: &Card) -> Result<(), RepoError>;

    async fn delete(&self, id: CardId) -> Result<(), RepoError>;

    async fn get_by_type(&self, card_type: CardType) -> Result<Vec<Card>, RepoError>;

    async fn get_by_rarity(&self, rarity: Rarity) -> Result<Vec<Card>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.get_all().await?.len() as u64)
    }

    async fn exists(&self, id: CardId) -> Result<bool, RepoError> {
        match self.get_by_id(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Players
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    /// Insert a new player and hand it back carrying its store-assigned id.
    ///
    /// Names are unique; a duplicate is a [`RepoError::ConstraintViolation`].
    async fn create(&self, player: Player) -> Result<Player, RepoError>;

    /// All players, most trophies first.
    async fn get_all(&self) -> Result<Vec<Player>, RepoError>;

    async fn get_by_id(&self, id: PlayerId) -> Result<Player, RepoError>;

    async fn update(&self, id: PlayerId, player: &Player) -> Result<(), RepoError>;

    async fn delete(&self, id: PlayerId) -> Result<(), RepoError>;

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.get_all().await?.len() as u64)
    }

    async fn exists(&self, id: PlayerId) -> Result<bool, RepoError> {
        match self.get_by_id(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
