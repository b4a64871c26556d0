//! Management use cases for CRUD-style operations.
//!
//! Every mutation runs `validate -> store -> invalidate` in that order. A
//! failure in either of the first two steps returns before the cache is
//! touched.

use cardbattle_domain::DomainError;

use crate::infrastructure::ports::RepoError;

mod card;
mod player;
mod views;

pub use card::CardCrud;
pub use player::PlayerCrud;
pub use views::{CachedView, ViewCache};

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Storage failure: {0}")]
    Storage(RepoError),
}

impl From<RepoError> for ManagementError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            other => Self::Storage(other),
        }
    }
}

impl From<DomainError> for ManagementError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub card: CardCrud,
    pub player: PlayerCrud,
}

impl ManagementUseCases {
    pub fn new(card: CardCrud, player: PlayerCrud) -> Self {
        Self { card, player }
    }
}
