//! Card Battle Domain
//!
//! Pure domain model for the card catalog: the card variants, players, decks,
//! the factory that builds cards from a type tag, and the validation rules
//! every entity passes before it reaches a store. No I/O lives here.

pub mod entities;
pub mod error;
pub mod factory;
pub mod ids;
pub mod validation;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Card, CardKind, CardType, Deck, DeckBuilder, GameEntity, Player, PlayerBuilder, Rarity,
    MAX_CARD_LEVEL, MAX_DECK_SIZE, MAX_ELIXIR_COST, MIN_CARD_LEVEL, MIN_ELIXIR_COST,
    MIN_PLAYER_LEVEL,
};

pub use error::DomainError;
pub use factory::{CardFactory, CardFields};

// Re-export ID types
pub use ids::{is_valid_id, CardId, DeckId, PlayerId};

pub use validation::Validate;
