//! Domain entities - Core business objects with identity

mod card;
mod deck;
mod player;

pub use card::{
    Card, CardKind, CardType, Rarity, MAX_CARD_LEVEL, MAX_ELIXIR_COST, MIN_CARD_LEVEL,
    MIN_ELIXIR_COST,
};
pub use deck::{Deck, DeckBuilder, MAX_DECK_SIZE};
pub use player::{Player, PlayerBuilder, MIN_PLAYER_LEVEL};

/// Behaviour shared by everything with a store identity and a name.
pub trait GameEntity {
    /// Store identity, `None` while unsaved.
    fn raw_id(&self) -> Option<i64>;

    fn name(&self) -> &str;

    /// Tag naming what kind of entity this is (e.g. `WARRIOR`, `PLAYER`).
    fn entity_type(&self) -> &'static str;

    fn is_persisted(&self) -> bool {
        self.raw_id().is_some()
    }

    /// One-line human summary, used in logs.
    fn basic_info(&self) -> String {
        format!(
            "ID: {}, Name: {}, Type: {}",
            self.raw_id().unwrap_or(0),
            self.name(),
            self.entity_type()
        )
    }
}
