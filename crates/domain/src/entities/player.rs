//! Player entity

use serde::{Deserialize, Serialize};

use super::{Deck, GameEntity};
use crate::validation::{require_at_least, require_non_empty, Validate};
use crate::{DomainError, PlayerId};

pub const MIN_PLAYER_LEVEL: i32 = 1;

/// A registered player.
///
/// The deck is held in memory only; stores persist `name`, `level` and
/// `trophies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: Option<PlayerId>,
    name: String,
    level: i32,
    trophies: i32,
    deck: Option<Deck>,
}

impl Player {
    pub fn new(name: impl Into<String>, level: i32, trophies: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            level,
            trophies,
            deck: None,
        }
    }

    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = Some(id);
        self
    }

    #[inline]
    pub fn id(&self) -> Option<PlayerId> {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.level
    }

    #[inline]
    pub fn trophies(&self) -> i32 {
        self.trophies
    }

    #[inline]
    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn assign_id(&mut self, id: PlayerId) {
        self.id = Some(id);
    }

    pub fn set_deck(&mut self, deck: Deck) {
        self.deck = Some(deck);
    }

    /// Add a non-negative number of trophies to the running total.
    pub fn add_trophies(&mut self, amount: i32) -> Result<(), DomainError> {
        if amount < 0 {
            return Err(DomainError::validation("Cannot add negative trophies"));
        }
        self.trophies = self
            .trophies
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("Trophy count overflow"))?;
        Ok(())
    }
}

impl GameEntity for Player {
    fn raw_id(&self) -> Option<i64> {
        self.id.map(i64::from)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn entity_type(&self) -> &'static str {
        "PLAYER"
    }
}

impl Validate for Player {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty(&self.name, "Player name")?;
        require_at_least(self.level, MIN_PLAYER_LEVEL, "Player level")?;
        require_at_least(self.trophies, 0, "Trophies")?;
        if let Some(deck) = &self.deck {
            deck.validate()?;
        }
        Ok(())
    }
}

/// Fluent construction of a [`Player`] with defaults for optional fields.
///
/// `level` defaults to 1 and `trophies` to 0.
#[derive(Debug)]
pub struct PlayerBuilder {
    id: Option<PlayerId>,
    name: Option<String>,
    level: i32,
    trophies: i32,
    deck: Option<Deck>,
}

impl Default for PlayerBuilder {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            level: MIN_PLAYER_LEVEL,
            trophies: 0,
            deck: None,
        }
    }
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: PlayerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn trophies(mut self, trophies: i32) -> Self {
        self.trophies = trophies;
        self
    }

    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Fails only when the name is missing or blank; range checks are left to
    /// [`Validate`].
    pub fn build(self) -> Result<Player, DomainError> {
        let name = self
            .name
            .ok_or_else(|| DomainError::validation("Player name is required"))?;
        require_non_empty(&name, "Player name")?;
        Ok(Player {
            id: self.id,
            name,
            level: self.level,
            trophies: self.trophies,
            deck: self.deck,
        })
    }
}
