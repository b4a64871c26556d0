//! Card factory - one entry point that builds any card variant from a type tag
//!
//! The factory only routes fields; it does not range-check them. Callers run
//! [`Validate`](crate::validation::Validate) on the result before persisting.

use crate::{Card, CardId, CardKind, CardType, DomainError};

/// Raw fields for a card of any variant.
///
/// Stats that do not apply to the chosen variant are ignored; absent stats
/// default to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFields {
    pub id: Option<CardId>,
    pub name: String,
    pub rarity: String,
    pub elixir_cost: i32,
    pub level: i32,
    pub hp: Option<i32>,
    pub damage: Option<i32>,
    pub radius: Option<i32>,
    pub lifetime: Option<i32>,
}

impl CardFields {
    pub fn new(name: impl Into<String>, rarity: impl Into<String>, elixir_cost: i32, level: i32) -> Self {
        Self {
            name: name.into(),
            rarity: rarity.into(),
            elixir_cost,
            level,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: CardId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_lifetime(mut self, lifetime: i32) -> Self {
        self.lifetime = Some(lifetime);
        self
    }
}

/// Builds the [`Card`] variant named by a type tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardFactory;

impl CardFactory {
    pub fn new() -> Self {
        Self
    }

    /// Build a card of the given type.
    ///
    /// `card_type` is matched case-insensitively against `WARRIOR`, `SPELL`
    /// and `BUILDING`. Anything else, including an empty string, is an
    /// [`DomainError::InvalidArgument`] naming the rejected value.
    pub fn create_card(&self, card_type: &str, fields: CardFields) -> Result<Card, DomainError> {
        if card_type.is_empty() {
            return Err(DomainError::invalid_argument(
                "Card type can't be null or empty",
            ));
        }
        let card_type: CardType = card_type
            .parse()
            .map_err(|_| DomainError::invalid_argument(format!("Wrong card type: {card_type}")))?;

        let kind = match card_type {
            CardType::Warrior => CardKind::Warrior {
                hp: fields.hp.unwrap_or(0),
                damage: fields.damage.unwrap_or(0),
            },
            CardType::Spell => CardKind::Spell {
                radius: fields.radius.unwrap_or(0),
                damage: fields.damage.unwrap_or(0),
            },
            CardType::Building => CardKind::Building {
                hp: fields.hp.unwrap_or(0),
                lifetime: fields.lifetime.unwrap_or(0),
            },
        };

        let card = Card::new(
            fields.name,
            fields.rarity,
            fields.elixir_cost,
            fields.level,
            kind,
        );
        Ok(match fields.id {
            Some(id) => card.with_id(id),
            None => card,
        })
    }
}
