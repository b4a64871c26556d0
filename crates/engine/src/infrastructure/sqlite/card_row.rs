//! Flat storage shape shared by every card variant.
//!
//! `from_card` / `into_card` are the only place the variant is flattened or
//! rebuilt. Decoding dispatches on `card_type`; an unknown value is a corrupt
//! row, never a default.

use cardbattle_domain::{Card, CardId, CardKind, CardType};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CardRow {
    pub id: Option<i64>,
    pub name: String,
    pub card_type: String,
    pub rarity: String,
    pub elixir_cost: i32,
    pub level: i32,
    pub damage: i32,
    pub hp: i32,
    pub radius: i32,
    pub lifetime: i32,
}

impl CardRow {
    /// Flatten a card. Stats the variant does not have are written as 0.
    pub fn from_card(card: &Card) -> Self {
        let kind = card.kind();
        Self {
            id: card.id().map(i64::from),
            name: card.name().to_string(),
            card_type: card.card_type().as_str().to_string(),
            rarity: card.rarity().to_string(),
            elixir_cost: card.elixir_cost(),
            level: card.level(),
            damage: kind.damage().unwrap_or(0),
            hp: kind.hp().unwrap_or(0),
            radius: kind.radius().unwrap_or(0),
            lifetime: kind.lifetime().unwrap_or(0),
        }
    }

    /// Rebuild the variant named by `card_type` (matched case-insensitively).
    pub fn into_card(self) -> Result<Card, RepoError> {
        let card_type: CardType = self.card_type.parse().map_err(|_| {
            RepoError::corrupt(format!(
                "Unknown card type '{}' in card row {}",
                self.card_type,
                self.id.unwrap_or_default()
            ))
        })?;

        let kind = match card_type {
            CardType::Warrior => CardKind::Warrior {
                hp: self.hp,
                damage: self.damage,
            },
            CardType::Spell => CardKind::Spell {
                radius: self.radius,
                damage: self.damage,
            },
            CardType::Building => CardKind::Building {
                hp: self.hp,
                lifetime: self.lifetime,
            },
        };

        let card = Card::new(self.name, self.rarity, self.elixir_cost, self.level, kind);
        Ok(match self.id {
            Some(id) => card.with_id(CardId::new(id)),
            None => card,
        })
    }
}
