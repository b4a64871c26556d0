//! Card entity - the catalog's polymorphic unit
//!
//! Every card shares the base attributes (name, rarity, elixir cost, level).
//! What differs per variant lives in [`CardKind`], which carries only the
//! stats meaningful for that variant:
//!
//! - `Warrior`: hit points and damage
//! - `Spell`: area radius and damage
//! - `Building`: hit points and lifetime in seconds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GameEntity;
use crate::validation::{require_at_least, require_in_range, require_non_empty, Validate};
use crate::{CardId, DomainError};

pub const MIN_ELIXIR_COST: i32 = 1;
pub const MAX_ELIXIR_COST: i32 = 10;
pub const MIN_CARD_LEVEL: i32 = 1;
pub const MAX_CARD_LEVEL: i32 = 16;

/// Discriminator for the card variants.
///
/// The upper-case name is what gets stored and what the factory dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Warrior,
    Spell,
    Building,
}

impl CardType {
    pub const ALL: [CardType; 3] = [CardType::Warrior, CardType::Spell, CardType::Building];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warrior => "WARRIOR",
            Self::Spell => "SPELL",
            Self::Building => "BUILDING",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = DomainError;

    /// Case-insensitive: "warrior", "Warrior" and "WARRIOR" are the same tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::parse(format!("Unknown card type: {s}")))
    }
}

/// Card rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Rare => "RARE",
            Self::Epic => "EPIC",
            Self::Legendary => "LEGENDARY",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::parse(format!("Unknown rarity: {s}")))
    }
}

/// Variant-specific stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Warrior { hp: i32, damage: i32 },
    Spell { radius: i32, damage: i32 },
    Building { hp: i32, lifetime: i32 },
}

impl CardKind {
    pub fn card_type(&self) -> CardType {
        match self {
            Self::Warrior { .. } => CardType::Warrior,
            Self::Spell { .. } => CardType::Spell,
            Self::Building { .. } => CardType::Building,
        }
    }

    pub fn hp(&self) -> Option<i32> {
        match self {
            Self::Warrior { hp, .. } | Self::Building { hp, .. } => Some(*hp),
            Self::Spell { .. } => None,
        }
    }

    pub fn damage(&self) -> Option<i32> {
        match self {
            Self::Warrior { damage, .. } | Self::Spell { damage, .. } => Some(*damage),
            Self::Building { .. } => None,
        }
    }

    pub fn radius(&self) -> Option<i32> {
        match self {
            Self::Spell { radius, .. } => Some(*radius),
            _ => None,
        }
    }

    pub fn lifetime(&self) -> Option<i32> {
        match self {
            Self::Building { lifetime, .. } => Some(*lifetime),
            _ => None,
        }
    }

    /// Stats that apply to this variant, labelled for messages.
    fn stats(&self) -> Vec<(&'static str, i32)> {
        match *self {
            Self::Warrior { hp, damage } => vec![("Hp", hp), ("Damage", damage)],
            Self::Spell { radius, damage } => vec![("Radius", radius), ("Damage", damage)],
            Self::Building { hp, lifetime } => vec![("Hp", hp), ("Lifetime", lifetime)],
        }
    }
}

/// A card in the catalog.
///
/// # Invariants
///
/// Construction does not check ranges. [`Validate::validate`] must pass before
/// a card is handed to a store:
///
/// - `name` is non-empty
/// - `rarity` names a known [`Rarity`] (any case)
/// - `elixir_cost` is within 1..=10
/// - `level` is within 1..=16
/// - variant stats are non-negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// `None` until a store assigns an identity.
    id: Option<CardId>,
    name: String,
    rarity: String,
    elixir_cost: i32,
    level: i32,
    kind: CardKind,
}

impl Card {
    pub fn new(
        name: impl Into<String>,
        rarity: impl Into<String>,
        elixir_cost: i32,
        level: i32,
        kind: CardKind,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            rarity: rarity.into(),
            elixir_cost,
            level,
            kind,
        }
    }

    pub fn warrior(
        name: impl Into<String>,
        rarity: impl Into<String>,
        elixir_cost: i32,
        level: i32,
        hp: i32,
        damage: i32,
    ) -> Self {
        Self::new(name, rarity, elixir_cost, level, CardKind::Warrior { hp, damage })
    }

    pub fn spell(
        name: impl Into<String>,
        rarity: impl Into<String>,
        elixir_cost: i32,
        level: i32,
        radius: i32,
        damage: i32,
    ) -> Self {
        Self::new(name, rarity, elixir_cost, level, CardKind::Spell { radius, damage })
    }

    pub fn building(
        name: impl Into<String>,
        rarity: impl Into<String>,
        elixir_cost: i32,
        level: i32,
        hp: i32,
        lifetime: i32,
    ) -> Self {
        Self::new(name, rarity, elixir_cost, level, CardKind::Building { hp, lifetime })
    }

    pub fn with_id(mut self, id: CardId) -> Self {
        self.id = Some(id);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> Option<CardId> {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rarity(&self) -> &str {
        &self.rarity
    }

    #[inline]
    pub fn elixir_cost(&self) -> i32 {
        self.elixir_cost
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.level
    }

    #[inline]
    pub fn kind(&self) -> &CardKind {
        &self.kind
    }

    #[inline]
    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Record the identity a store assigned to this card.
    pub fn assign_id(&mut self, id: CardId) {
        self.id = Some(id);
    }

    pub fn can_upgrade(&self) -> bool {
        self.level < MAX_CARD_LEVEL
    }

    /// Raise the level by exactly one.
    ///
    /// Fails instead of doing nothing when the card is already at the ceiling.
    pub fn upgrade(&mut self) -> Result<(), DomainError> {
        if !self.can_upgrade() {
            return Err(DomainError::validation(format!(
                "Card '{}' is already at max level ({})",
                self.name, self.level
            )));
        }
        self.level += 1;
        Ok(())
    }
}

impl GameEntity for Card {
    fn raw_id(&self) -> Option<i64> {
        self.id.map(i64::from)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn entity_type(&self) -> &'static str {
        self.card_type().as_str()
    }

    fn basic_info(&self) -> String {
        let mut info = format!(
            "ID: {}, Name: {}, Type: {}",
            self.raw_id().unwrap_or(0),
            self.name,
            self.entity_type()
        );
        for (label, value) in self.kind.stats() {
            info.push_str(&format!(", {label}: {value}"));
        }
        if let CardKind::Building { .. } = self.kind {
            info.push('s');
        }
        info
    }
}

impl Validate for Card {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty(&self.name, "Card name")?;
        self.rarity.parse::<Rarity>()?;
        require_in_range(self.elixir_cost, MIN_ELIXIR_COST..=MAX_ELIXIR_COST, "Elixir cost")?;
        require_in_range(self.level, MIN_CARD_LEVEL..=MAX_CARD_LEVEL, "Level")?;
        for (label, value) in self.kind.stats() {
            require_at_least(value, 0, label)?;
        }
        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Card[id={}, name={}, type={}, rarity={}, elixir={}, level={}]",
            self.raw_id().unwrap_or(0),
            self.name,
            self.card_type(),
            self.rarity,
            self.elixir_cost,
            self.level
        )
    }
}
