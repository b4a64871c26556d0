//! Response bodies returned by the HTTP API.

use cardbattle_domain::{Card, Player};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card as seen by API clients.
///
/// Only the stats meaningful for the card's variant are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub rarity: String,
    pub elixir_cost: i32,
    pub level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<i32>,
}

impl From<&Card> for CardResponse {
    fn from(card: &Card) -> Self {
        let kind = card.kind();
        Self {
            id: card.id().map(i64::from).unwrap_or(0),
            name: card.name().to_string(),
            card_type: card.card_type().as_str().to_string(),
            rarity: card.rarity().to_string(),
            elixir_cost: card.elixir_cost(),
            level: card.level(),
            damage: kind.damage(),
            hp: kind.hp(),
            radius: kind.radius(),
            lifetime: kind.lifetime(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub trophies: i32,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().map(i64::from).unwrap_or(0),
            name: player.name().to_string(),
            level: player.level(),
            trophies: player.trophies(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Query cache counters since startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
