//! What the services keep in the query cache, and under which keys.

use cardbattle_domain::{Card, CardType, Player, Rarity};

use crate::infrastructure::cache::QueryCache;

/// A cached query result.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedView {
    Cards(Vec<Card>),
    Players(Vec<Player>),
    Count(u64),
}

pub type ViewCache = QueryCache<CachedView>;

// Each entity type owns one namespace. Clearing the namespace covers every
// view over that type, including filter keys added later.
pub(crate) const CARDS_NAMESPACE: &str = "cards:";
pub(crate) const PLAYERS_NAMESPACE: &str = "players:";

pub(crate) const ALL_CARDS: &str = "cards:all";
pub(crate) const CARD_COUNT: &str = "cards:count";
pub(crate) const ALL_PLAYERS: &str = "players:all";

pub(crate) fn cards_by_type(card_type: CardType) -> String {
    format!("cards:type:{}", card_type.as_str())
}

pub(crate) fn cards_by_rarity(rarity: Rarity) -> String {
    format!("cards:rarity:{}", rarity.as_str())
}
