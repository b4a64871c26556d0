//! Deck aggregate - a bounded, ordered set of cards
//!
//! Membership is checked when cards are added or removed; there is no standing
//! invariant enforced anywhere else. Elixir metrics are derived on every call.

use serde::{Deserialize, Serialize};

use super::Card;
use crate::validation::{require_non_empty, Validate};
use crate::{DeckId, DomainError};

/// Maximum number of cards a deck can hold.
pub const MAX_DECK_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    id: Option<DeckId>,
    name: String,
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: DeckId) -> Self {
        self.id = Some(id);
        self
    }

    #[inline]
    pub fn id(&self) -> Option<DeckId> {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in insertion order. Read-only: membership only changes through
    /// [`Deck::add_card`] and [`Deck::remove_card`].
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= MAX_DECK_SIZE
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.position_of(card).is_some()
    }

    pub fn add_card(&mut self, card: Card) -> Result<(), DomainError> {
        if self.is_full() {
            return Err(DomainError::container_full(
                self.cards.len() as u32,
                MAX_DECK_SIZE as u32,
            ));
        }
        if self.contains(&card) {
            return Err(DomainError::constraint(format!(
                "Card '{}' already exists in deck",
                card.name()
            )));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn remove_card(&mut self, card: &Card) -> Result<Card, DomainError> {
        let index = self.position_of(card).ok_or_else(|| {
            DomainError::constraint(format!("Card '{}' not found in deck", card.name()))
        })?;
        Ok(self.cards.remove(index))
    }

    pub fn total_elixir_cost(&self) -> i32 {
        self.cards.iter().map(Card::elixir_cost).sum()
    }

    /// Mean elixir cost of the current members; exactly 0.0 for an empty deck.
    pub fn average_elixir_cost(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        f64::from(self.total_elixir_cost()) / self.cards.len() as f64
    }

    // Persisted cards are the same member when their ids match; unsaved cards
    // fall back to structural equality.
    fn position_of(&self, card: &Card) -> Option<usize> {
        self.cards.iter().position(|member| match (member.id(), card.id()) {
            (Some(a), Some(b)) => a == b,
            _ => member == card,
        })
    }
}

impl Validate for Deck {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty(&self.name, "Deck name")
    }
}

/// Fluent construction of a [`Deck`].
///
/// Every card goes through [`Deck::add_card`], so the size and duplicate
/// checks apply here too.
#[derive(Debug, Default)]
pub struct DeckBuilder {
    id: Option<DeckId>,
    name: Option<String>,
    cards: Vec<Card>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: DeckId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_card(mut self, card: Card) -> Result<Self, DomainError> {
        if self.cards.len() >= MAX_DECK_SIZE {
            return Err(DomainError::container_full(
                self.cards.len() as u32,
                MAX_DECK_SIZE as u32,
            ));
        }
        self.cards.push(card);
        Ok(self)
    }

    pub fn cards(mut self, cards: Vec<Card>) -> Result<Self, DomainError> {
        if cards.len() > MAX_DECK_SIZE {
            return Err(DomainError::container_full(
                cards.len() as u32,
                MAX_DECK_SIZE as u32,
            ));
        }
        self.cards = cards;
        Ok(self)
    }

    pub fn build(self) -> Result<Deck, DomainError> {
        let name = self
            .name
            .ok_or_else(|| DomainError::validation("Deck name is required"))?;
        let mut deck = Deck::new(name);
        deck.validate()?;
        deck.id = self.id;
        for card in self.cards {
            deck.add_card(card)?;
        }
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardId;

    fn card(id: i64, elixir: i32) -> Card {
        Card::warrior(format!("Card {id}"), "COMMON", elixir, 1, 100, 10).with_id(CardId::new(id))
    }

    fn full_deck() -> Deck {
        let mut deck = Deck::new("Hog Cycle");
        for id in 1..=8 {
            deck.add_card(card(id, 3)).expect("room in deck");
        }
        deck
    }

    #[test]
    fn ninth_card_is_rejected_and_deck_stays_at_eight() {
        let mut deck = full_deck();
        let result = deck.add_card(card(9, 3));
        assert_eq!(result, Err(DomainError::container_full(8, 8)));
        assert_eq!(deck.len(), MAX_DECK_SIZE);
    }

    #[test]
    fn duplicate_card_is_rejected() {
        let mut deck = Deck::new("Beatdown");
        deck.add_card(card(1, 3)).expect("first add");
        let err = deck.add_card(card(1, 3)).expect_err("duplicate");
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn same_id_with_different_level_is_still_a_duplicate() {
        let mut deck = Deck::new("Beatdown");
        deck.add_card(card(1, 3)).expect("first add");
        let mut upgraded = card(1, 3);
        upgraded.upgrade().expect("upgrade");
        assert!(deck.add_card(upgraded).is_err());
    }

    #[test]
    fn unsaved_cards_compare_structurally() {
        let mut deck = Deck::new("Draft");
        deck.add_card(Card::spell("Zap", "COMMON", 2, 1, 2, 75))
            .expect("first add");
        assert!(deck
            .add_card(Card::spell("Zap", "COMMON", 2, 1, 2, 75))
            .is_err());
        assert!(deck
            .add_card(Card::spell("Log", "LEGENDARY", 2, 1, 3, 240))
            .is_ok());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut deck = Deck::new("Order");
        for id in [3, 1, 2] {
            deck.add_card(card(id, 1)).expect("add");
        }
        let ids: Vec<_> = deck.cards().iter().filter_map(Card::id).collect();
        assert_eq!(ids, vec![CardId::new(3), CardId::new(1), CardId::new(2)]);
    }

    #[test]
    fn removing_missing_card_fails() {
        let mut deck = Deck::new("Empty");
        assert!(deck.remove_card(&card(1, 3)).is_err());
    }

    #[test]
    fn remove_returns_member() {
        let mut deck = full_deck();
        let removed = deck.remove_card(&card(4, 3)).expect("present");
        assert_eq!(removed.id(), Some(CardId::new(4)));
        assert_eq!(deck.len(), 7);
        assert!(!deck.contains(&card(4, 3)));
    }

    #[test]
    fn elixir_metrics_are_derived() {
        let mut deck = Deck::new("Metrics");
        deck.add_card(card(1, 2)).expect("add");
        deck.add_card(card(2, 5)).expect("add");
        assert_eq!(deck.total_elixir_cost(), 7);
        assert_eq!(deck.average_elixir_cost(), 3.5);

        deck.remove_card(&card(2, 5)).expect("remove");
        assert_eq!(deck.total_elixir_cost(), 2);
        assert_eq!(deck.average_elixir_cost(), 2.0);
    }

    #[test]
    fn empty_deck_average_is_zero() {
        let deck = Deck::new("Empty");
        assert_eq!(deck.total_elixir_cost(), 0);
        assert_eq!(deck.average_elixir_cost(), 0.0);
    }

    #[test]
    fn builder_requires_name() {
        assert!(DeckBuilder::new().build().is_err());
        assert!(DeckBuilder::new().name("").build().is_err());
    }

    #[test]
    fn builder_rejects_oversized_card_list() {
        let cards: Vec<_> = (1..=9).map(|id| card(id, 1)).collect();
        assert!(DeckBuilder::new().name("Too big").cards(cards).is_err());
    }

    #[test]
    fn builder_routes_cards_through_membership_checks() {
        let result = DeckBuilder::new()
            .name("Dupes")
            .add_card(card(1, 3))
            .and_then(|b| b.add_card(card(1, 3)))
            .and_then(DeckBuilder::build);
        assert!(result.is_err());

        let deck = DeckBuilder::new()
            .id(DeckId::new(5))
            .name("Ok")
            .add_card(card(1, 3))
            .and_then(DeckBuilder::build)
            .expect("valid deck");
        assert_eq!(deck.id(), Some(DeckId::new(5)));
        assert_eq!(deck.len(), 1);
    }
}
