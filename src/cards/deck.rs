//! Deck building and shuffling.
//!
//! `Deck::build` doubles every template into a pair; `Deck::shuffle`
//! permutes the cards in place. Card IDs are assigned in build order and
//! travel with their cards, so a shuffle changes positions, never IDs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardTemplate};
use super::instance::{Card, CardState};
use crate::core::GameRng;

/// Ordered sequence of paired cards for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck holding two hidden cards per template.
    ///
    /// The result has length `2 * templates.len()` and is not shuffled.
    #[must_use]
    pub fn build(templates: &[CardTemplate]) -> Self {
        let cards = templates
            .iter()
            .chain(templates.iter())
            .enumerate()
            .map(|(index, template)| Card::from_template(CardId::new(index as u32), template))
            .collect();
        Self { cards }
    }

    /// Shuffle in place. Every call reshuffles from the current order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Board position of a card.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Look up a card by ID for mutation.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// Set a card's state. Returns false if the ID is unknown.
    pub fn set_state(&mut self, id: CardId, state: CardState) -> bool {
        match self.get_mut(id) {
            Some(card) => {
                card.state = state;
                true
            }
            None => false,
        }
    }

    /// Count cards in the given state.
    #[must_use]
    pub fn count(&self, state: CardState) -> usize {
        self.cards.iter().filter(|c| c.state == state).count()
    }

    /// IDs of cards in the given state, in board order.
    pub fn ids_in_state(&self, state: CardState) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().filter(move |c| c.state == state).map(|c| c.id)
    }

    /// Check that every name appears exactly twice.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.name.as_str()).or_insert(0) += 1;
        }
        counts.values().all(|&n| n == 2)
    }
}
