//! Card instances - runtime card state.
//!
//! A `Card` is one face-down tile on the board. Its `state` is the only
//! mutable part:
//!
//! ```text
//! Hidden ──select──▶ Revealed ──match──▶ Matched
//!    ▲                   │
//!    └──── mismatch ─────┘
//! ```

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardTemplate};

/// Face state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    /// Face down and selectable.
    #[default]
    Hidden,
    /// Face up, waiting for comparison.
    Revealed,
    /// Part of a resolved pair. Never selectable again.
    Matched,
}

/// A card instance in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable instance ID.
    pub id: CardId,

    /// Pairing key, shared with exactly one other card.
    pub name: String,

    /// Face image reference.
    pub image: String,

    /// Current face state.
    pub state: CardState,
}

impl Card {
    /// Create a hidden card from a template.
    #[must_use]
    pub fn from_template(id: CardId, template: &CardTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            image: template.image.clone(),
            state: CardState::Hidden,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Whether two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_template_is_hidden() {
        let template = CardTemplate::new("cat", "cat.png");
        let card = Card::from_template(CardId::new(3), &template);

        assert_eq!(card.id, CardId::new(3));
        assert_eq!(card.name, "cat");
        assert_eq!(card.image, "cat.png");
        assert!(card.is_hidden());
        assert!(!card.is_matched());
    }

    #[test]
    fn test_pairs_with() {
        let template = CardTemplate::new("cat", "cat.png");
        let a = Card::from_template(CardId::new(0), &template);
        let b = Card::from_template(CardId::new(1), &template);
        let c = Card::from_template(CardId::new(2), &CardTemplate::new("dog", "dog.png"));

        assert!(a.pairs_with(&b));
        assert!(!a.pairs_with(&a));
        assert!(!a.pairs_with(&c));
    }

    #[test]
    fn test_state_serde() {
        assert_eq!(serde_json::to_string(&CardState::Revealed).unwrap(), "\"revealed\"");
    }
}
