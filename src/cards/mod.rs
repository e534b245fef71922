//! Card system: templates, instances, decks, and the catalog.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Catalog entry (`name`, `image`)
//! - `CardId`: Stable identifier of a card instance
//! - `Card`: Runtime card with its `CardState`
//! - `Deck`: Two cards per template, shuffled per round
//! - `CardCatalog`: Validated template list loaded at startup

pub mod catalog;
pub mod deck;
pub mod definition;
pub mod instance;

pub use catalog::CardCatalog;
pub use deck::Deck;
pub use definition::{CardId, CardTemplate};
pub use instance::{Card, CardState};
