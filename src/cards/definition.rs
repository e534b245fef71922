//! Card templates - static card data from the catalog.
//!
//! A `CardTemplate` is one catalog entry. The deck holds two `Card`
//! instances per template; the template's `name` is what pairs them.

use serde::{Deserialize, Serialize};

/// Identifier for one card instance in a deck.
///
/// Assigned at build time in build order and kept across shuffles, so a
/// presentation layer can hold on to it while cards move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One catalog entry: a pairing name and the image shown on the face.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Pairing key. Two cards share it.
    pub name: String,

    /// Image reference (URI or path), opaque to the engine.
    pub image: String,
}

impl CardTemplate {
    /// Create a new template.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}
