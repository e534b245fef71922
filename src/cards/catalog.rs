//! Card catalog: the read-only list of templates a deck is built from.
//!
//! The catalog is loaded once at startup from JSON shaped like
//!
//! ```json
//! [{"name": "owl", "image": "img/owl.png"}, {"name": "fox", "image": "img/fox.png"}]
//! ```
//!
//! ## Example
//!
//! ```
//! use memory_match::cards::CardCatalog;
//!
//! let catalog = CardCatalog::from_json_str(
//!     r#"[{"name": "owl", "image": "owl.png"}, {"name": "fox", "image": "fox.png"}]"#,
//! ).unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.get("fox").is_some());
//! ```

use std::io::Read;

use rustc_hash::FxHashSet;

use super::definition::CardTemplate;
use crate::error::{GameError, Result};

/// Validated list of card templates.
///
/// Names are unique and the list is never empty, so every deck built from
/// it satisfies the pairing invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardCatalog {
    templates: Vec<CardTemplate>,
}

impl CardCatalog {
    /// Build a catalog from templates.
    pub fn new(templates: Vec<CardTemplate>) -> Result<Self> {
        if templates.is_empty() {
            return Err(GameError::EmptyCatalog);
        }

        let mut seen = FxHashSet::default();
        for template in &templates {
            if !seen.insert(template.name.as_str()) {
                return Err(GameError::DuplicateCard {
                    name: template.name.clone(),
                });
            }
        }

        Ok(Self { templates })
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let templates: Vec<CardTemplate> =
            serde_json::from_str(raw).map_err(GameError::CatalogParse)?;
        Self::new(templates)
    }

    /// Parse a catalog from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let templates: Vec<CardTemplate> =
            serde_json::from_reader(reader).map_err(GameError::CatalogParse)?;
        Self::new(templates)
    }

    /// All templates, in catalog order.
    #[must_use]
    pub fn templates(&self) -> &[CardTemplate] {
        &self.templates
    }

    /// Look up a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Number of distinct templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
