//! Crate-wide error type.

use thiserror::Error;

/// Errors raised by the engine.
///
/// Rule violations (selecting a locked or resolved card) are never errors;
/// they are silent no-ops. Errors cover bad input data and storage.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("card catalog could not be parsed: {0}")]
    CatalogParse(#[source] serde_json::Error),

    #[error("card catalog is empty")]
    EmptyCatalog,

    #[error("card catalog lists '{name}' more than once")]
    DuplicateCard { name: String },

    #[error("cannot start a round: {reason}")]
    CatalogUnavailable { reason: String },

    #[error("malformed leaderboard data: {0}")]
    MalformedLeaderboard(String),

    #[error("session storage error: {0}")]
    Storage(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// Whether the current session can keep playing after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            GameError::MalformedLeaderboard(_) => true,
            GameError::Storage(_) => true,
            GameError::CatalogParse(_)
            | GameError::EmptyCatalog
            | GameError::DuplicateCard { .. }
            | GameError::CatalogUnavailable { .. }
            | GameError::InvalidConfig(_) => false,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
