//! Difficulty presets and engine configuration.
//!
//! - `Difficulty`: named preset controlling the round's time limit
//! - `GameConfig`: delays, scoring values and leaderboard size
//!
//! Delays are in milliseconds of the controller's virtual clock, so the
//! same configuration drives a real frame loop and a test that advances
//! time by hand.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Named preset controlling the time limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All presets, in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Used when a difficulty name is not recognized. Its budget is the
    /// default time limit.
    pub const FALLBACK: Difficulty = Difficulty::Medium;

    /// Seconds on the clock for a round.
    #[must_use]
    pub const fn time_limit(self) -> u32 {
        match self {
            Difficulty::Easy => 90,
            Difficulty::Medium => 60,
            Difficulty::Hard => 45,
        }
    }

    /// Lowercase key used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a difficulty name, falling back to [`Difficulty::FALLBACK`].
    #[must_use]
    pub fn from_name_or_fallback(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("unknown difficulty '{}', using {}", name, Self::FALLBACK);
            Self::FALLBACK
        })
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time limit for a difficulty given by name.
///
/// Unrecognized names get `config.default_time_limit` rather than an error.
#[must_use]
pub fn time_limit_for(name: &str, config: &GameConfig) -> u32 {
    Difficulty::from_name(name).map_or(config.default_time_limit, Difficulty::time_limit)
}

/// Engine configuration.
///
/// Every field has a default, so a JSON override only needs the keys it
/// changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How long every face is shown before the clock starts.
    pub memorize_ms: u64,

    /// Pause before a mismatched pair flips back.
    pub mismatch_delay_ms: u64,

    /// Pause before the last pair is revealed automatically.
    pub final_pair_delay_ms: u64,

    /// How long the last pair stays up before the round is won.
    pub final_pair_hold_ms: u64,

    /// Length of one timer tick.
    pub tick_ms: u64,

    /// Points for a match.
    pub match_bonus: i32,

    /// Points taken for a mismatch.
    pub mismatch_penalty: i32,

    /// Entries kept per difficulty.
    pub leaderboard_size: usize,

    /// Time limit for unrecognized difficulty names.
    pub default_time_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            memorize_ms: 2000,
            mismatch_delay_ms: 1000,
            final_pair_delay_ms: 1000,
            final_pair_hold_ms: 2000,
            tick_ms: 1000,
            match_bonus: 10,
            mismatch_penalty: 2,
            leaderboard_size: 5,
            default_time_limit: 60,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON override and validate it.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(raw).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(GameError::InvalidConfig("tick_ms must be positive".into()));
        }
        if self.leaderboard_size == 0 {
            return Err(GameError::InvalidConfig("leaderboard_size must be positive".into()));
        }
        Ok(())
    }

    /// Set the memorize duration.
    #[must_use]
    pub fn with_memorize_ms(mut self, ms: u64) -> Self {
        self.memorize_ms = ms;
        self
    }

    /// Set the mismatch flip-back delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    /// Set both final-pair delays.
    #[must_use]
    pub fn with_final_pair_ms(mut self, delay_ms: u64, hold_ms: u64) -> Self {
        self.final_pair_delay_ms = delay_ms;
        self.final_pair_hold_ms = hold_ms;
        self
    }

    /// Set the scoring values.
    #[must_use]
    pub fn with_scoring(mut self, match_bonus: i32, mismatch_penalty: i32) -> Self {
        self.match_bonus = match_bonus;
        self.mismatch_penalty = mismatch_penalty;
        self
    }

    /// Set how many leaderboard entries are kept.
    #[must_use]
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }
}
