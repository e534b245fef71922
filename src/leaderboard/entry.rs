//! Leaderboard entries and ranking.

use serde::{Deserialize, Serialize};

/// Name stored for a player who never gave one.
pub const ANONYMOUS: &str = "Anonymous";

/// Entries kept per difficulty by default.
pub const DEFAULT_CAPACITY: usize = 5;

/// One completed round on the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i32,
}

impl LeaderboardEntry {
    /// Create an entry; a blank name becomes [`ANONYMOUS`].
    pub fn new(name: &str, score: i32) -> Self {
        Self {
            name: display_name(name),
            score,
        }
    }
}

/// Trimmed player name, or [`ANONYMOUS`] when blank.
#[must_use]
pub fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sort descending by score and keep the top `capacity`.
///
/// The sort is stable: equal scores keep their insertion order, so an
/// older result stays ahead of a newer one with the same score.
pub fn rank_entries(entries: &mut Vec<LeaderboardEntry>, capacity: usize) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(capacity);
}
