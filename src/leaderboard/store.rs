//! Leaderboard persisted in the session store.
//!
//! The stored value is one JSON object keyed by difficulty:
//!
//! ```json
//! {"easy": [{"name": "Ada", "score": 42}], "hard": []}
//! ```
//!
//! Only the key being updated is rewritten; anything else in the object
//! is carried over as-is. If the object, or the list being updated, has
//! the wrong shape, the update is abandoned and the stored text is left
//! exactly as it was.

use log::{error, warn};
use serde_json::{Map, Value};

use super::entry::{rank_entries, LeaderboardEntry, DEFAULT_CAPACITY};
use crate::core::Difficulty;
use crate::error::{GameError, Result};
use crate::session::{SessionStore, LEADERBOARD_KEY};

/// Per-difficulty top-N ledger over a [`SessionStore`].
///
/// ## Example
///
/// ```
/// use memory_match::core::Difficulty;
/// use memory_match::leaderboard::Leaderboard;
/// use memory_match::session::MemorySessionStore;
///
/// let mut store = MemorySessionStore::new();
/// let board = Leaderboard::new(5);
///
/// for score in [10, 50, 30, 20, 40, 5] {
///     board.record(&mut store, Difficulty::Easy, "Ada", score).unwrap();
/// }
///
/// let scores: Vec<i32> = board
///     .query(&store, Difficulty::Easy)
///     .iter()
///     .map(|e| e.score)
///     .collect();
/// assert_eq!(scores, vec![50, 40, 30, 20, 10]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    capacity: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Leaderboard {
    /// Create a leaderboard keeping `capacity` entries per difficulty.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a result, re-rank, and store the difficulty's new list.
    ///
    /// Returns the stored list. On malformed data nothing is written.
    pub fn record<S: SessionStore>(
        &self,
        store: &mut S,
        difficulty: Difficulty,
        name: &str,
        score: i32,
    ) -> Result<Vec<LeaderboardEntry>> {
        let result = self.try_record(store, difficulty, name, score);
        if let Err(err) = &result {
            error!("leaderboard update for {} aborted: {}", difficulty, err);
        }
        result
    }

    fn try_record<S: SessionStore>(
        &self,
        store: &mut S,
        difficulty: Difficulty,
        name: &str,
        score: i32,
    ) -> Result<Vec<LeaderboardEntry>> {
        let mut table = load_table(store)?;
        let mut entries = entries_for(&table, difficulty)?;

        entries.push(LeaderboardEntry::new(name, score));
        rank_entries(&mut entries, self.capacity);

        table.insert(difficulty.as_str().to_string(), serde_json::to_value(&entries)?);
        store.set(LEADERBOARD_KEY, serde_json::to_string(&Value::Object(table))?);
        Ok(entries)
    }

    /// Ranked entries for a difficulty; empty when nothing is recorded.
    ///
    /// Malformed data reads as empty.
    #[must_use]
    pub fn query<S: SessionStore>(&self, store: &S, difficulty: Difficulty) -> Vec<LeaderboardEntry> {
        let entries = load_table(store).and_then(|table| entries_for(&table, difficulty));
        match entries {
            Ok(mut entries) => {
                entries.truncate(self.capacity);
                entries
            }
            Err(err) => {
                warn!("unreadable leaderboard for {}: {}", difficulty, err);
                Vec::new()
            }
        }
    }

    /// Every difficulty's entries, in display order.
    #[must_use]
    pub fn standings<S: SessionStore>(&self, store: &S) -> Vec<(Difficulty, Vec<LeaderboardEntry>)> {
        Difficulty::ALL
            .iter()
            .map(|&difficulty| (difficulty, self.query(store, difficulty)))
            .collect()
    }
}

fn load_table<S: SessionStore>(store: &S) -> Result<Map<String, Value>> {
    let Some(raw) = store.get(LEADERBOARD_KEY) else {
        return Ok(Map::new());
    };
    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| GameError::MalformedLeaderboard(format!("not valid JSON: {e}")))?;
    match value {
        Value::Object(table) => Ok(table),
        Value::Null => Ok(Map::new()),
        _ => Err(GameError::MalformedLeaderboard(
            "expected an object keyed by difficulty".to_string(),
        )),
    }
}

fn entries_for(table: &Map<String, Value>, difficulty: Difficulty) -> Result<Vec<LeaderboardEntry>> {
    match table.get(difficulty.as_str()) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list @ Value::Array(_)) => serde_json::from_value(list.clone()).map_err(|e| {
            GameError::MalformedLeaderboard(format!("bad entry under '{difficulty}': {e}"))
        }),
        Some(_) => Err(GameError::MalformedLeaderboard(format!(
            "'{difficulty}' is not a list"
        ))),
    }
}
