//! Per-difficulty leaderboard.
//!
//! Winning rounds append `{name, score}` to their difficulty's list, which
//! is re-sorted (stable, descending) and cut to the top five. The ledger
//! lives in the session store and disappears with the session.

pub mod entry;
pub mod store;

pub use entry::{display_name, rank_entries, LeaderboardEntry, ANONYMOUS, DEFAULT_CAPACITY};
pub use store::Leaderboard;
