//! Leaderboard ranking and persistence tests.

use memory_match::core::Difficulty;
use memory_match::error::GameError;
use memory_match::leaderboard::{rank_entries, Leaderboard, LeaderboardEntry, ANONYMOUS};
use memory_match::session::{MemorySessionStore, SessionStore, LEADERBOARD_KEY};
use proptest::prelude::*;

fn record_all(store: &mut MemorySessionStore, difficulty: Difficulty, scores: &[i32]) {
    let board = Leaderboard::default();
    for (i, &score) in scores.iter().enumerate() {
        board
            .record(store, difficulty, &format!("p{i}"), score)
            .unwrap();
    }
}

// =============================================================================
// Ranking
// =============================================================================

#[test]
fn test_top_five_descending() {
    let mut store = MemorySessionStore::new();
    record_all(&mut store, Difficulty::Easy, &[10, 50, 30, 20, 40, 5]);

    let scores: Vec<_> = Leaderboard::default()
        .query(&store, Difficulty::Easy)
        .iter()
        .map(|e| e.score)
        .collect();
    assert_eq!(scores, vec![50, 40, 30, 20, 10]);
}

#[test]
fn test_ties_keep_insertion_order() {
    let mut store = MemorySessionStore::new();
    record_all(&mut store, Difficulty::Medium, &[7, 7, 9, 7]);

    let names: Vec<_> = Leaderboard::default()
        .query(&store, Difficulty::Medium)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["p2", "p0", "p1", "p3"]);
}

#[test]
fn test_new_tie_at_cutoff_is_dropped() {
    let mut store = MemorySessionStore::new();
    record_all(&mut store, Difficulty::Hard, &[5, 5, 5, 5, 5, 5]);

    let entries = Leaderboard::default().query(&store, Difficulty::Hard);
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|e| e.name != "p5"));
}

#[test]
fn test_custom_capacity() {
    let mut store = MemorySessionStore::new();
    let board = Leaderboard::new(2);
    for score in [1, 3, 2] {
        board.record(&mut store, Difficulty::Easy, "x", score).unwrap();
    }
    assert_eq!(board.query(&store, Difficulty::Easy).len(), 2);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_blank_name_is_anonymous() {
    let mut store = MemorySessionStore::new();
    let entries = Leaderboard::default()
        .record(&mut store, Difficulty::Easy, "", 1)
        .unwrap();
    assert_eq!(entries, vec![LeaderboardEntry { name: ANONYMOUS.to_string(), score: 1 }]);
}

#[test]
fn test_wrong_shape_leaves_storage_untouched() {
    let mut store = MemorySessionStore::new();
    let bad = r#"{"easy": [{"who": "x"}], "medium": []}"#;
    store.set(LEADERBOARD_KEY, bad.to_string());

    let result = Leaderboard::default().record(&mut store, Difficulty::Easy, "Ada", 10);
    assert!(matches!(result, Err(GameError::MalformedLeaderboard(_))));
    assert_eq!(store.get(LEADERBOARD_KEY).as_deref(), Some(bad));

    // Other difficulties in a well-formed list still read fine
    assert!(Leaderboard::default().query(&store, Difficulty::Medium).is_empty());
}

#[test]
fn test_clearing_session_clears_leaderboard() {
    let mut store = MemorySessionStore::new();
    record_all(&mut store, Difficulty::Easy, &[1, 2]);
    store.clear();
    assert!(Leaderboard::default().query(&store, Difficulty::Easy).is_empty());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Stored lists are sorted, capped, and hold the best scores seen.
    #[test]
    fn prop_stored_list_is_top_n(scores in proptest::collection::vec(-50i32..50, 0..20)) {
        let mut store = MemorySessionStore::new();
        record_all(&mut store, Difficulty::Easy, &scores);
        let stored = Leaderboard::default().query(&store, Difficulty::Easy);

        let mut expected: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| LeaderboardEntry::new(&format!("p{i}"), s))
            .collect();
        rank_entries(&mut expected, 5);

        prop_assert_eq!(stored.len(), scores.len().min(5));
        prop_assert!(stored.windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert_eq!(stored, expected);
    }
}
