//! Round orchestration.
//!
//! [`RoundController`] is what a front-end talks to. It builds each
//! round's deck, runs the memorize phase, owns the countdown, forwards
//! selections to the [`MatchEngine`](crate::rules::MatchEngine), and
//! writes wins to the leaderboard.
//!
//! ## Round Lifecycle
//!
//! ```text
//! Idle ──new_round──▶ Memorizing ──memorize_ms──▶ Playing ──┬──▶ Won
//!                          ▲                                └──▶ Lost
//!                          └──── restart / change_difficulty ◀──── (any)
//! ```
//!
//! Time only moves when the caller calls [`RoundController::advance`].
//!
//! ## Example Usage
//!
//! ```
//! use memory_match::cards::{CardCatalog, CardTemplate};
//! use memory_match::core::{Difficulty, GameConfig, GameRng};
//! use memory_match::round::{RoundController, RoundPhase};
//! use memory_match::session::MemorySessionStore;
//!
//! let catalog = CardCatalog::new(vec![CardTemplate::new("cat", "cat.png")]).unwrap();
//! let mut round = RoundController::new(
//!     GameConfig::default(),
//!     catalog,
//!     MemorySessionStore::new(),
//!     GameRng::new(1),
//! );
//!
//! round.new_round(Difficulty::Easy).unwrap();
//! round.advance(2000);
//! assert_eq!(round.phase(), RoundPhase::Playing);
//!
//! let ids: Vec<_> = round.cards().iter().map(|c| c.id).collect();
//! round.select(ids[0]);
//! round.select(ids[1]);
//! assert_eq!(round.phase(), RoundPhase::Won);
//! assert_eq!(round.score(), 0);
//! ```

mod controller;

pub use controller::{Deferred, RoundController, RoundPhase};
