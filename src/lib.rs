//! # memory-match
//!
//! Game-state engine for a card-flip memory matching game.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine never touches a rendering surface. State
//!    changes leave as [`GameEvent`]s; a front-end subscribes and draws.
//!
//! 2. **Virtual Time**: Every pause (memorize phase, mismatch flip-back,
//!    final-pair reveal, timer tick) is a cancellable task on a
//!    [`Scheduler`]. Rounds are driven by `advance(elapsed_ms)`, so a whole
//!    game can be replayed deterministically in a test.
//!
//! 3. **Stale Work Is Inert**: Each task carries the [`Generation`] of the
//!    round that queued it. Restarting bumps the generation, so a
//!    leftover flip-back or tick can never touch the new board.
//!
//! ## Modules
//!
//! - `core`: Difficulty presets, configuration, RNG
//! - `cards`: Card templates, instances, decks, and the catalog
//! - `schedule`: Virtual-clock task queue and round generations
//! - `timer`: Round countdown
//! - `rules`: Match engine (selection, scoring, completion)
//! - `events`: Game events and observers
//! - `session`: Session-scoped key/value storage
//! - `leaderboard`: Per-difficulty top-five ledger
//! - `round`: Round controller tying it all together
//! - `error`: Crate error type

pub mod cards;
pub mod core;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod round;
pub mod rules;
pub mod schedule;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{time_limit_for, Difficulty, GameConfig, GameRng};

pub use crate::cards::{Card, CardCatalog, CardId, CardState, CardTemplate, Deck};

pub use crate::schedule::{Generation, ScheduledTask, Scheduler, TaskId};

pub use crate::timer::{Countdown, TickOutcome, TimerState};

pub use crate::rules::{EnginePhase, EngineStep, EngineTask, MatchEngine, Resolution};

pub use crate::events::{EventDispatcher, EventLog, GameEvent, GameObserver, RoundOutcome};

pub use crate::session::{MemorySessionStore, SessionStore};

pub use crate::leaderboard::{Leaderboard, LeaderboardEntry};

pub use crate::round::{RoundController, RoundPhase};

pub use crate::error::{GameError, Result};
