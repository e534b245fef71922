//! Deferred actions on a virtual clock.
//!
//! Every pause in a round (memorize phase, mismatch flip-back, final-pair
//! reveal, timer tick) is a task queued on a [`Scheduler`]. Nothing runs
//! by itself: the owner advances the clock and applies whatever comes due.
//!
//! ## Round Generations
//!
//! Each task is stamped with the [`Generation`] of the round that queued
//! it. Starting a new round bumps the generation, so a task that outlives
//! its round can be recognized and dropped before it touches anything.
//!
//! ## Example Usage
//!
//! ```
//! use memory_match::schedule::{Generation, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! let round = Generation::first();
//!
//! scheduler.schedule(1000, round, "flip back");
//! scheduler.schedule(500, round, "tick");
//!
//! let due = scheduler.pop_due(1000).unwrap();
//! assert_eq!(due.action, "tick");
//! assert_eq!(scheduler.now(), 500);
//!
//! let due = scheduler.pop_due(1000).unwrap();
//! assert_eq!(due.action, "flip back");
//! assert!(scheduler.pop_due(1000).is_none());
//! ```

mod scheduler;

pub use scheduler::{ScheduledTask, Scheduler, TaskId};

use serde::{Deserialize, Serialize};

/// Round-generation token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation of the first round.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// The generation after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}
