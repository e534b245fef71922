//! Matching rules.
//!
//! `MatchEngine` owns one round's deck and decides what every selection
//! does: reveal, match, mismatch, or finish the round. It knows nothing
//! about clocks or rendering; timed transitions are returned as
//! [`EngineStep`]s for the caller to schedule.

pub mod engine;

pub use engine::{EnginePhase, EngineStep, EngineTask, MatchEngine, Resolution};
