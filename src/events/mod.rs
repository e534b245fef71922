//! Event system.
//!
//! The engine never reaches into a rendering surface. It emits typed
//! [`GameEvent`]s to a [`GameObserver`]; whoever draws the board subscribes
//! one.

pub mod event;
pub mod observer;

pub use event::{GameEvent, RoundOutcome};
pub use observer::{EventDispatcher, EventLog, GameObserver};
