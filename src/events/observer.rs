//! Observers and dispatch.
//!
//! The engine pushes every [`GameEvent`] into a `&mut dyn GameObserver`.
//! [`EventDispatcher`] fans events out to any number of subscribers, and
//! [`EventLog`] records them for polling front-ends and tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::event::GameEvent;

/// Receiver of game events.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl GameObserver for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Fan-out to subscribed observers, in subscription order.
#[derive(Default)]
pub struct EventDispatcher {
    observers: Vec<Box<dyn GameObserver>>,
}

impl EventDispatcher {
    /// Create a dispatcher with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber.
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl GameObserver for EventDispatcher {
    fn on_event(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Shared, clonable event recorder.
///
/// Clones share one buffer: subscribe one clone, read through another.
///
/// ```
/// use memory_match::events::{EventDispatcher, EventLog, GameEvent, GameObserver};
///
/// let log = EventLog::new();
/// let mut dispatcher = EventDispatcher::new();
/// dispatcher.subscribe(Box::new(log.clone()));
///
/// dispatcher.on_event(&GameEvent::MemorizeStarted);
/// assert_eq!(log.take(), vec![GameEvent::MemorizeStarted]);
/// assert!(log.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Count recorded events matching a predicate.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&GameEvent) -> bool,
    {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
