//! Virtual-clock task queue.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::Generation;

/// Handle for cancelling a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// A task that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask<A> {
    pub id: TaskId,
    /// Clock time the task was due at.
    pub due_ms: u64,
    /// Round that queued it.
    pub generation: Generation,
    pub action: A,
}

/// Queue of deferred actions ordered by due time.
///
/// Tasks due at the same millisecond run in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    now_ms: u64,
    next_id: u64,
    /// Keyed by `(due_ms, id)` so iteration order is run order.
    queue: BTreeMap<(u64, TaskId), (Generation, A)>,
    /// Due time of every queued task, for lookup by id.
    due_by_id: FxHashMap<TaskId, u64>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
            due_by_id: FxHashMap::default(),
        }
    }
}

impl<A> Scheduler<A> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Queue `action` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, generation: Generation, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((due, id), (generation, action));
        self.due_by_id.insert(id, due);
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => self.queue.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    /// Drop every task queued by `generation`. Returns how many were dropped.
    pub fn cancel_generation(&mut self, generation: Generation) -> usize {
        let due_by_id = &mut self.due_by_id;
        let before = self.queue.len();
        self.queue.retain(|(_, id), (g, _)| {
            let keep = *g != generation;
            if !keep {
                due_by_id.remove(id);
            }
            keep
        });
        before - self.queue.len()
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.due_by_id.clear();
    }

    /// Remove the earliest task due at or before `until_ms`.
    ///
    /// The clock moves to that task's due time, so anything the caller
    /// schedules while handling it is measured from the right instant.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask<A>> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until_ms {
            return None;
        }
        let (generation, action) = self.queue.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now_ms = self.now_ms.max(due);
        Some(ScheduledTask {
            id,
            due_ms: due,
            generation,
            action,
        })
    }

    /// Move the clock forward to `until_ms` without running anything.
    ///
    /// Call after draining `pop_due` for the same instant.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Due time of the next task, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Check whether a task is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.due_by_id.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, until: u64) -> Vec<&'static str> {
        let mut out = Vec::new();
        while let Some(task) = scheduler.pop_due(until) {
            out.push(task.action);
        }
        scheduler.advance_to(until);
        out
    }

    #[test]
    fn test_runs_in_due_order() {
        let mut scheduler = Scheduler::new();
        let g = Generation::first();
        scheduler.schedule(300, g, "c");
        scheduler.schedule(100, g, "a");
        scheduler.schedule(200, g, "b");

        assert_eq!(drain(&mut scheduler, 1000), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), 1000);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_same_due_time_is_fifo() {
        let mut scheduler = Scheduler::new();
        let g = Generation::first();
        scheduler.schedule(100, g, "first");
        scheduler.schedule(100, g, "second");

        assert_eq!(drain(&mut scheduler, 100), vec!["first", "second"]);
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(500, Generation::first(), "later");

        assert!(drain(&mut scheduler, 499).is_empty());
        assert_eq!(scheduler.next_due(), Some(500));
        assert_eq!(drain(&mut scheduler, 500), vec!["later"]);
    }

    #[test]
    fn test_delay_measured_from_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(1000);
        scheduler.schedule(250, Generation::first(), "x");
        assert_eq!(scheduler.next_due(), Some(1250));
    }

    #[test]
    fn test_pop_moves_clock_to_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, Generation::first(), "a");

        let task = scheduler.pop_due(5000).unwrap();
        assert_eq!(task.due_ms, 100);
        assert_eq!(scheduler.now(), 100);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let g = Generation::first();
        let a = scheduler.schedule(100, g, "a");
        scheduler.schedule(200, g, "b");

        assert!(scheduler.is_pending(a));
        assert!(scheduler.cancel(a));
        assert!(!scheduler.cancel(a));
        assert!(!scheduler.is_pending(a));

        assert_eq!(drain(&mut scheduler, 1000), vec!["b"]);
    }

    #[test]
    fn test_cancel_after_run_or_clear() {
        let mut scheduler = Scheduler::new();
        let g = Generation::first();
        let ran = scheduler.schedule(100, g, "ran");
        let cleared = scheduler.schedule(200, g.next(), "cleared");
        let kept = scheduler.schedule(300, g, "kept");

        assert_eq!(drain(&mut scheduler, 100), vec!["ran"]);
        assert!(!scheduler.is_pending(ran));
        assert!(!scheduler.cancel(ran));

        scheduler.cancel_generation(g.next());
        assert!(!scheduler.is_pending(cleared));
        assert!(!scheduler.cancel(cleared));

        assert!(scheduler.is_pending(kept));
        scheduler.cancel_all();
        assert!(!scheduler.is_pending(kept));
        assert!(!scheduler.cancel(kept));
    }

    #[test]
    fn test_cancel_generation() {
        let mut scheduler = Scheduler::new();
        let old = Generation::first();
        let new = old.next();
        scheduler.schedule(100, old, "stale");
        scheduler.schedule(100, new, "fresh");
        scheduler.schedule(200, old, "stale too");

        assert_eq!(scheduler.cancel_generation(old), 2);
        assert_eq!(drain(&mut scheduler, 1000), vec!["fresh"]);
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1, Generation::first(), "a");
        scheduler.schedule(2, Generation::first(), "b");
        scheduler.cancel_all();
        assert_eq!(scheduler.pending(), 0);
        assert!(scheduler.pop_due(u64::MAX).is_none());
    }

    #[test]
    fn test_generation() {
        let g = Generation::first();
        assert_eq!(g.raw(), 1);
        assert_eq!(g.next().raw(), 2);
        assert_eq!(format!("{}", g), "Gen(1)");
    }
}
