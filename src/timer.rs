//! Round countdown.
//!
//! ```text
//! Idle ──start──▶ Running ──remaining < 0──▶ Expired
//!                    │
//!                    └──stop──▶ Stopped
//! ```
//!
//! Each tick reports the seconds remaining *before* that tick's decrement.
//! A 90 second round therefore shows 90, 89, ..., 0 over 91 ticks, and
//! the 91st tick is also the one that expires.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::schedule::{Generation, Scheduler, TaskId};

/// Timer lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Expired,
    Stopped,
}

/// What a delivered tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock still running; `shown` is the value to display.
    Running { shown: u32 },
    /// Time ran out on this tick. Reported once.
    Expired { shown: u32 },
    /// The timer was not running; nothing changed.
    Inert,
}

/// Countdown bound to a time limit.
///
/// The timer owns the handle of its pending tick but not the scheduler;
/// the caller passes the scheduler in and routes due ticks back to
/// [`Countdown::on_tick`] with the action type of its choosing.
#[derive(Clone, Debug, Default)]
pub struct Countdown {
    state: TimerState,
    remaining: i64,
    tick_ms: u64,
    generation: Generation,
    pending: Option<TaskId>,
}

impl Countdown {
    /// Create an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `limit_secs`, scheduling the first tick.
    ///
    /// Restarting a running timer cancels its pending tick first.
    pub fn start<A>(
        &mut self,
        limit_secs: u32,
        tick_ms: u64,
        scheduler: &mut Scheduler<A>,
        generation: Generation,
        tick_action: A,
    ) {
        self.cancel_pending(scheduler);
        self.state = TimerState::Running;
        self.remaining = i64::from(limit_secs);
        self.tick_ms = tick_ms;
        self.generation = generation;
        self.pending = Some(scheduler.schedule(tick_ms, generation, tick_action));
    }

    /// Handle a due tick.
    ///
    /// While running, the next tick is scheduled with `next_action` unless
    /// this tick expired the timer.
    pub fn on_tick<A>(&mut self, scheduler: &mut Scheduler<A>, next_action: A) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Inert;
        }
        self.pending = None;

        let shown = self.remaining.max(0) as u32;
        self.remaining -= 1;

        if self.remaining < 0 {
            self.state = TimerState::Expired;
            debug!("timer expired");
            return TickOutcome::Expired { shown };
        }

        self.pending = Some(scheduler.schedule(self.tick_ms, self.generation, next_action));
        TickOutcome::Running { shown }
    }

    /// Stop the timer and cancel its pending tick.
    ///
    /// A no-op unless the timer is running.
    pub fn stop<A>(&mut self, scheduler: &mut Scheduler<A>) {
        self.cancel_pending(scheduler);
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
    }

    fn cancel_pending<A>(&mut self, scheduler: &mut Scheduler<A>) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Seconds left, never below zero.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining.max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Tick;

    fn run(timer: &mut Countdown, scheduler: &mut Scheduler<Tick>, until: u64) -> Vec<TickOutcome> {
        let mut out = Vec::new();
        while scheduler.pop_due(until).is_some() {
            out.push(timer.on_tick(scheduler, Tick));
        }
        scheduler.advance_to(until);
        out
    }

    #[test]
    fn test_counts_down_showing_value_before_decrement() {
        let mut scheduler = Scheduler::new();
        let mut timer = Countdown::new();
        timer.start(3, 1000, &mut scheduler, Generation::first(), Tick);

        let ticks = run(&mut timer, &mut scheduler, 3000);
        assert_eq!(
            ticks,
            vec![
                TickOutcome::Running { shown: 3 },
                TickOutcome::Running { shown: 2 },
                TickOutcome::Running { shown: 1 },
            ]
        );
        assert_eq!(timer.remaining(), 0);
        assert!(timer.is_running());

        let ticks = run(&mut timer, &mut scheduler, 4000);
        assert_eq!(ticks, vec![TickOutcome::Expired { shown: 0 }]);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let mut scheduler = Scheduler::new();
        let mut timer = Countdown::new();
        timer.start(10, 1000, &mut scheduler, Generation::first(), Tick);
        run(&mut timer, &mut scheduler, 2500);

        timer.stop(&mut scheduler);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(timer.remaining(), 8);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler: Scheduler<Tick> = Scheduler::new();
        let mut timer = Countdown::new();

        timer.stop(&mut scheduler);
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start(5, 1000, &mut scheduler, Generation::first(), Tick);
        timer.stop(&mut scheduler);
        timer.stop(&mut scheduler);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_tick_when_not_running_is_inert() {
        let mut scheduler = Scheduler::new();
        let mut timer = Countdown::new();
        assert_eq!(timer.on_tick(&mut scheduler, Tick), TickOutcome::Inert);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_restart_replaces_pending_tick() {
        let mut scheduler = Scheduler::new();
        let mut timer = Countdown::new();
        timer.start(5, 1000, &mut scheduler, Generation::first(), Tick);
        timer.start(7, 1000, &mut scheduler, Generation::first().next(), Tick);

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(timer.remaining(), 7);
    }
}
