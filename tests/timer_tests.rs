//! Countdown tests driven through the scheduler.

use memory_match::core::Difficulty;
use memory_match::schedule::{Generation, Scheduler};
use memory_match::timer::{Countdown, TickOutcome, TimerState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tick;

/// Deliver every tick due by `until`.
fn run_until(timer: &mut Countdown, scheduler: &mut Scheduler<Tick>, until: u64) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    while scheduler.pop_due(until).is_some() {
        outcomes.push(timer.on_tick(scheduler, Tick));
    }
    scheduler.advance_to(until);
    outcomes
}

#[test]
fn test_ninety_seconds_expires_once_after_91_ticks() {
    let mut scheduler = Scheduler::new();
    let mut timer = Countdown::new();
    timer.start(Difficulty::Easy.time_limit(), 1000, &mut scheduler, Generation::first(), Tick);

    let outcomes = run_until(&mut timer, &mut scheduler, 91_000);
    assert_eq!(outcomes.len(), 91);

    let expired: Vec<_> = outcomes
        .iter()
        .filter(|o| matches!(o, TickOutcome::Expired { .. }))
        .collect();
    assert_eq!(expired, vec![&TickOutcome::Expired { shown: 0 }]);
    assert_eq!(outcomes[0], TickOutcome::Running { shown: 90 });
    assert_eq!(outcomes[89], TickOutcome::Running { shown: 1 });

    // Nothing else ever fires
    let later = run_until(&mut timer, &mut scheduler, 200_000);
    assert!(later.is_empty());
    assert_eq!(timer.state(), TimerState::Expired);
}

#[test]
fn test_displayed_values_count_down_by_one() {
    let mut scheduler = Scheduler::new();
    let mut timer = Countdown::new();
    timer.start(Difficulty::Hard.time_limit(), 1000, &mut scheduler, Generation::first(), Tick);

    let shown: Vec<u32> = run_until(&mut timer, &mut scheduler, 46_000)
        .into_iter()
        .map(|o| match o {
            TickOutcome::Running { shown } | TickOutcome::Expired { shown } => shown,
            TickOutcome::Inert => panic!("inert tick while running"),
        })
        .collect();
    let expected: Vec<u32> = (0..=45).rev().collect();
    assert_eq!(shown, expected);
}

#[test]
fn test_partial_advance_does_not_tick() {
    let mut scheduler = Scheduler::new();
    let mut timer = Countdown::new();
    timer.start(60, 1000, &mut scheduler, Generation::first(), Tick);

    assert!(run_until(&mut timer, &mut scheduler, 999).is_empty());
    assert_eq!(run_until(&mut timer, &mut scheduler, 1000).len(), 1);
    assert_eq!(timer.remaining(), 59);
}

#[test]
fn test_stop_mid_round() {
    let mut scheduler = Scheduler::new();
    let mut timer = Countdown::new();
    timer.start(60, 1000, &mut scheduler, Generation::first(), Tick);
    run_until(&mut timer, &mut scheduler, 10_000);

    timer.stop(&mut scheduler);
    assert!(run_until(&mut timer, &mut scheduler, 120_000).is_empty());
    assert_eq!(timer.remaining(), 50);
    assert_eq!(timer.state(), TimerState::Stopped);
}
