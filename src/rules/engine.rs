//! Match engine: selection, pair resolution, scoring, round completion.
//!
//! ## Turn State Machine
//!
//! ```text
//! NoSelection ──select──▶ OneSelected ──select──▶ Resolving ──┬──▶ NoSelection
//!                                                             ├──▶ FinalPair ──▶ Complete(Won)
//!                                                             └──▶ Complete(Won)
//! ```
//!
//! Timed transitions (mismatch flip-back, final-pair reveal and settle)
//! are not run by the engine. They come back to the caller as
//! [`EngineStep`]s; the caller schedules them and hands each task back to
//! [`MatchEngine::apply`] when it comes due. The rules stay testable
//! without a clock.
//!
//! ## Scoring
//!
//! - A match made by the player: `+match_bonus`, unless it completes the
//!   board outright
//! - A mismatch, once it flips back: `-mismatch_penalty` (no floor)
//! - The last pair, revealed and matched automatically: nothing

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, CardState, Deck};
use crate::core::GameConfig;
use crate::events::{GameEvent, GameObserver, RoundOutcome};

/// Where the engine is within a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    #[default]
    NoSelection,
    OneSelected,
    /// Two cards up; a mismatch is waiting to flip back.
    Resolving,
    /// Every pair but one is matched; the last one resolves by itself.
    FinalPair,
    Complete(RoundOutcome),
}

/// Deferred transition the caller must schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineTask {
    /// Turn a mismatched pair face down and apply the penalty.
    FlipBack { first: CardId, second: CardId },
    /// Show the last unmatched pair.
    RevealFinalPair,
    /// Mark the last pair matched and win.
    SettleFinalPair,
}

/// A task and how long to wait before applying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineStep {
    pub delay_ms: u64,
    pub task: EngineTask,
}

/// Result of a selection or an applied task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing changed.
    Ignored,
    /// First card is up; waiting for the second.
    AwaitingSecond,
    /// A pair was scored and the board is open again.
    Settled,
    /// Schedule this step and apply it when due.
    Pending(EngineStep),
    /// The round is over.
    Complete(RoundOutcome),
}

/// Rules for one round.
///
/// Owns the round's deck. A new round gets a new engine.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    deck: Deck,
    config: GameConfig,
    selection: SmallVec<[CardId; 2]>,
    locked: bool,
    score: i32,
    phase: EnginePhase,
}

impl MatchEngine {
    /// Create an engine with nothing selected and the board open.
    #[must_use]
    pub fn new(deck: Deck, config: GameConfig) -> Self {
        Self {
            deck,
            config,
            selection: SmallVec::new(),
            locked: false,
            score: 0,
            phase: EnginePhase::NoSelection,
        }
    }

    /// Select a card.
    ///
    /// Silently ignored while locked or complete, for an unknown card, for
    /// the card already held as first selection, and for any card that is
    /// not hidden.
    pub fn select(&mut self, id: CardId, events: &mut dyn GameObserver) -> Resolution {
        if self.locked || self.is_complete() {
            return Resolution::Ignored;
        }
        if self.selection.first() == Some(&id) {
            return Resolution::Ignored;
        }
        if !self.deck.get(id).is_some_and(|c| c.is_hidden()) {
            return Resolution::Ignored;
        }

        self.deck.set_state(id, CardState::Revealed);
        events.on_event(&GameEvent::CardRevealed { card: id });
        self.selection.push(id);

        if self.selection.len() == 1 {
            self.phase = EnginePhase::OneSelected;
            return Resolution::AwaitingSecond;
        }

        self.locked = true;
        self.phase = EnginePhase::Resolving;
        self.resolve(events)
    }

    fn resolve(&mut self, events: &mut dyn GameObserver) -> Resolution {
        let (first, second) = (self.selection[0], self.selection[1]);
        let is_match = match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        if !is_match {
            debug!("mismatch: {} / {}", first, second);
            return Resolution::Pending(EngineStep {
                delay_ms: self.config.mismatch_delay_ms,
                task: EngineTask::FlipBack { first, second },
            });
        }

        for id in [first, second] {
            self.deck.set_state(id, CardState::Matched);
            events.on_event(&GameEvent::CardMatched { card: id });
        }

        let matched = self.deck.count(CardState::Matched);
        let total = self.deck.len();
        debug!("match: {} / {} ({}/{} matched)", first, second, matched, total);

        // Only reachable on a one-pair deck
        if matched == total {
            self.finish(RoundOutcome::Won);
            return Resolution::Complete(RoundOutcome::Won);
        }

        self.adjust_score(self.config.match_bonus, events);

        if matched + 2 == total {
            self.selection.clear();
            self.phase = EnginePhase::FinalPair;
            return Resolution::Pending(EngineStep {
                delay_ms: self.config.final_pair_delay_ms,
                task: EngineTask::RevealFinalPair,
            });
        }

        self.open_board();
        Resolution::Settled
    }

    /// Apply a task that came due.
    ///
    /// A task that no longer fits the engine's phase (for example a
    /// flip-back after the round timed out) is ignored.
    pub fn apply(&mut self, task: EngineTask, events: &mut dyn GameObserver) -> Resolution {
        match task {
            EngineTask::FlipBack { first, second } => {
                if self.phase != EnginePhase::Resolving || self.selection[..] != [first, second] {
                    return Resolution::Ignored;
                }
                for id in [first, second] {
                    self.deck.set_state(id, CardState::Hidden);
                    events.on_event(&GameEvent::CardHidden { card: id });
                }
                self.adjust_score(-self.config.mismatch_penalty, events);
                self.open_board();
                Resolution::Settled
            }
            EngineTask::RevealFinalPair => {
                if self.phase != EnginePhase::FinalPair {
                    return Resolution::Ignored;
                }
                let remaining: SmallVec<[CardId; 2]> = self.deck.ids_in_state(CardState::Hidden).collect();
                for id in remaining {
                    self.deck.set_state(id, CardState::Revealed);
                    events.on_event(&GameEvent::CardRevealed { card: id });
                }
                Resolution::Pending(EngineStep {
                    delay_ms: self.config.final_pair_hold_ms,
                    task: EngineTask::SettleFinalPair,
                })
            }
            EngineTask::SettleFinalPair => {
                if self.phase != EnginePhase::FinalPair {
                    return Resolution::Ignored;
                }
                let remaining: SmallVec<[CardId; 2]> = self
                    .deck
                    .iter()
                    .filter(|c| !c.is_matched())
                    .map(|c| c.id)
                    .collect();
                for id in remaining {
                    self.deck.set_state(id, CardState::Matched);
                    events.on_event(&GameEvent::CardMatched { card: id });
                }
                self.finish(RoundOutcome::Won);
                Resolution::Complete(RoundOutcome::Won)
            }
        }
    }

    /// End the round on timeout.
    pub fn expire(&mut self) -> Resolution {
        if self.is_complete() {
            return Resolution::Ignored;
        }
        self.finish(RoundOutcome::Lost);
        Resolution::Complete(RoundOutcome::Lost)
    }

    fn adjust_score(&mut self, delta: i32, events: &mut dyn GameObserver) {
        self.score += delta;
        events.on_event(&GameEvent::ScoreChanged {
            score: self.score,
            delta,
        });
    }

    fn open_board(&mut self) {
        self.selection.clear();
        self.locked = false;
        self.phase = EnginePhase::NoSelection;
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        self.selection.clear();
        self.locked = true;
        self.phase = EnginePhase::Complete(outcome);
    }

    // === Queries ===

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, EnginePhase::Complete(_))
    }

    /// Outcome once the round is over.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            EnginePhase::Complete(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Cards currently held for comparison.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.deck.count(CardState::Matched)
    }
}
