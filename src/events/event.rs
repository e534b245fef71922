//! Game event types.
//!
//! Events are the only way state changes leave the engine. A presentation
//! layer renders from them; tests assert on them.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::Difficulty;

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every pair matched before time ran out.
    Won,
    /// The timer expired.
    Lost,
}

/// Something that happened during a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh deck is on the board.
    RoundStarted {
        difficulty: Difficulty,
        time_limit: u32,
        card_count: usize,
    },

    /// All faces are shown for memorizing.
    MemorizeStarted,

    /// Faces are hidden again and the clock starts.
    MemorizeEnded,

    CardRevealed { card: CardId },

    CardHidden { card: CardId },

    CardMatched { card: CardId },

    /// Score after applying `delta`.
    ScoreChanged { score: i32, delta: i32 },

    /// Seconds to display.
    TimerTick { seconds_left: u32 },

    RoundWon { score: i32 },

    RoundLost { score: i32 },

    /// A result was written to a difficulty's leaderboard.
    LeaderboardUpdated { difficulty: Difficulty },

    PlayerNameChanged { name: String },

    /// No round can start (catalog failed to load).
    CannotStart { reason: String },
}

impl GameEvent {
    /// Terminal outcome carried by this event, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self {
            GameEvent::RoundWon { .. } => Some(RoundOutcome::Won),
            GameEvent::RoundLost { .. } => Some(RoundOutcome::Lost),
            _ => None,
        }
    }

    /// Card this event concerns, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        match self {
            GameEvent::CardRevealed { card }
            | GameEvent::CardHidden { card }
            | GameEvent::CardMatched { card } => Some(*card),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        assert_eq!(GameEvent::RoundWon { score: 3 }.outcome(), Some(RoundOutcome::Won));
        assert_eq!(GameEvent::RoundLost { score: 0 }.outcome(), Some(RoundOutcome::Lost));
        assert_eq!(GameEvent::MemorizeStarted.outcome(), None);
    }

    #[test]
    fn test_card() {
        let id = CardId::new(4);
        assert_eq!(GameEvent::CardHidden { card: id }.card(), Some(id));
        assert_eq!(GameEvent::TimerTick { seconds_left: 1 }.card(), None);
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_value(GameEvent::ScoreChanged { score: 8, delta: 10 }).unwrap();
        assert_eq!(json["type"], "score_changed");
        assert_eq!(json["score"], 8);
    }
}
