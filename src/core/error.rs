//! Request-boundary error type.
//!
//! Every fallible public operation returns `Result<_, GameError>`. All
//! variants are recoverable: a rejected action leaves the committed game
//! snapshot untouched, and the caller can retry or resync.

use crate::core::{CardId, GameId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single lineup violation, keyed to the offending card where one
/// exists (structural problems like a missing pitcher have no card).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupError {
    pub card: Option<CardId>,
    pub reason: String,
}

impl LineupError {
    #[must_use]
    pub fn for_card(card: CardId, reason: impl Into<String>) -> Self {
        Self {
            card: Some(card),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn structural(reason: impl Into<String>) -> Self {
        Self {
            card: None,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for LineupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.card {
            Some(card) => write!(f, "{}: {}", card, self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

/// Errors surfaced by the engine and the store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The submitting user is not the one the current phase is waiting on.
    #[error("action submitted out of turn")]
    OutOfTurn,

    /// The action was already recorded for this at-bat. The stored roll
    /// stands; resubmission never re-rolls.
    #[error("action already recorded for the current at-bat")]
    ActionAlreadySet,

    /// The caller's view of the game is behind the committed turn.
    #[error("stale snapshot: expected turn {expected}, game is at turn {current}")]
    StaleVersion { expected: u64, current: u64 },

    /// The lineup violates position eligibility or completeness rules.
    #[error("invalid lineup ({} violation(s))", .0.len())]
    InvalidLineup(Vec<LineupError>),

    /// The named player cannot enter in this role (already used, or
    /// position-ineligible for the requested slot).
    #[error("player {0} is not eligible for this substitution")]
    IneligibleSubstitution(CardId),

    /// The card id is not in the acting side's roster.
    #[error("unknown player {0}")]
    UnknownPlayer(CardId),

    /// No game with this id exists in the store.
    #[error("unknown game {0}")]
    UnknownGame(GameId),

    /// The game reached a terminal state; no further actions are accepted.
    #[error("game is already over")]
    GameAlreadyOver,

    /// A decision payload does not match the pending play.
    #[error("malformed decision: {0}")]
    MalformedDecision(String),

    /// The stored snapshot references data that no longer lines up
    /// (for example a baserunner id missing from both rosters). The
    /// transaction is rejected wholesale.
    #[error("corrupt game state: {0}")]
    CorruptState(String),
}
