//! The append-only game narration log.

use serde::{Deserialize, Serialize};

/// Category of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Lifecycle announcements (inning changes, final score).
    System,
    /// At-bat resolution.
    Play,
    Walk,
    Steal,
    Baserunning,
    Substitution,
    InfieldIn,
}

/// One committed log entry. Entries are never edited or removed; `seq`
/// orders them and `turn_number` ties each to the transition that
/// produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub seq: u64,
    pub turn_number: u64,
    pub kind: EventKind,
    pub message: String,
}

/// An event produced by the engine before the store assigns `seq` and
/// `turn_number` at commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDraft {
    pub kind: EventKind,
    pub message: String,
}

impl EventDraft {
    #[must_use]
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
