//! Game state: the versioned snapshot and its pieces.
//!
//! ## Key Types
//!
//! - `GameState`: the complete live snapshot
//! - `Bases` / `Runner`: base occupancy with pitcher-of-record tracking
//! - `AtBat`: declared actions and resolved rolls for one plate appearance
//! - `CurrentPlay`: pending special plays (steals, contested advances,
//!   infield-in choices)
//! - `GameEvent`: append-only narration log entries

pub mod atbat;
pub mod bases;
pub mod events;
pub mod game_state;
pub mod play;

pub use atbat::{
    Advantage, AtBat, BatterAction, PitchResult, PitcherAction, SwingResult, ThrowResult,
    ThrowVerdict,
};
pub use bases::{base_ordinal, Base, Bases, Runner};
pub use events::{EventDraft, EventKind, GameEvent};
pub use game_state::{GameState, HalfPhase, PitcherStats, TeamState};
pub use play::{
    AdvanceKind, AdvanceSlot, BaseDecisions, CurrentPlay, DoublePlayDetails, DoublePlayOutcome,
    PendingStealAttempt, StealBaseResult, StealOutcome,
};
