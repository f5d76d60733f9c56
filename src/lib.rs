//! # showdown-engine
//!
//! A turn-based engine for a two-player Showdown-style baseball card
//! game. Players alternate declared actions (pitch, swing, steal,
//! substitution) and the engine resolves each one deterministically
//! from a seeded dice stream.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `GameEngine::apply` never mutates its
//!    input; it derives a new snapshot from the latest committed one.
//!
//! 2. **Versioned history**: the store keeps every snapshot, keyed by
//!    turn number, and rejects submissions computed against a stale
//!    turn.
//!
//! 3. **Seeded dice**: all randomness comes from the state's own
//!    `GameRng` stream, so a seed plus an action script replays a game
//!    exactly.
//!
//! ## Modules
//!
//! - `core`: ids, sides, errors, RNG
//! - `cards`: player cards, charts, positions, rosters
//! - `lineup`: batting orders, eligibility, derived defense
//! - `state`: the game snapshot and its pieces
//! - `rules`: pitch/swing resolution, baserunning, steals, innings
//! - `engine`: actions, turn arbitration, the transition function
//! - `store`: concurrent in-memory game store and event log

pub mod cards;
pub mod core;
pub mod engine;
pub mod lineup;
pub mod rules;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    CardId, GameError, GameId, GameRng, GameRngState, LineupError, Side, SidePair, UserId,
};

pub use crate::cards::{
    replacement_hitter, replacement_pitcher, Chart, ChartEntry, FieldingRatings, Outcome,
    PlayerCard, Position, Roster, Speed,
};

pub use crate::lineup::{
    derive_ratings, is_eligible, validate_lineup, DefensiveRatings, Lineup, LineupSlot,
    LINEUP_SIZE,
};

pub use crate::state::{
    Advantage, AtBat, Base, BaseDecisions, Bases, BatterAction, CurrentPlay, EventDraft,
    EventKind, GameEvent, GameState, HalfPhase, PitchResult, PitcherAction, PitcherStats, Runner,
    StealOutcome, SwingResult, TeamState, ThrowResult, ThrowVerdict,
};

pub use crate::engine::{Game, GameAction, GameEngine, GameStatus, SeriesLink, Transition};

pub use crate::store::{GameSnapshot, GameStateStore};
