//! Game rules: pure resolution logic.
//!
//! Everything here operates on a `GameState` the engine has already
//! cloned; the only side effects are dice rolls drawn from the state's
//! own rng stream.
//!
//! - `atbat`: pitch advantage and chart lookups
//! - `baserunning`: outcome application and contested advances
//! - `steal`: steal declaration, rolls, and acknowledgement
//! - `inning`: half-inning flips and game-over checks
//! - `turn`: who may act, and when

pub mod atbat;
pub mod baserunning;
pub mod inning;
pub mod steal;
pub mod turn;

pub use atbat::{effective_control, resolve_pitch, resolve_swing};
pub use baserunning::{
    apply_outcome, resolve_advance_decisions, resolve_infield_in, PlayContext,
};
pub use inning::{advance_half, check_walk_off, inning_ordinal, note_third_out, REGULATION_INNINGS};
pub use steal::{acknowledge_steal, declare_steal};
pub use turn::authorize;
