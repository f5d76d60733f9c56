//! The game engine: actions in, transitions out.
//!
//! ## Key Types
//!
//! - `GameAction`: everything a user can submit
//! - `GameEngine`: pure `(snapshot, user, action) -> Transition` function
//! - `Game`: durable identity and lifecycle record
//!
//! The engine holds the two rosters for card lookups but no mutable
//! state; every call starts from the snapshot the store hands it.

pub mod actions;
pub mod apply;
pub mod game;
pub mod substitution;

pub use actions::GameAction;
pub use apply::{GameEngine, Transition};
pub use game::{Game, GameStatus, SeriesLink};
