//! Core types: identifiers, deterministic dice, errors.
//!
//! This module contains the building blocks the rest of the crate is
//! written in terms of. Nothing here knows about baseball rules.

pub mod error;
pub mod ids;
pub mod rng;

pub use error::{GameError, LineupError};
pub use ids::{CardId, GameId, Side, SidePair, UserId};
pub use rng::{GameRng, GameRngState};
