//! Lineups: batting order, position assignments, eligibility, derived
//! defensive ratings.
//!
//! ## Key Types
//!
//! - `Lineup`: nine batting-order slots plus the current pitcher
//! - `LineupSlot`: one card at one position
//! - `DefensiveRatings`: catcher arm / infield / outfield totals derived
//!   from the fielding lineup
//!
//! Validation lives here too: every lineup mutation re-runs
//! [`validate::validate_lineup`], and an invalid lineup blocks play until
//! fixed.

pub mod ratings;
pub mod validate;

pub use ratings::{derive_ratings, DefensiveRatings};
pub use validate::{is_eligible, validate_lineup};

use crate::cards::Position;
use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// Number of batting-order slots in a lineup.
pub const LINEUP_SIZE: usize = 9;

/// One batting-order slot: a card playing a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub card: CardId,
    pub position: Position,
}

/// One side's lineup.
///
/// With a DH in the order the pitcher bats nowhere; without one the order
/// contains a `P` slot. `pitcher` is `None` while a relief pitcher is owed
/// (the previous pitcher was lifted and no replacement named yet), which
/// blocks play until resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub batting_order: Vec<LineupSlot>,
    pub pitcher: Option<CardId>,
}

impl Lineup {
    #[must_use]
    pub fn new(batting_order: Vec<LineupSlot>, pitcher: Option<CardId>) -> Self {
        Self {
            batting_order,
            pitcher,
        }
    }

    /// The card batting at the given order position (0-based, mod 9).
    #[must_use]
    pub fn batter_at(&self, order_position: usize) -> Option<CardId> {
        if self.batting_order.is_empty() {
            return None;
        }
        let idx = order_position % self.batting_order.len();
        Some(self.batting_order[idx].card)
    }

    /// Position the card currently plays in the order, if any.
    #[must_use]
    pub fn position_of(&self, card: CardId) -> Option<Position> {
        self.batting_order
            .iter()
            .find(|s| s.card == card)
            .map(|s| s.position)
    }

    /// The card assigned to a fielding position, if any.
    #[must_use]
    pub fn card_at(&self, position: Position) -> Option<CardId> {
        self.batting_order
            .iter()
            .find(|s| s.position == position)
            .map(|s| s.card)
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.batting_order.iter().any(|s| s.card == card)
            || self.pitcher.is_some_and(|p| p == card)
    }

    /// Replace `old` with `new` in its batting-order slot, keeping the
    /// position assignment. Returns false if `old` is not in the order.
    pub fn replace_card(&mut self, old: CardId, new: CardId) -> bool {
        match self.batting_order.iter_mut().find(|s| s.card == old) {
            Some(slot) => {
                slot.card = new;
                true
            }
            None => false,
        }
    }

    /// Reassign the batting-order slot holding `card` to `position`.
    pub fn assign_position(&mut self, card: CardId, position: Position) -> bool {
        match self.batting_order.iter_mut().find(|s| s.card == card) {
            Some(slot) => {
                slot.position = position;
                true
            }
            None => false,
        }
    }

    /// Swap the position assignments of two cards in the order.
    pub fn swap_positions(&mut self, a: CardId, b: CardId) -> bool {
        let pa = self.position_of(a);
        let pb = self.position_of(b);
        match (pa, pb) {
            (Some(pa), Some(pb)) => {
                self.assign_position(a, pb);
                self.assign_position(b, pa);
                true
            }
            _ => false,
        }
    }
}
