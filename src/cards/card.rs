//! Player card data.
//!
//! ## Card model
//!
//! A card is either a position player (`control: None`, rated by `on_base`
//! and `speed`) or a pitcher (`control: Some(..)`, rated by control and
//! innings-pitched stamina). Pitchers can bat; their running speed is a
//! flat 10 regardless of the printed grade.

use crate::cards::{Chart, Position};
use crate::core::CardId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Printed speed grade of a position player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speed {
    A,
    B,
    C,
}

impl Speed {
    /// Numeric speed used in throw and steal contests: A=20, B=15, C=10.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Speed::A => 20,
            Speed::B => 15,
            Speed::C => 10,
        }
    }
}

/// Per-position defensive ratings printed on a card.
///
/// Corner outfield spots may be covered by one shared LF/RF rating instead
/// of individual LF and RF entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldingRatings {
    ratings: FxHashMap<Position, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    left_right: Option<i32>,
}

impl FieldingRatings {
    #[must_use]
    pub fn new(ratings: FxHashMap<Position, i32>, left_right: Option<i32>) -> Self {
        Self {
            ratings,
            left_right,
        }
    }

    /// No ratings at all (a pitcher or pure DH).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from `(position, rating)` pairs, for tests and fixtures.
    #[must_use]
    pub fn from_pairs(pairs: &[(Position, i32)]) -> Self {
        Self {
            ratings: pairs.iter().copied().collect(),
            left_right: None,
        }
    }

    #[must_use]
    pub fn with_left_right(mut self, rating: i32) -> Self {
        self.left_right = Some(rating);
        self
    }

    /// Rating at a position, falling back to the shared LF/RF rating for
    /// corner outfield spots.
    #[must_use]
    pub fn rating_at(&self, position: Position) -> Option<i32> {
        match self.ratings.get(&position) {
            Some(&r) => Some(r),
            None if position.is_corner_outfield() => self.left_right,
            None => None,
        }
    }

    /// Whether the card has a printed rating usable at this position.
    #[must_use]
    pub fn covers(&self, position: Position) -> bool {
        self.rating_at(position).is_some()
    }

    /// A card with no defensive home: no ratings, or only a DH entry.
    #[must_use]
    pub fn is_dh_only(&self) -> bool {
        if self.left_right.is_some() {
            return false;
        }
        self.ratings.is_empty()
            || (self.ratings.len() == 1 && self.ratings.contains_key(&Position::DesignatedHitter))
    }
}

/// An immutable rated player card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub card_id: CardId,
    pub name: String,
    /// `Some` for pitcher cards; the control rating feeds the pitch contest.
    pub control: Option<i32>,
    /// On-base rating the pitch roll must beat to keep the advantage.
    pub on_base: i32,
    pub speed: Speed,
    /// Innings of full-strength stamina; pitchers only.
    pub ip: Option<u32>,
    pub fielding: FieldingRatings,
    pub chart: Chart,
}

impl PlayerCard {
    /// Pitcher cards are exactly those with a control rating.
    #[must_use]
    pub fn is_pitcher(&self) -> bool {
        self.control.is_some()
    }

    /// Effective running speed: pitchers are always 10.
    #[must_use]
    pub fn speed_value(&self) -> i32 {
        if self.is_pitcher() {
            10
        } else {
            self.speed.value()
        }
    }
}
