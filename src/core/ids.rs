//! Identifier types shared across the engine.
//!
//! ## Sides
//!
//! A game always has exactly two participants: the home side and the away
//! side. `Side` plus `SidePair<T>` replace ad-hoc home/away field pairs with
//! indexable per-side storage.
//!
//! ## Card identity
//!
//! Player cards are referenced everywhere (lineups, bases, the event log) by
//! `CardId` into the game's roster arena, never by copies of the card data.
//! Negative ids are reserved for the built-in replacement cards.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Unique identifier for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Identifier for a participating user, issued by the external auth
/// collaborator and trusted as input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User({})", self.0)
    }
}

/// Identifier for a player card in a roster arena.
///
/// Negative ids are reserved: `-1` is the replacement hitter and `-2` the
/// replacement pitcher, available to every roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub i32);

impl CardId {
    /// Replacement hitter, usable when a lineup slot must be filled.
    pub const REPLACEMENT_HITTER: CardId = CardId(-1);
    /// Replacement pitcher, usable when no real pitcher remains.
    pub const REPLACEMENT_PITCHER: CardId = CardId(-2);

    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Whether this id refers to one of the built-in replacement cards.
    #[must_use]
    pub const fn is_replacement(self) -> bool {
        self.0 < 0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// The side batting in the given half-inning.
    ///
    /// The away side bats in the top half, the home side in the bottom.
    #[must_use]
    pub const fn batting(top_of_inning: bool) -> Side {
        if top_of_inning {
            Side::Away
        } else {
            Side::Home
        }
    }

    /// The side fielding in the given half-inning.
    #[must_use]
    pub const fn fielding(top_of_inning: bool) -> Side {
        Side::batting(top_of_inning).opponent()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "Home"),
            Side::Away => write!(f, "Away"),
        }
    }
}

/// Per-side data storage, indexable by `Side`.
///
/// ## Example
///
/// ```
/// use showdown_engine::core::{Side, SidePair};
///
/// let mut scores: SidePair<u32> = SidePair::with_value(0);
/// scores[Side::Home] += 1;
/// assert_eq!(scores[Side::Home], 1);
/// assert_eq!(scores[Side::Away], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePair<T> {
    pub home: T,
    pub away: T,
}

impl<T> SidePair<T> {
    #[must_use]
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    /// Create with the same value on both sides.
    #[must_use]
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            home: value.clone(),
            away: value,
        }
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Iterate over (Side, &T) pairs, home first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Home, &self.home), (Side::Away, &self.away)].into_iter()
    }
}

impl<T: Default> Default for SidePair<T> {
    fn default() -> Self {
        Self {
            home: T::default(),
            away: T::default(),
        }
    }
}

impl<T> Index<Side> for SidePair<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SidePair<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
