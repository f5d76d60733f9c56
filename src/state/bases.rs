//! Base occupancy.

use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// One of the three occupiable bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    /// Base number, 1 through 3. Home plate is 4 in advancement targets.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Base::First => 1,
            Base::Second => 2,
            Base::Third => 3,
        }
    }

    #[must_use]
    pub const fn from_number(n: u8) -> Option<Base> {
        match n {
            1 => Some(Base::First),
            2 => Some(Base::Second),
            3 => Some(Base::Third),
            _ => None,
        }
    }

    /// The next station: `Some(base)` or `None` for home plate.
    #[must_use]
    pub const fn next(self) -> Option<Base> {
        match self {
            Base::First => Some(Base::Second),
            Base::Second => Some(Base::Third),
            Base::Third => None,
        }
    }
}

/// Ordinal display for an advancement target (4 = home plate).
#[must_use]
pub fn base_ordinal(n: u8) -> &'static str {
    match n {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "home",
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(base_ordinal(self.number()))
    }
}

/// A runner standing on a base.
///
/// Carries the pitcher of record so an eventual run is charged to the
/// pitcher who let this runner on, not whoever is pitching when they score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runner {
    pub card: CardId,
    pub pitcher_of_record: CardId,
}

impl Runner {
    #[must_use]
    pub const fn new(card: CardId, pitcher_of_record: CardId) -> Self {
        Self {
            card,
            pitcher_of_record,
        }
    }
}

/// Occupancy of the three bases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    pub first: Option<Runner>,
    pub second: Option<Runner>,
    pub third: Option<Runner>,
}

impl Bases {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            first: None,
            second: None,
            third: None,
        }
    }

    #[must_use]
    pub const fn get(&self, base: Base) -> Option<Runner> {
        match base {
            Base::First => self.first,
            Base::Second => self.second,
            Base::Third => self.third,
        }
    }

    pub fn set(&mut self, base: Base, runner: Option<Runner>) {
        match base {
            Base::First => self.first = runner,
            Base::Second => self.second = runner,
            Base::Third => self.third = runner,
        }
    }

    /// Remove and return the runner on a base.
    pub fn take(&mut self, base: Base) -> Option<Runner> {
        let runner = self.get(base);
        self.set(base, None);
        runner
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        [self.first, self.second, self.third]
            .iter()
            .filter(|r| r.is_some())
            .count()
    }

    /// Replace a runner wherever they stand (pinch running).
    /// Returns true if a base was patched.
    pub fn replace_runner(&mut self, old: CardId, new: CardId) -> bool {
        let mut patched = false;
        for base in [Base::First, Base::Second, Base::Third] {
            if let Some(mut runner) = self.get(base) {
                if runner.card == old {
                    runner.card = new;
                    self.set(base, Some(runner));
                    patched = true;
                }
            }
        }
        patched
    }
}
