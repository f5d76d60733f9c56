//! Defensive positions.

use serde::{Deserialize, Serialize};

/// A fielding position (plus the designated-hitter pseudo-position).
///
/// Serializes with the conventional scorecard abbreviation so stored
/// snapshots read naturally (`"SS"`, `"LF"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
    #[serde(rename = "DH")]
    DesignatedHitter,
}

impl Position {
    /// The nine fielding slots a lineup must fill, DH excluded.
    pub const FIELDING: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::Shortstop,
        Position::ThirdBase,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// Scorecard abbreviation.
    #[must_use]
    pub const fn abbrev(self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::Shortstop => "SS",
            Position::ThirdBase => "3B",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::DesignatedHitter => "DH",
        }
    }

    #[must_use]
    pub const fn is_outfield(self) -> bool {
        matches!(
            self,
            Position::LeftField | Position::CenterField | Position::RightField
        )
    }

    /// Infield for defense-rating purposes (1B, 2B, SS, 3B).
    #[must_use]
    pub const fn is_infield(self) -> bool {
        matches!(
            self,
            Position::FirstBase | Position::SecondBase | Position::Shortstop | Position::ThirdBase
        )
    }

    /// LF and RF share one corner-outfield rating on many cards.
    #[must_use]
    pub const fn is_corner_outfield(self) -> bool {
        matches!(self, Position::LeftField | Position::RightField)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbrev())
    }
}
