//! Swing charts: roll-range to outcome tables.
//!
//! Each card carries a chart mapping contiguous d20 ranges to at-bat
//! outcomes. After the pitch decides which side has the advantage, the
//! swing roll is looked up on the advantaged card's chart.

use serde::{Deserialize, Serialize};

/// Result of a resolved plate appearance.
///
/// `Bunt` and `IntentionalWalk` never appear on a chart; they are produced
/// directly by the corresponding player choices and flow through the same
/// outcome application path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "SO")]
    Strikeout,
    #[serde(rename = "PU")]
    PopUp,
    #[serde(rename = "GB")]
    GroundBall,
    #[serde(rename = "FB")]
    FlyBall,
    #[serde(rename = "BB")]
    Walk,
    #[serde(rename = "1B")]
    Single,
    #[serde(rename = "1B+")]
    SinglePlus,
    #[serde(rename = "2B")]
    Double,
    #[serde(rename = "3B")]
    Triple,
    #[serde(rename = "HR")]
    HomeRun,
    #[serde(rename = "BUNT")]
    Bunt,
    #[serde(rename = "IBB")]
    IntentionalWalk,
}

impl Outcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Outcome::Strikeout => "SO",
            Outcome::PopUp => "PU",
            Outcome::GroundBall => "GB",
            Outcome::FlyBall => "FB",
            Outcome::Walk => "BB",
            Outcome::Single => "1B",
            Outcome::SinglePlus => "1B+",
            Outcome::Double => "2B",
            Outcome::Triple => "3B",
            Outcome::HomeRun => "HR",
            Outcome::Bunt => "BUNT",
            Outcome::IntentionalWalk => "IBB",
        }
    }

    /// Whether the batter reaches base on this outcome alone.
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(
            self,
            Outcome::Single
                | Outcome::SinglePlus
                | Outcome::Double
                | Outcome::Triple
                | Outcome::HomeRun
        )
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One contiguous roll range on a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub min: u8,
    pub max: u8,
    pub outcome: Outcome,
}

/// A card's swing chart.
///
/// Ranges are stored sorted and are expected to cover 1..=20 without
/// overlap; [`Chart::lookup`] returns `None` for an uncovered roll so the
/// caller can reject the card data instead of guessing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    entries: Vec<ChartEntry>,
}

impl Chart {
    /// Build a chart from `(min, max, outcome)` ranges.
    #[must_use]
    pub fn from_ranges(ranges: &[(u8, u8, Outcome)]) -> Self {
        let mut entries: Vec<ChartEntry> = ranges
            .iter()
            .map(|&(min, max, outcome)| ChartEntry { min, max, outcome })
            .collect();
        entries.sort_by_key(|e| e.min);
        Self { entries }
    }

    /// Look up the outcome for a roll.
    #[must_use]
    pub fn lookup(&self, roll: u8) -> Option<Outcome> {
        self.entries
            .iter()
            .find(|e| e.min <= roll && roll <= e.max)
            .map(|e| e.outcome)
    }

    /// Whether the chart covers every roll from 1 through 20.
    #[must_use]
    pub fn covers_d20(&self) -> bool {
        (1..=20).all(|roll| self.lookup(roll).is_some())
    }

    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }
}
