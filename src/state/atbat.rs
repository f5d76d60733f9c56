//! The at-bat: both sides' declared actions and the resolved rolls.
//!
//! An at-bat freezes its pre-play context (bases, outs, scores) when
//! created so the display can show what the play started from even after
//! the state has moved on.

use crate::cards::Outcome;
use crate::core::CardId;
use crate::state::Bases;
use serde::{Deserialize, Serialize};

/// The fielding side's declared action for the at-bat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitcherAction {
    Pitch,
    IntentionalWalk,
}

/// The batting side's declared action for the at-bat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatterAction {
    Swing,
    Bunt,
}

/// Who holds the advantage after the pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advantage {
    Pitcher,
    Batter,
}

/// The resolved pitch: roll, advantage, and any fatigue penalty applied
/// to the pitcher's control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchResult {
    pub roll: u8,
    pub advantage: Advantage,
    pub control_penalty: i32,
}

/// The resolved swing. `roll` is 0 for bunts and intentional walks, which
/// bypass the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingResult {
    pub roll: u8,
    pub outcome: Outcome,
}

/// Safe-or-out verdict of a contested throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowVerdict {
    Safe,
    Out,
}

/// The last contested throw, kept for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowResult {
    pub roll: u8,
    pub defense: i32,
    /// The runner's effective speed the defense had to beat.
    pub target: i32,
    pub verdict: ThrowVerdict,
    pub runner: CardId,
    /// Advancement target, 1-3 for a base, 4 for home plate.
    pub to_base: u8,
}

/// One plate appearance in progress (or just completed).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBat {
    pub batter: CardId,
    /// `None` while the fielding side owes a relief pitcher.
    pub pitcher: Option<CardId>,
    pub pitcher_action: Option<PitcherAction>,
    pub batter_action: Option<BatterAction>,
    pub pitch: Option<PitchResult>,
    pub swing: Option<SwingResult>,
    /// Defensive alignment for this at-bat.
    pub infield_in: bool,
    pub bases_before: Bases,
    pub outs_before: u8,
    pub home_score_before: u32,
    pub away_score_before: u32,
}

impl AtBat {
    /// Start a fresh at-bat, freezing the current context.
    #[must_use]
    pub fn new(
        batter: CardId,
        pitcher: Option<CardId>,
        bases: Bases,
        outs: u8,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            batter,
            pitcher,
            pitcher_action: None,
            batter_action: None,
            pitch: None,
            swing: None,
            infield_in: false,
            bases_before: bases,
            outs_before: outs,
            home_score_before: home_score,
            away_score_before: away_score,
        }
    }

    /// Whether the plate appearance has been resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.swing.is_some()
    }
}
