//! Pitch and swing resolution.
//!
//! Both functions are pure: the caller rolls the dice and passes the
//! results in, so identical inputs always produce identical outputs.

use crate::cards::{Chart, Outcome, PlayerCard};
use crate::state::{Advantage, PitcherStats};

/// Fatigue-adjusted control and the penalty applied.
///
/// A pitcher stays at full strength through `ip + fatigue_modifier`
/// innings, minus one for every three runs charged. Each inning beyond
/// that costs one point of control.
#[must_use]
pub fn effective_control(pitcher: &PlayerCard, stats: &PitcherStats) -> (i32, i32) {
    let control = pitcher.control.unwrap_or(0);
    let ip = pitcher.ip.unwrap_or(0) as i32;
    let threshold = ip + stats.fatigue_modifier - (stats.runs / 3) as i32;
    let worked = stats.innings_count() as i32;
    let penalty = (worked - threshold).max(0);
    (control - penalty, penalty)
}

/// Decide who holds the advantage after the pitch.
///
/// A pitcher card at the plate concedes the advantage outright.
/// Otherwise the pitch roll plus effective control must beat the
/// batter's on-base rating (ties go to the batter).
#[must_use]
pub fn resolve_pitch(batter: &PlayerCard, effective_control: i32, roll: u8) -> Advantage {
    if batter.is_pitcher() {
        return Advantage::Pitcher;
    }
    if i32::from(roll) + effective_control > batter.on_base {
        Advantage::Pitcher
    } else {
        Advantage::Batter
    }
}

/// Look up the swing roll on the advantaged card's chart.
#[must_use]
pub fn resolve_swing(chart: &Chart, roll: u8) -> Option<Outcome> {
    chart.lookup(roll)
}
