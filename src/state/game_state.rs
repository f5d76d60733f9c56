//! The authoritative game snapshot.
//!
//! One `GameState` is the complete live state of a game: score, bases,
//! the at-bat in progress, lineups, pitcher fatigue, pending plays, and
//! the dice. The store keeps every committed snapshot keyed by turn
//! number; the engine only ever derives a new snapshot from the latest.

use crate::core::{CardId, GameRng, LineupError, Side, SidePair, UserId};
use crate::lineup::{DefensiveRatings, Lineup};
use crate::state::{
    AtBat, Bases, CurrentPlay, DoublePlayDetails, PendingStealAttempt, ThrowResult,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Batting-order bookkeeping and the used-player list for one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub user_id: UserId,
    /// Index into the batting order of the current batter.
    pub order_position: usize,
    /// Players who have left the game; re-entry is not allowed.
    pub used_players: Vec<CardId>,
}

impl TeamState {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            order_position: 0,
            used_players: Vec::new(),
        }
    }
}

/// Workload and runs charged against one pitcher, feeding the fatigue
/// penalty on effective control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherStats {
    pub runs: u32,
    /// Distinct innings this pitcher has thrown in.
    pub innings_pitched: Vec<u32>,
    /// Carry-over adjustment (rest between series games).
    pub fatigue_modifier: i32,
}

impl PitcherStats {
    /// Record that the pitcher threw in `inning`.
    pub fn note_inning(&mut self, inning: u32) {
        if !self.innings_pitched.contains(&inning) {
            self.innings_pitched.push(inning);
        }
    }

    #[must_use]
    pub fn innings_count(&self) -> u32 {
        self.innings_pitched.len() as u32
    }
}

/// Where the half-inning cycle stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HalfPhase {
    TopHalf,
    BottomHalf,
    /// Away side made its third out; waiting for both readiness flags.
    BetweenHalfAwayPending,
    /// Home side made its third out; waiting for both readiness flags.
    BetweenHalfHomePending,
    GameOver,
}

/// The complete live snapshot of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub inning: u32,
    pub top_of_inning: bool,
    pub outs: u8,
    pub home_score: u32,
    pub away_score: u32,
    pub bases: Bases,
    pub current_at_bat: AtBat,
    /// Frozen previous at-bat, retained for display across breaks.
    pub last_completed_at_bat: Option<AtBat>,
    pub teams: SidePair<TeamState>,
    pub lineups: SidePair<Lineup>,
    pub defense: SidePair<DefensiveRatings>,
    pub pitcher_stats: FxHashMap<CardId, PitcherStats>,
    /// Resolved steal awaiting the fielding side's acknowledgement.
    pub pending_steal: Option<PendingStealAttempt>,
    /// Last acknowledged steal, cleared on the next pitch.
    pub last_steal: Option<PendingStealAttempt>,
    /// Last contested throw, cleared on the next pitch.
    pub last_throw: Option<ThrowResult>,
    pub current_play: Option<CurrentPlay>,
    /// Last ground-ball force resolution, cleared at the next hitter.
    pub double_play: Option<DoublePlayDetails>,
    /// `between_half[side]` is set while that side's third out stands
    /// unacknowledged.
    pub between_half: SidePair<bool>,
    pub ready_for_next: SidePair<bool>,
    pub awaiting_lineup_change: bool,
    pub lineup_validation_errors: Vec<LineupError>,
    pub inning_ended_on_caught_stealing: bool,
    pub game_over: bool,
    pub winning_side: Option<Side>,
    pub rng: GameRng,
}

impl GameState {
    /// Build the opening snapshot: top of the 1st, away leadoff hitter
    /// against the home starter.
    #[must_use]
    pub fn initial(
        users: SidePair<UserId>,
        lineups: SidePair<Lineup>,
        defense: SidePair<DefensiveRatings>,
        seed: u64,
    ) -> Self {
        let batter = lineups[Side::Away]
            .batter_at(0)
            .unwrap_or(CardId::REPLACEMENT_HITTER);
        let pitcher = lineups[Side::Home].pitcher;
        let current_at_bat = AtBat::new(batter, pitcher, Bases::empty(), 0, 0, 0);

        Self {
            inning: 1,
            top_of_inning: true,
            outs: 0,
            home_score: 0,
            away_score: 0,
            bases: Bases::empty(),
            current_at_bat,
            last_completed_at_bat: None,
            teams: SidePair::new(
                TeamState::new(users[Side::Home]),
                TeamState::new(users[Side::Away]),
            ),
            lineups,
            defense,
            pitcher_stats: FxHashMap::default(),
            pending_steal: None,
            last_steal: None,
            last_throw: None,
            current_play: None,
            double_play: None,
            between_half: SidePair::with_value(false),
            ready_for_next: SidePair::with_value(false),
            awaiting_lineup_change: false,
            lineup_validation_errors: Vec::new(),
            inning_ended_on_caught_stealing: false,
            game_over: false,
            winning_side: None,
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn batting_side(&self) -> Side {
        Side::batting(self.top_of_inning)
    }

    #[must_use]
    pub fn fielding_side(&self) -> Side {
        Side::fielding(self.top_of_inning)
    }

    /// The pitcher currently on the mound for the fielding side, if any.
    #[must_use]
    pub fn pitcher_on_mound(&self) -> Option<CardId> {
        self.lineups[self.fielding_side()].pitcher
    }

    /// Defense totals of the side currently in the field.
    #[must_use]
    pub fn fielding_defense(&self) -> DefensiveRatings {
        self.defense[self.fielding_side()]
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    /// Credit a run to the batting side and charge it to the pitcher of
    /// record.
    pub fn add_run(&mut self, pitcher_of_record: CardId) {
        match self.batting_side() {
            Side::Home => self.home_score += 1,
            Side::Away => self.away_score += 1,
        }
        self.pitcher_stats
            .entry(pitcher_of_record)
            .or_default()
            .runs += 1;
    }

    #[must_use]
    pub fn phase(&self) -> HalfPhase {
        if self.game_over {
            HalfPhase::GameOver
        } else if self.between_half[Side::Away] {
            HalfPhase::BetweenHalfAwayPending
        } else if self.between_half[Side::Home] {
            HalfPhase::BetweenHalfHomePending
        } else if self.top_of_inning {
            HalfPhase::TopHalf
        } else {
            HalfPhase::BottomHalf
        }
    }

    /// The side a user plays for, if they are in this game.
    #[must_use]
    pub fn side_of(&self, user: UserId) -> Option<Side> {
        self.teams
            .iter()
            .find(|(_, team)| team.user_id == user)
            .map(|(side, _)| side)
    }
}
