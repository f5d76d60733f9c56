//! The engine: pure transition function from snapshot to snapshot.
//!
//! `GameEngine::apply` never mutates the input state. It clones, runs
//! the turn arbiter, dispatches to the rules, and returns the next
//! snapshot together with the narration drafts the transition produced.
//! The store decides whether to commit the result.

use crate::cards::PlayerCard;
use crate::core::{CardId, GameError, Side, SidePair, UserId};
use crate::engine::{substitution, GameAction};
use crate::lineup::{validate_lineup, LINEUP_SIZE};
use crate::rules::{self, PlayContext};
use crate::state::{
    AtBat, BatterAction, EventDraft, EventKind, GameState, PitchResult, PitcherAction, SwingResult,
};
use crate::cards::{Outcome, Roster};

/// The committed result of one accepted action.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<EventDraft>,
}

/// Applies actions to snapshots for one game's pair of rosters.
pub struct GameEngine {
    rosters: SidePair<Roster>,
}

impl GameEngine {
    #[must_use]
    pub fn new(rosters: SidePair<Roster>) -> Self {
        Self { rosters }
    }

    #[must_use]
    pub fn rosters(&self) -> &SidePair<Roster> {
        &self.rosters
    }

    fn card(&self, id: CardId) -> Result<&PlayerCard, GameError> {
        self.rosters[Side::Home]
            .get(id)
            .or_else(|| self.rosters[Side::Away].get(id))
            .ok_or_else(|| GameError::CorruptState(format!("card {id} not in either roster")))
    }

    fn play_context(&self, state: &GameState) -> PlayContext<'_> {
        let defense = state.fielding_defense();
        PlayContext {
            rosters: &self.rosters,
            infield_defense: defense.infield,
            outfield_defense: defense.outfield,
        }
    }

    /// Apply one action on behalf of `user`.
    ///
    /// Returns the next snapshot and its events, or the specific reason
    /// the action is not allowed right now.
    pub fn apply(
        &self,
        state: &GameState,
        user: UserId,
        action: GameAction,
    ) -> Result<Transition, GameError> {
        rules::authorize(state, user, &action)?;

        let mut next = state.clone();
        let mut events = Vec::new();

        match action {
            GameAction::SetPitcherAction(PitcherAction::Pitch) => {
                self.handle_pitch(&mut next)?;
            }
            GameAction::SetPitcherAction(PitcherAction::IntentionalWalk) => {
                self.handle_intentional_walk(&mut next, &mut events)?;
            }
            GameAction::SetBatterAction(batter_action) => {
                self.handle_batter_action(&mut next, batter_action, &mut events)?;
            }
            GameAction::SetDefense { infield_in } => {
                next.current_at_bat.infield_in = infield_in;
            }
            GameAction::DeclareSteal { attempts } => {
                let ctx = self.play_context(state);
                rules::declare_steal(&mut next, attempts, &ctx, &mut events)?;
            }
            GameAction::AcknowledgeSteal => {
                rules::acknowledge_steal(&mut next)?;
            }
            GameAction::AdvanceDecisions(decisions) => {
                let ctx = self.play_context(state);
                rules::resolve_advance_decisions(&mut next, decisions, &ctx, &mut events)?;
            }
            GameAction::ResolveInfieldIn { send_runner } => {
                let ctx = self.play_context(state);
                rules::resolve_infield_in(&mut next, send_runner, &ctx, &mut events)?;
            }
            GameAction::Substitute {
                player_in,
                player_out,
                position,
            } => {
                substitution::substitute(
                    &self.rosters,
                    &mut next,
                    user,
                    player_in,
                    player_out,
                    position,
                    &mut events,
                )?;
            }
            GameAction::SwapPositions { first, second } => {
                substitution::swap_positions(&self.rosters, &mut next, user, first, second, &mut events)?;
            }
            GameAction::NextHitter => {
                self.handle_next_hitter(&mut next, user, &mut events)?;
            }
        }

        Ok(Transition {
            state: next,
            events,
        })
    }

    /// Roll the pitch: fatigue-adjusted control against the batter's
    /// on-base, deciding who swings off whose chart.
    fn handle_pitch(&self, state: &mut GameState) -> Result<(), GameError> {
        let pitcher_id = state
            .pitcher_on_mound()
            .ok_or_else(|| GameError::CorruptState("no pitcher on the mound".into()))?;
        let pitcher = self.card(pitcher_id)?;
        let batter = self.card(state.current_at_bat.batter)?;

        state
            .pitcher_stats
            .entry(pitcher_id)
            .or_default()
            .note_inning(state.inning);
        let stats = state
            .pitcher_stats
            .get(&pitcher_id)
            .cloned()
            .unwrap_or_default();
        let (effective, penalty) = rules::effective_control(pitcher, &stats);

        let roll = state.rng.d20();
        let advantage = rules::resolve_pitch(batter, effective, roll);

        state.current_at_bat.pitcher_action = Some(PitcherAction::Pitch);
        state.current_at_bat.pitch = Some(PitchResult {
            roll,
            advantage,
            control_penalty: penalty,
        });
        Ok(())
    }

    /// An intentional walk skips the pitch and swing entirely.
    fn handle_intentional_walk(
        &self,
        state: &mut GameState,
        events: &mut Vec<EventDraft>,
    ) -> Result<(), GameError> {
        let pitcher_id = state
            .pitcher_on_mound()
            .ok_or_else(|| GameError::CorruptState("no pitcher on the mound".into()))?;
        let batter_id = state.current_at_bat.batter;

        state.last_steal = None;
        state.last_throw = None;
        state.current_at_bat.pitcher_action = Some(PitcherAction::IntentionalWalk);
        state.current_at_bat.swing = Some(SwingResult {
            roll: 0,
            outcome: Outcome::IntentionalWalk,
        });

        let ctx = self.play_context(state);
        rules::apply_outcome(
            state,
            Outcome::IntentionalWalk,
            batter_id,
            pitcher_id,
            &ctx,
            events,
        )
    }

    /// Resolve the at-bat: look the swing roll up on the advantaged
    /// chart (or bunt) and apply the outcome.
    fn handle_batter_action(
        &self,
        state: &mut GameState,
        batter_action: BatterAction,
        events: &mut Vec<EventDraft>,
    ) -> Result<(), GameError> {
        let batter_id = state.current_at_bat.batter;
        let pitcher_id = state
            .current_at_bat
            .pitcher
            .ok_or_else(|| GameError::CorruptState("at-bat has no pitcher".into()))?;

        // Stale displays from the previous play go away now.
        state.last_steal = None;
        state.last_throw = None;

        state.current_at_bat.batter_action = Some(batter_action);
        let (roll, outcome) = match batter_action {
            BatterAction::Bunt => (0, Outcome::Bunt),
            BatterAction::Swing => {
                let pitch = state
                    .current_at_bat
                    .pitch
                    .ok_or_else(|| GameError::CorruptState("swing without a pitch".into()))?;
                let chart_holder = match pitch.advantage {
                    crate::state::Advantage::Pitcher => self.card(pitcher_id)?,
                    crate::state::Advantage::Batter => self.card(batter_id)?,
                };
                let roll = state.rng.d20();
                let outcome = rules::resolve_swing(&chart_holder.chart, roll).ok_or_else(|| {
                    GameError::CorruptState(format!(
                        "chart of {} has no entry for roll {roll}",
                        chart_holder.card_id
                    ))
                })?;
                (roll, outcome)
            }
        };
        state.current_at_bat.swing = Some(SwingResult { roll, outcome });

        let ctx = self.play_context(state);
        rules::apply_outcome(state, outcome, batter_id, pitcher_id, &ctx, events)
    }

    /// One side declares readiness. The first press does all the work:
    /// freeze the finished at-bat, flip the half if one ended, advance
    /// the order, and seat the next batter.
    fn handle_next_hitter(
        &self,
        state: &mut GameState,
        user: UserId,
        events: &mut Vec<EventDraft>,
    ) -> Result<(), GameError> {
        let side = state.side_of(user).ok_or(GameError::OutOfTurn)?;
        let first_press = !state.ready_for_next[Side::Home] && !state.ready_for_next[Side::Away];

        if first_press {
            state.last_completed_at_bat = Some(state.current_at_bat.clone());

            let was_between = state.between_half[Side::Home] || state.between_half[Side::Away];
            if was_between {
                rules::advance_half(state);
            }

            let batting = state.batting_side();
            let team = &mut state.teams[batting];
            team.order_position = (team.order_position + 1) % LINEUP_SIZE;
            let order_position = team.order_position;

            let batter = state.lineups[batting]
                .batter_at(order_position)
                .unwrap_or(CardId::REPLACEMENT_HITTER);
            let pitcher = state.pitcher_on_mound();

            // Infield-in only survives while it still means something.
            let keep_infield_in = state.current_at_bat.infield_in
                && state.bases.third.is_some()
                && state.outs < 2;
            state.current_at_bat = AtBat::new(
                batter,
                pitcher,
                state.bases,
                state.outs,
                state.home_score,
                state.away_score,
            );
            state.current_at_bat.infield_in = keep_infield_in;

            match pitcher {
                Some(pitcher_id) => {
                    state.awaiting_lineup_change = false;
                    state.lineup_validation_errors.clear();
                    if was_between {
                        events.push(EventDraft::new(
                            EventKind::System,
                            format!(
                                "{} {}. {} now pitching.",
                                if state.top_of_inning { "Top" } else { "Bottom" },
                                rules::inning_ordinal(state.inning),
                                self.card(pitcher_id)?.name
                            ),
                        ));
                    }
                }
                None => {
                    // Fielding side owes a relief pitcher before play resumes.
                    state.awaiting_lineup_change = true;
                    let fielding = state.fielding_side();
                    state.lineup_validation_errors =
                        validate_lineup(&state.lineups[fielding], &self.rosters[fielding]);
                }
            }
        }

        state.ready_for_next[side] = true;
        if state.ready_for_next[Side::Home] && state.ready_for_next[Side::Away] {
            state.ready_for_next[Side::Home] = false;
            state.ready_for_next[Side::Away] = false;
            state.inning_ended_on_caught_stealing = false;
            state.double_play = None;
            state.current_play = None;
        }
        Ok(())
    }
}
