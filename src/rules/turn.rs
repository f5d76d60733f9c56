//! Turn arbitration.
//!
//! Every action is checked against the phase of the game and the acting
//! user's side before the engine touches state. The checks are ordered:
//! game over first, then seat, then phase, so a rejected action always
//! reports the most specific reason.
//!
//! The loop is strictly pitcher-first: the batter cannot declare a swing
//! or bunt until the pitcher has committed to a pitch.

use crate::core::{GameError, Side, UserId};
use crate::engine::GameAction;
use crate::state::{CurrentPlay, GameState, PitcherAction};

fn any_between_half(state: &GameState) -> bool {
    state.between_half[Side::Home] || state.between_half[Side::Away]
}

/// Check that `user` may apply `action` to `state` right now.
///
/// Read-only: a failed check leaves no trace.
pub fn authorize(state: &GameState, user: UserId, action: &GameAction) -> Result<(), GameError> {
    if state.game_over {
        return Err(GameError::GameAlreadyOver);
    }
    let side = state.side_of(user).ok_or(GameError::OutOfTurn)?;

    match action {
        GameAction::SetPitcherAction(_) => {
            if side != state.fielding_side() {
                return Err(GameError::OutOfTurn);
            }
            if state.awaiting_lineup_change {
                return Err(GameError::InvalidLineup(
                    state.lineup_validation_errors.clone(),
                ));
            }
            if state.current_play.is_some() || any_between_half(state) {
                return Err(GameError::OutOfTurn);
            }
            if state.current_at_bat.pitcher_action.is_some() {
                return Err(GameError::ActionAlreadySet);
            }
            Ok(())
        }
        GameAction::SetBatterAction(_) => {
            if side != state.batting_side() {
                return Err(GameError::OutOfTurn);
            }
            if state.current_play.is_some() || any_between_half(state) {
                return Err(GameError::OutOfTurn);
            }
            // The batter waits for a committed pitch.
            if state.current_at_bat.pitcher_action != Some(PitcherAction::Pitch)
                || state.current_at_bat.pitch.is_none()
            {
                return Err(GameError::OutOfTurn);
            }
            if state.current_at_bat.batter_action.is_some()
                || state.current_at_bat.swing.is_some()
            {
                return Err(GameError::ActionAlreadySet);
            }
            Ok(())
        }
        GameAction::SetDefense { .. } => {
            if side != state.fielding_side() {
                return Err(GameError::OutOfTurn);
            }
            if state.current_play.is_some() || state.current_at_bat.swing.is_some() {
                return Err(GameError::OutOfTurn);
            }
            Ok(())
        }
        GameAction::DeclareSteal { .. } => {
            if side != state.batting_side() {
                return Err(GameError::OutOfTurn);
            }
            if state.current_play.is_some()
                || state.pending_steal.is_some()
                || state.current_at_bat.swing.is_some()
                || state.awaiting_lineup_change
                || any_between_half(state)
            {
                return Err(GameError::OutOfTurn);
            }
            Ok(())
        }
        GameAction::AcknowledgeSteal => {
            if side != state.fielding_side() {
                return Err(GameError::OutOfTurn);
            }
            if state.pending_steal.is_none() {
                return Err(GameError::OutOfTurn);
            }
            Ok(())
        }
        GameAction::AdvanceDecisions(_) => {
            if side != state.batting_side() {
                return Err(GameError::OutOfTurn);
            }
            if !matches!(state.current_play, Some(CurrentPlay::Advance { .. })) {
                return Err(GameError::OutOfTurn);
            }
            Ok(())
        }
        GameAction::ResolveInfieldIn { .. } => {
            if side != state.batting_side() {
                return Err(GameError::OutOfTurn);
            }
            if !matches!(state.current_play, Some(CurrentPlay::InfieldInChoice { .. })) {
                return Err(GameError::OutOfTurn);
            }
            Ok(())
        }
        // Substitutions are validated against the acting side's own
        // lineup in the engine; any participant may initiate one.
        GameAction::Substitute { .. } | GameAction::SwapPositions { .. } => Ok(()),
        GameAction::NextHitter => {
            if state.current_play.is_some() || state.pending_steal.is_some() {
                return Err(GameError::OutOfTurn);
            }
            // The first press reseats the at-bat and clears the flags,
            // so an open readiness cycle authorizes the second press.
            let cycle_open =
                state.ready_for_next[Side::Home] || state.ready_for_next[Side::Away];
            if !cycle_open && !state.current_at_bat.is_complete() && !any_between_half(state) {
                return Err(GameError::OutOfTurn);
            }
            if state.ready_for_next[side] {
                return Err(GameError::ActionAlreadySet);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Outcome, Position};
    use crate::core::{CardId, SidePair};
    use crate::lineup::{DefensiveRatings, Lineup, LineupSlot};
    use crate::state::{BatterAction, SwingResult};

    fn lineup(base: i32) -> Lineup {
        let order = (0..9)
            .map(|i| LineupSlot {
                card: CardId(base + i),
                position: Position::FIELDING[i as usize],
            })
            .collect();
        Lineup::new(order, Some(CardId(base)))
    }

    fn state() -> GameState {
        GameState::initial(
            SidePair::new(UserId(1), UserId(2)),
            SidePair::new(lineup(100), lineup(200)),
            SidePair::with_value(DefensiveRatings::default()),
            3,
        )
    }

    const HOME: UserId = UserId(1);
    const AWAY: UserId = UserId(2);

    #[test]
    fn test_unknown_user_is_out_of_turn() {
        let s = state();
        let err = authorize(&s, UserId(9), &GameAction::NextHitter).unwrap_err();
        assert_eq!(err, GameError::OutOfTurn);
    }

    #[test]
    fn test_pitcher_goes_first() {
        let s = state();
        // Top of the 1st: home fields, away bats.
        assert!(authorize(&s, HOME, &GameAction::SetPitcherAction(PitcherAction::Pitch)).is_ok());
        assert_eq!(
            authorize(&s, AWAY, &GameAction::SetPitcherAction(PitcherAction::Pitch)),
            Err(GameError::OutOfTurn)
        );
        // Batter cannot move before the pitch.
        assert_eq!(
            authorize(&s, AWAY, &GameAction::SetBatterAction(BatterAction::Swing)),
            Err(GameError::OutOfTurn)
        );
    }

    #[test]
    fn test_pitch_action_is_idempotent() {
        let mut s = state();
        s.current_at_bat.pitcher_action = Some(PitcherAction::Pitch);
        assert_eq!(
            authorize(&s, HOME, &GameAction::SetPitcherAction(PitcherAction::Pitch)),
            Err(GameError::ActionAlreadySet)
        );
    }

    #[test]
    fn test_batter_acts_after_pitch() {
        let mut s = state();
        s.current_at_bat.pitcher_action = Some(PitcherAction::Pitch);
        s.current_at_bat.pitch = Some(crate::state::PitchResult {
            roll: 10,
            advantage: crate::state::Advantage::Batter,
            control_penalty: 0,
        });
        assert!(authorize(&s, AWAY, &GameAction::SetBatterAction(BatterAction::Swing)).is_ok());

        s.current_at_bat.swing = Some(SwingResult {
            roll: 5,
            outcome: Outcome::Single,
        });
        assert_eq!(
            authorize(&s, AWAY, &GameAction::SetBatterAction(BatterAction::Swing)),
            Err(GameError::ActionAlreadySet)
        );
    }

    #[test]
    fn test_next_hitter_needs_completed_at_bat() {
        let mut s = state();
        assert_eq!(
            authorize(&s, HOME, &GameAction::NextHitter),
            Err(GameError::OutOfTurn)
        );

        s.current_at_bat.swing = Some(SwingResult {
            roll: 5,
            outcome: Outcome::Strikeout,
        });
        assert!(authorize(&s, HOME, &GameAction::NextHitter).is_ok());
        assert!(authorize(&s, AWAY, &GameAction::NextHitter).is_ok());

        s.ready_for_next[Side::Home] = true;
        assert_eq!(
            authorize(&s, HOME, &GameAction::NextHitter),
            Err(GameError::ActionAlreadySet)
        );
    }

    #[test]
    fn test_between_half_allows_next_hitter() {
        let mut s = state();
        s.between_half[Side::Away] = true;
        assert!(authorize(&s, HOME, &GameAction::NextHitter).is_ok());
        // No pitching while between halves.
        assert_eq!(
            authorize(&s, HOME, &GameAction::SetPitcherAction(PitcherAction::Pitch)),
            Err(GameError::OutOfTurn)
        );
    }

    #[test]
    fn test_awaiting_lineup_change_blocks_pitch() {
        let mut s = state();
        s.awaiting_lineup_change = true;
        s.lineup_validation_errors =
            vec![crate::core::LineupError::structural("no pitcher on the mound")];
        let err = authorize(&s, HOME, &GameAction::SetPitcherAction(PitcherAction::Pitch))
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidLineup(errors) if errors.len() == 1));
    }

    #[test]
    fn test_steal_declaration_gating() {
        let mut s = state();
        let steal = GameAction::DeclareSteal {
            attempts: crate::state::BaseDecisions::none(),
        };
        assert!(authorize(&s, AWAY, &steal).is_ok());
        assert_eq!(authorize(&s, HOME, &steal), Err(GameError::OutOfTurn));

        s.current_at_bat.swing = Some(SwingResult {
            roll: 5,
            outcome: Outcome::Single,
        });
        assert_eq!(authorize(&s, AWAY, &steal), Err(GameError::OutOfTurn));
    }

    #[test]
    fn test_acknowledge_steal_is_fielding_only() {
        let mut s = state();
        s.pending_steal = Some(crate::state::PendingStealAttempt {
            results: smallvec::SmallVec::new(),
            outcome: crate::state::StealOutcome::Pending,
        });
        assert!(authorize(&s, HOME, &GameAction::AcknowledgeSteal).is_ok());
        assert_eq!(
            authorize(&s, AWAY, &GameAction::AcknowledgeSteal),
            Err(GameError::OutOfTurn)
        );
    }

    #[test]
    fn test_game_over_rejects_everything() {
        let mut s = state();
        s.game_over = true;
        assert_eq!(
            authorize(&s, HOME, &GameAction::NextHitter),
            Err(GameError::GameAlreadyOver)
        );
    }
}
