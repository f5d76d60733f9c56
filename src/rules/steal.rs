//! Steal declaration and resolution.
//!
//! A steal is declared and rolled in one transition: one independent d20
//! per attempted base, lead runner first. The resolved attempt then sits
//! as `pending_steal` until the fielding side acknowledges it, which
//! keeps the result on both screens before the next pitch.
//!
//! Stealing third carries a 5-point speed penalty; stealing home is not
//! offered. A runner is safe only when effective speed strictly beats
//! the catcher's arm plus the roll.

use crate::core::GameError;
use crate::rules::baserunning::PlayContext;
use crate::rules::inning;
use crate::state::{
    base_ordinal, Base, BaseDecisions, CurrentPlay, EventDraft, EventKind, GameState,
    PendingStealAttempt, StealBaseResult,
};
use smallvec::SmallVec;

/// Speed penalty for the longer lead at second.
const THIRD_BASE_PENALTY: i32 = 5;

/// Declare and immediately resolve a steal attempt.
///
/// All declared runners commit atomically; the caller has already
/// checked that the batting side is allowed to run right now.
pub fn declare_steal(
    state: &mut GameState,
    attempts: BaseDecisions,
    ctx: &PlayContext<'_>,
    events: &mut Vec<EventDraft>,
) -> Result<(), GameError> {
    if !attempts.any() {
        return Err(GameError::MalformedDecision(
            "no steal attempts declared".into(),
        ));
    }
    if attempts.get(Base::Third) {
        return Err(GameError::MalformedDecision(
            "stealing home is not supported".into(),
        ));
    }
    for base in attempts.declared_descending() {
        if state.bases.get(base).is_none() {
            return Err(GameError::MalformedDecision(format!(
                "no runner on {base} to steal"
            )));
        }
        // The base ahead must be open or also running.
        if let Some(next) = base.next() {
            if state.bases.get(next).is_some() && !attempts.get(next) {
                return Err(GameError::MalformedDecision(format!(
                    "runner on {next} blocks the steal from {base}"
                )));
            }
        }
    }

    let catcher_arm = state.fielding_defense().catcher_arm;
    let mut results: SmallVec<[StealBaseResult; 2]> = SmallVec::new();

    for base in attempts.declared_descending() {
        // The third out ends the half; trailing runners never go.
        if state.outs >= 3 {
            break;
        }
        let Some(runner) = state.bases.take(base) else {
            continue;
        };
        let to = base.number() + 1;
        let mut effective = ctx.speed(runner.card)?;
        if to == 3 {
            effective -= THIRD_BASE_PENALTY;
        }
        let roll = state.rng.d20();
        let safe = effective > catcher_arm + i32::from(roll);
        let name = ctx.name(runner.card);

        if safe {
            if let Some(target) = Base::from_number(to) {
                state.bases.set(target, Some(runner));
            }
            events.push(EventDraft::new(
                EventKind::Steal,
                format!("{name} takes off for {}... SAFE!", base_ordinal(to)),
            ));
        } else {
            state.outs += 1;
            events.push(EventDraft::new(
                EventKind::Steal,
                format!(
                    "{name} takes off for {}... CAUGHT STEALING! Outs: {}",
                    base_ordinal(to),
                    state.outs
                ),
            ));
        }

        results.push(StealBaseResult {
            runner,
            from: base,
            to,
            roll,
            catcher_arm,
            target: effective,
            safe,
        });
    }

    let outcome = PendingStealAttempt::verdict(&results);
    state.pending_steal = Some(PendingStealAttempt { results, outcome });
    state.current_play = Some(CurrentPlay::StealAttempt { declared: attempts });

    // The pitch is dead: the pitcher declares again once play resumes.
    state.current_at_bat.pitcher_action = None;
    state.current_at_bat.pitch = None;
    state.current_at_bat.bases_before = state.bases;
    state.current_at_bat.outs_before = state.outs;

    if state.outs >= 3 {
        state.inning_ended_on_caught_stealing = true;
        inning::note_third_out(state, events);
    }
    Ok(())
}

/// The fielding side has seen the steal result; play resumes.
pub fn acknowledge_steal(state: &mut GameState) -> Result<(), GameError> {
    let pending = state
        .pending_steal
        .take()
        .ok_or(GameError::OutOfTurn)?;
    state.last_steal = Some(pending);
    state.current_play = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Chart, FieldingRatings, Outcome, PlayerCard, Position, Roster, Speed};
    use crate::core::{CardId, Side, SidePair, UserId};
    use crate::lineup::{DefensiveRatings, Lineup, LineupSlot};
    use crate::state::{Runner, StealOutcome};

    fn card(id: i32, speed: Speed) -> PlayerCard {
        PlayerCard {
            card_id: CardId(id),
            name: format!("Player {id}"),
            control: None,
            on_base: 8,
            speed,
            ip: None,
            fielding: FieldingRatings::from_pairs(&[(Position::CenterField, 2)]),
            chart: Chart::from_ranges(&[(1, 20, Outcome::Single)]),
        }
    }

    fn rosters() -> SidePair<Roster> {
        let home: Vec<PlayerCard> = (100..110).map(|i| card(i, Speed::B)).collect();
        let mut away: Vec<PlayerCard> = (200..210).map(|i| card(i, Speed::B)).collect();
        away.push(card(210, Speed::A));
        SidePair::new(Roster::new(home), Roster::new(away))
    }

    fn lineup(base: i32) -> Lineup {
        let order = (0..9)
            .map(|i| LineupSlot {
                card: CardId(base + i),
                position: Position::FIELDING[i as usize],
            })
            .collect();
        Lineup::new(order, Some(CardId(base)))
    }

    fn state_with_arm(catcher_arm: i32) -> GameState {
        let mut defense = DefensiveRatings::default();
        defense.catcher_arm = catcher_arm;
        GameState::initial(
            SidePair::new(UserId(1), UserId(2)),
            SidePair::new(lineup(100), lineup(200)),
            SidePair::with_value(defense),
            7,
        )
    }

    fn ctx(rosters: &SidePair<Roster>) -> PlayContext<'_> {
        PlayContext {
            rosters,
            infield_defense: 0,
            outfield_defense: 0,
        }
    }

    fn runner(id: i32) -> Runner {
        Runner::new(CardId(id), CardId(100))
    }

    fn first_attempt() -> BaseDecisions {
        let mut d = BaseDecisions::none();
        d.set(Base::First, true);
        d
    }

    #[test]
    fn test_steal_requires_runner() {
        let rosters = rosters();
        let mut s = state_with_arm(0);
        let mut events = Vec::new();
        let err =
            declare_steal(&mut s, first_attempt(), &ctx(&rosters), &mut events).unwrap_err();
        assert!(matches!(err, GameError::MalformedDecision(_)));
    }

    #[test]
    fn test_stealing_home_rejected() {
        let rosters = rosters();
        let mut s = state_with_arm(0);
        s.bases.third = Some(runner(201));
        let mut d = BaseDecisions::none();
        d.set(Base::Third, true);
        let mut events = Vec::new();
        let err = declare_steal(&mut s, d, &ctx(&rosters), &mut events).unwrap_err();
        assert!(matches!(err, GameError::MalformedDecision(_)));
    }

    #[test]
    fn test_blocked_steal_rejected() {
        let rosters = rosters();
        let mut s = state_with_arm(0);
        s.bases.first = Some(runner(201));
        s.bases.second = Some(runner(202));
        let mut events = Vec::new();
        let err =
            declare_steal(&mut s, first_attempt(), &ctx(&rosters), &mut events).unwrap_err();
        assert!(matches!(err, GameError::MalformedDecision(_)));
    }

    #[test]
    fn test_fast_runner_beats_weak_arm() {
        let rosters = rosters();
        // A speed (20) vs arm -6: 20 > -6 + roll for any d20 roll.
        let mut s = state_with_arm(-6);
        s.bases.first = Some(runner(210));
        let mut events = Vec::new();

        declare_steal(&mut s, first_attempt(), &ctx(&rosters), &mut events).unwrap();

        assert_eq!(s.bases.second.map(|r| r.card), Some(CardId(210)));
        assert!(s.bases.first.is_none());
        assert_eq!(s.outs, 0);
        let pending = s.pending_steal.as_ref().unwrap();
        assert_eq!(pending.outcome, StealOutcome::Safe);
        assert_eq!(pending.results.len(), 1);
        assert!(events[0].message.contains("SAFE"));
        // The pitch is dead until re-declared.
        assert!(s.current_at_bat.pitcher_action.is_none());
        assert!(matches!(
            s.current_play,
            Some(CurrentPlay::StealAttempt { .. })
        ));
    }

    #[test]
    fn test_slow_runner_caught_by_strong_arm() {
        let rosters = rosters();
        // B speed (15) vs arm 15: 15 > 15 + roll never holds.
        let mut s = state_with_arm(15);
        s.bases.first = Some(runner(201));
        let mut events = Vec::new();

        declare_steal(&mut s, first_attempt(), &ctx(&rosters), &mut events).unwrap();

        assert!(s.bases.is_empty());
        assert_eq!(s.outs, 1);
        assert_eq!(s.pending_steal.as_ref().unwrap().outcome, StealOutcome::Out);
        assert!(events[0].message.contains("CAUGHT STEALING"));
    }

    #[test]
    fn test_double_steal_resolves_lead_runner_first() {
        let rosters = rosters();
        let mut s = state_with_arm(-6);
        s.bases.first = Some(runner(201));
        s.bases.second = Some(runner(210));
        let mut d = BaseDecisions::none();
        d.set(Base::First, true);
        d.set(Base::Second, true);
        let mut events = Vec::new();

        declare_steal(&mut s, d, &ctx(&rosters), &mut events).unwrap();

        let pending = s.pending_steal.as_ref().unwrap();
        assert_eq!(pending.results.len(), 2);
        assert_eq!(pending.results[0].from, Base::Second);
        assert_eq!(pending.results[1].from, Base::First);
        // Third-base penalty applied to the lead runner only.
        assert_eq!(pending.results[0].target, 20 - 5);
        assert_eq!(pending.results[1].target, 15);
        // Both safe against the weak arm.
        assert_eq!(s.bases.third.map(|r| r.card), Some(CardId(210)));
        assert_eq!(s.bases.second.map(|r| r.card), Some(CardId(201)));
    }

    #[test]
    fn test_caught_stealing_third_out_ends_half() {
        let rosters = rosters();
        let mut s = state_with_arm(15);
        s.outs = 2;
        s.bases.first = Some(runner(201));
        let mut events = Vec::new();

        declare_steal(&mut s, first_attempt(), &ctx(&rosters), &mut events).unwrap();

        assert_eq!(s.outs, 3);
        assert!(s.inning_ended_on_caught_stealing);
        assert!(s.between_half[Side::Away]);
    }

    #[test]
    fn test_third_out_strands_trailing_runner() {
        let rosters = rosters();
        // B speed (15) vs arm 15: every attempt is caught.
        let mut s = state_with_arm(15);
        s.outs = 2;
        s.bases.first = Some(runner(201));
        s.bases.second = Some(runner(202));
        let mut d = BaseDecisions::none();
        d.set(Base::First, true);
        d.set(Base::Second, true);
        let mut events = Vec::new();

        declare_steal(&mut s, d, &ctx(&rosters), &mut events).unwrap();

        // The lead runner's out is the third; the trail runner never goes.
        assert_eq!(s.outs, 3);
        let pending = s.pending_steal.as_ref().unwrap();
        assert_eq!(pending.results.len(), 1);
        assert_eq!(pending.results[0].from, Base::Second);
        assert_eq!(s.bases.first.map(|r| r.card), Some(CardId(201)));
        assert!(s.inning_ended_on_caught_stealing);
        assert!(s.between_half[Side::Away]);
    }

    #[test]
    fn test_acknowledge_moves_pending_to_last() {
        let rosters = rosters();
        let mut s = state_with_arm(-6);
        s.bases.first = Some(runner(210));
        let mut events = Vec::new();
        declare_steal(&mut s, first_attempt(), &ctx(&rosters), &mut events).unwrap();

        acknowledge_steal(&mut s).unwrap();
        assert!(s.pending_steal.is_none());
        assert!(s.last_steal.is_some());
        assert!(s.current_play.is_none());

        // Nothing left to acknowledge.
        assert!(matches!(
            acknowledge_steal(&mut s),
            Err(GameError::OutOfTurn)
        ));
    }
}
