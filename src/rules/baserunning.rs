//! Outcome application and contested advancement.
//!
//! `apply_outcome` turns a resolved plate appearance into base movement,
//! outs, and runs. Automatic advances and holds (clear speed mismatches)
//! resolve immediately; anything contested pauses the game behind a
//! `CurrentPlay` until the batting side answers.
//!
//! ## Speed contests
//!
//! Advances on hits are safe when effective speed meets the defense roll
//! (`>=`); tag-ups must beat it (`>`). Effective speed gains 5 going
//! home, 5 more with two outs on a hit, and loses 5 tagging to second.
//! An advance is automatic (no throw) when effective speed reaches the
//! outfield defense plus 20.

use crate::cards::{Outcome, PlayerCard, Roster};
use crate::core::{CardId, GameError, Side, SidePair};
use crate::rules::inning;
use crate::state::{
    base_ordinal, AdvanceKind, AdvanceSlot, Base, BaseDecisions, CurrentPlay, DoublePlayDetails,
    DoublePlayOutcome, EventDraft, EventKind, GameState, Runner, ThrowResult, ThrowVerdict,
};
use smallvec::SmallVec;

/// Margin over outfield defense at which an advance needs no throw.
const AUTO_ADVANCE_MARGIN: i32 = 20;

/// Card data and defense totals needed to resolve a play.
pub struct PlayContext<'a> {
    pub rosters: &'a SidePair<Roster>,
    pub infield_defense: i32,
    pub outfield_defense: i32,
}

impl PlayContext<'_> {
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&PlayerCard> {
        self.rosters[Side::Home]
            .get(id)
            .or_else(|| self.rosters[Side::Away].get(id))
    }

    #[must_use]
    pub fn name(&self, id: CardId) -> &str {
        self.card(id).map_or("Unknown Player", |c| c.name.as_str())
    }

    /// Running speed of a card, or `CorruptState` if the id is in neither
    /// roster.
    pub fn speed(&self, id: CardId) -> Result<i32, GameError> {
        self.card(id)
            .map(PlayerCard::speed_value)
            .ok_or_else(|| GameError::CorruptState(format!("runner {id} not in either roster")))
    }
}

fn score_run(
    state: &mut GameState,
    runner: Runner,
    ctx: &PlayContext<'_>,
    parts: &mut Vec<String>,
) {
    parts.push(format!("{} scores!", ctx.name(runner.card)));
    state.add_run(runner.pitcher_of_record);
}

/// Annotate a combined play message with outs and score changes, the way
/// the log reads them back.
fn finish_message(
    state: &GameState,
    mut message: String,
    original_outs: u8,
    original_total: u32,
) -> String {
    if state.outs > original_outs {
        message.push_str(&format!(" Outs: {}", state.outs));
    }
    if state.home_score + state.away_score > original_total {
        let score = if state.top_of_inning {
            format!("{}-{}", state.away_score, state.home_score)
        } else {
            format!("{}-{}", state.home_score, state.away_score)
        };
        message.push_str(&format!(" (Score: {score})"));
    }
    message
}

/// Apply a resolved plate-appearance outcome to the state.
///
/// Pushes one combined narration draft (plus any terminal events) and may
/// leave a `CurrentPlay` pending when a contested decision is owed.
pub fn apply_outcome(
    state: &mut GameState,
    outcome: Outcome,
    batter: CardId,
    pitcher: CardId,
    ctx: &PlayContext<'_>,
    events: &mut Vec<EventDraft>,
) -> Result<(), GameError> {
    let original_outs = state.outs;
    let original_total = state.home_score + state.away_score;
    let batter_runner = Runner::new(batter, pitcher);
    let batter_name = ctx.name(batter).to_string();
    let mut parts: Vec<String> = Vec::new();

    match outcome {
        Outcome::Bunt => {
            apply_bunt(state, batter_runner, &batter_name, &mut parts);
        }
        Outcome::GroundBall => {
            apply_ground_ball(state, batter_runner, &batter_name, ctx, &mut parts)?;
        }
        Outcome::FlyBall => {
            apply_fly_ball(state, &batter_name, ctx, &mut parts)?;
        }
        Outcome::Single | Outcome::SinglePlus => {
            apply_single(state, outcome, batter_runner, &batter_name, ctx, &mut parts)?;
        }
        Outcome::Double => {
            apply_double(state, batter_runner, &batter_name, ctx, &mut parts)?;
        }
        Outcome::Triple => {
            parts.push(format!("{batter_name} hits a TRIPLE!"));
            for base in [Base::Third, Base::Second, Base::First] {
                if let Some(runner) = state.bases.take(base) {
                    score_run(state, runner, ctx, &mut parts);
                }
            }
            state.bases.third = Some(batter_runner);
        }
        Outcome::HomeRun => {
            parts.push(format!("{batter_name} hits a HOME RUN!"));
            for base in [Base::Third, Base::Second, Base::First] {
                if let Some(runner) = state.bases.take(base) {
                    score_run(state, runner, ctx, &mut parts);
                }
            }
            score_run(state, batter_runner, ctx, &mut parts);
        }
        Outcome::Walk | Outcome::IntentionalWalk => {
            parts.push(if outcome == Outcome::Walk {
                format!("{batter_name} walks.")
            } else {
                format!("{batter_name} is intentionally walked.")
            });
            apply_walk_forces(state, batter_runner, ctx, &mut parts);
        }
        Outcome::Strikeout => {
            parts.push(format!("{batter_name} strikes out."));
            state.outs += 1;
        }
        Outcome::PopUp => {
            parts.push(format!("{batter_name} pops out."));
            state.outs += 1;
        }
    }

    if !parts.is_empty() {
        let kind = match outcome {
            Outcome::Walk | Outcome::IntentionalWalk => EventKind::Walk,
            _ => EventKind::Play,
        };
        let message = finish_message(state, parts.join(" "), original_outs, original_total);
        events.push(EventDraft::new(kind, message));
    }

    inning::check_walk_off(state, events);
    inning::note_third_out(state, events);
    Ok(())
}

/// Walks push only forced runners.
fn apply_walk_forces(
    state: &mut GameState,
    batter_runner: Runner,
    ctx: &PlayContext<'_>,
    parts: &mut Vec<String>,
) {
    let bases = state.bases;
    if bases.first.is_some() && bases.second.is_some() {
        if let Some(third) = bases.third {
            score_run(state, third, ctx, parts);
            state.bases.third = None;
        }
        state.bases.third = bases.second;
    }
    if bases.first.is_some() {
        state.bases.second = bases.first;
    }
    state.bases.first = Some(batter_runner);
}

fn apply_bunt(
    state: &mut GameState,
    batter_runner: Runner,
    batter_name: &str,
    parts: &mut Vec<String>,
) {
    let bases = state.bases;
    match (bases.first, bases.second, bases.third) {
        // Bases loaded: force at home, everyone else moves up.
        (Some(first), Some(second), Some(_)) => {
            parts.push(format!(
                "{batter_name} bunts into a fielder's choice, the runner from third is out at home."
            ));
            state.outs += 1;
            if state.outs < 3 {
                state.bases.third = Some(second);
                state.bases.second = Some(first);
                state.bases.first = Some(batter_runner);
            }
        }
        // Runner on third with second occupied: everyone holds.
        (None, Some(_), Some(_)) => {
            parts.push(format!("{batter_name} lays down a bunt, but the runners hold."));
            state.outs += 1;
        }
        // Runner on third with first occupied: first moves up, third holds.
        (Some(first), None, Some(_)) => {
            parts.push(format!(
                "{batter_name} lays down a sacrifice bunt. The runner on first advances."
            ));
            state.outs += 1;
            if state.outs < 3 {
                state.bases.second = Some(first);
                state.bases.first = None;
            }
        }
        // Runner on third only: holds.
        (None, None, Some(_)) => {
            parts.push(format!(
                "{batter_name} lays down a bunt, but the runner on third holds."
            ));
            state.outs += 1;
        }
        // Standard sacrifice.
        _ => {
            parts.push(format!("{batter_name} lays down a sacrifice bunt."));
            state.outs += 1;
            if state.outs < 3 {
                if let Some(second) = bases.second {
                    state.bases.third = Some(second);
                    state.bases.second = None;
                }
                if let Some(first) = bases.first {
                    state.bases.second = Some(first);
                    state.bases.first = None;
                }
            }
        }
    }
}

fn apply_ground_ball(
    state: &mut GameState,
    batter_runner: Runner,
    batter_name: &str,
    ctx: &PlayContext<'_>,
    parts: &mut Vec<String>,
) -> Result<(), GameError> {
    let infield_in = state.current_at_bat.infield_in;

    if infield_in && state.outs < 2 && state.bases.third.is_some() {
        // The batting side chooses whether to send the runner home.
        if let Some(runner_on_third) = state.bases.third {
            parts.push(format!(
                "{batter_name} hits a ground ball with the infield in..."
            ));
            state.current_play = Some(CurrentPlay::InfieldInChoice {
                runner_on_third,
                batter: batter_runner,
                runner_on_second: state.bases.second,
                runner_on_first: state.bases.first,
            });
        }
        return Ok(());
    }

    if state.outs <= 1 && state.bases.first.is_some() {
        // Force at second; the relay to first decides the double play.
        state.bases.first = None;
        state.outs += 1;

        let batter_speed = ctx.speed(batter_runner.card)?;
        let roll = state.rng.d20();
        let turned = ctx.infield_defense + i32::from(roll) > batter_speed;

        if turned {
            state.outs += 1;
            parts.insert(0, format!("{batter_name} grounds into a double play."));
        } else {
            state.bases.first = Some(batter_runner);
            parts.insert(0, format!("{batter_name} hits into a fielder's choice."));
        }
        state.double_play = Some(DoublePlayDetails {
            outcome: if turned {
                DoublePlayOutcome::DoublePlay
            } else {
                DoublePlayOutcome::FieldersChoice
            },
            roll,
            defense: ctx.infield_defense,
            batter_speed,
        });

        if state.outs < 3 {
            if let Some(third) = state.bases.take(Base::Third) {
                score_run(state, third, ctx, parts);
            }
            if let Some(second) = state.bases.take(Base::Second) {
                state.bases.third = Some(second);
            }
        }
        return Ok(());
    }

    parts.push(format!("{batter_name} grounds out."));
    state.outs += 1;
    if state.outs < 3 && !infield_in {
        if let Some(third) = state.bases.take(Base::Third) {
            score_run(state, third, ctx, parts);
        }
        if let Some(second) = state.bases.take(Base::Second) {
            state.bases.third = Some(second);
        }
    }
    Ok(())
}

fn apply_fly_ball(
    state: &mut GameState,
    batter_name: &str,
    ctx: &PlayContext<'_>,
    parts: &mut Vec<String>,
) -> Result<(), GameError> {
    state.outs += 1;
    let initial_event = format!("{batter_name} flies out.");

    if state.outs >= 3 || state.bases.is_empty() {
        parts.push(initial_event);
        return Ok(());
    }

    let slots: SmallVec<[AdvanceSlot; 3]> = [Base::Third, Base::Second, Base::First]
        .into_iter()
        .filter_map(|from| {
            state
                .bases
                .get(from)
                .map(|runner| AdvanceSlot { runner, from })
        })
        .collect();

    // All-automatic check: every runner either walks home free or is too
    // slow to consider going.
    let mut auto = Vec::with_capacity(slots.len());
    let mut all_automatic = true;
    for slot in &slots {
        let to = AdvanceKind::TagUp.target(slot.from);
        let speed = ctx.speed(slot.runner.card)?;
        let mut effective = speed;
        if to == 4 {
            effective += 5;
        }
        if to == 2 {
            effective -= 5;
        }

        let auto_advance = effective >= ctx.outfield_defense + AUTO_ADVANCE_MARGIN;
        let auto_hold = (speed == 10 && (to == 2 || to == 3)) || (speed == 15 && to == 2);

        if auto_advance {
            auto.push((*slot, true));
        } else if auto_hold {
            auto.push((*slot, false));
        } else {
            all_automatic = false;
            break;
        }
    }

    if all_automatic {
        parts.insert(0, initial_event);
        for (slot, advance) in auto {
            let name = ctx.name(slot.runner.card).to_string();
            if advance {
                state.bases.set(slot.from, None);
                if let Some(to) = slot.from.next() {
                    state.bases.set(to, Some(slot.runner));
                    parts.push(format!("{name} tags up and advances without a throw."));
                } else {
                    score_run(state, slot.runner, ctx, parts);
                    parts.push(format!("{name} tags up and scores without a throw."));
                }
            } else {
                parts.push(format!("{name} holds."));
            }
        }
    } else {
        state.current_play = Some(CurrentPlay::Advance {
            kind: AdvanceKind::TagUp,
            slots,
            initial_event,
        });
    }
    Ok(())
}

fn apply_single(
    state: &mut GameState,
    outcome: Outcome,
    batter_runner: Runner,
    batter_name: &str,
    ctx: &PlayContext<'_>,
    parts: &mut Vec<String>,
) -> Result<(), GameError> {
    let initial_event = format!("{batter_name} hits a SINGLE!");
    let runner_from_third = state.bases.third;
    let runner_from_second = state.bases.second;
    let runner_from_first = state.bases.first;

    if let Some(third) = runner_from_third {
        score_run(state, third, ctx, parts);
    }

    let slots: SmallVec<[AdvanceSlot; 3]> = [Base::Second, Base::First]
        .into_iter()
        .filter_map(|from| {
            state
                .bases
                .get(from)
                .map(|runner| AdvanceSlot { runner, from })
        })
        .collect();

    let mut auto = Vec::with_capacity(slots.len());
    let mut all_automatic = !slots.is_empty();
    for slot in &slots {
        let to = AdvanceKind::OnSingle.target(slot.from);
        let speed = ctx.speed(slot.runner.card)?;
        let mut effective = speed;
        if to == 4 {
            effective += 5;
        }
        if state.outs == 2 {
            effective += 5;
        }

        let auto_advance = effective >= ctx.outfield_defense + AUTO_ADVANCE_MARGIN;
        let auto_hold = speed == 10 && to == 3;

        if auto_advance {
            auto.push((*slot, true));
        } else if auto_hold {
            auto.push((*slot, false));
        } else {
            all_automatic = false;
            break;
        }
    }

    state.bases = crate::state::Bases::empty();

    if all_automatic {
        parts.insert(0, initial_event);
        let mut third_occupied = false;

        if let Some(second) = runner_from_second {
            let name = ctx.name(second.card).to_string();
            let sent = auto
                .iter()
                .find(|(s, _)| s.from == Base::Second)
                .is_some_and(|&(_, advance)| advance);
            if sent {
                score_run(state, second, ctx, parts);
                parts.push(format!("{name} scores from second without a throw!"));
            } else {
                state.bases.third = Some(second);
                parts.push(format!("{name} holds at third."));
                third_occupied = true;
            }
        }

        if let Some(first) = runner_from_first {
            let name = ctx.name(first.card).to_string();
            let sent = auto
                .iter()
                .find(|(s, _)| s.from == Base::First)
                .is_some_and(|&(_, advance)| advance);
            if sent && !third_occupied {
                state.bases.third = Some(first);
                parts.push(format!("{name} takes third without a throw!"));
            } else {
                state.bases.second = Some(first);
                parts.push(format!("{name} holds at second."));
            }
        }

        state.bases.first = Some(batter_runner);
    } else {
        // Standard advancement, then ask.
        if let Some(second) = runner_from_second {
            state.bases.third = Some(second);
        }
        if let Some(first) = runner_from_first {
            state.bases.second = Some(first);
        }
        state.bases.first = Some(batter_runner);
        if slots.is_empty() {
            parts.insert(0, initial_event);
        } else {
            state.current_play = Some(CurrentPlay::Advance {
                kind: AdvanceKind::OnSingle,
                slots,
                initial_event,
            });
        }
    }

    // On a 1B+ the batter takes second behind the throw if it is open.
    if outcome == Outcome::SinglePlus && state.bases.second.is_none() {
        state.bases.second = state.bases.first.take();
        parts.push(format!("{batter_name} takes second on the throw!"));
    }
    Ok(())
}

fn apply_double(
    state: &mut GameState,
    batter_runner: Runner,
    batter_name: &str,
    ctx: &PlayContext<'_>,
    parts: &mut Vec<String>,
) -> Result<(), GameError> {
    let initial_event = format!("{batter_name} hits a DOUBLE!");

    if let Some(third) = state.bases.take(Base::Third) {
        score_run(state, third, ctx, parts);
    }
    if let Some(second) = state.bases.take(Base::Second) {
        score_run(state, second, ctx, parts);
    }

    let runner_from_first = state.bases.take(Base::First);
    match runner_from_first {
        Some(first) => {
            let speed = ctx.speed(first.card)?;
            let mut effective = speed + 5; // going home
            if state.outs == 2 {
                effective += 5;
            }
            if effective >= ctx.outfield_defense + AUTO_ADVANCE_MARGIN {
                parts.insert(0, initial_event);
                score_run(state, first, ctx, parts);
                parts.push(format!(
                    "{} scores from first without a throw!",
                    ctx.name(first.card)
                ));
            } else {
                state.bases.third = Some(first);
                state.current_play = Some(CurrentPlay::Advance {
                    kind: AdvanceKind::OnDouble,
                    slots: smallvec::smallvec![AdvanceSlot {
                        runner: first,
                        from: Base::First,
                    }],
                    initial_event,
                });
            }
        }
        None => parts.insert(0, initial_event),
    }

    state.bases.second = Some(batter_runner);
    Ok(())
}

/// Resolve the batting side's answers to a pending `CurrentPlay::Advance`.
///
/// Every sent runner gets an independent throw, lead runner first; a
/// runner sent into a base a lead runner held is simply held too.
pub fn resolve_advance_decisions(
    state: &mut GameState,
    decisions: BaseDecisions,
    ctx: &PlayContext<'_>,
    events: &mut Vec<EventDraft>,
) -> Result<(), GameError> {
    let Some(CurrentPlay::Advance {
        kind,
        slots,
        initial_event,
    }) = state.current_play.clone()
    else {
        return Err(GameError::MalformedDecision(
            "no advance decision is pending".into(),
        ));
    };

    for base in [Base::Third, Base::Second, Base::First] {
        if decisions.get(base) && !slots.iter().any(|s| s.from == base) {
            return Err(GameError::MalformedDecision(format!(
                "no runner owes a decision at {base}"
            )));
        }
    }

    let original_outs = state.outs;
    let original_total = state.home_score + state.away_score;
    let mut parts: Vec<String> = Vec::new();

    let mut ordered: Vec<AdvanceSlot> = slots.to_vec();
    ordered.sort_by_key(|s| std::cmp::Reverse(s.from.number()));

    for slot in ordered {
        // The third out ends the half; trailing runners never go.
        if state.outs >= 3 {
            break;
        }
        if !decisions.get(slot.from) {
            continue; // stays put
        }
        let holding = kind.holding_base(slot.from);
        let target = kind.target(slot.from);
        let name = ctx.name(slot.runner.card).to_string();

        // A held lead runner blocks the base ahead.
        if let Some(target_base) = Base::from_number(target) {
            if state.bases.get(target_base).is_some() {
                parts.push(format!("{name} holds at {holding}."));
                continue;
            }
        }

        let speed = ctx.speed(slot.runner.card)?;
        let roll = state.rng.d20();
        let effective = match kind {
            AdvanceKind::OnSingle | AdvanceKind::OnDouble => {
                speed
                    + if target == 4 { 5 } else { 0 }
                    + if state.outs == 2 { 5 } else { 0 }
            }
            AdvanceKind::TagUp => {
                speed + if target == 4 { 5 } else { 0 } - if target == 2 { 5 } else { 0 }
            }
        };
        let defense_total = ctx.outfield_defense + i32::from(roll);
        let safe = match kind {
            AdvanceKind::TagUp => effective > defense_total,
            _ => effective >= defense_total,
        };

        state.last_throw = Some(ThrowResult {
            roll,
            defense: ctx.outfield_defense,
            target: effective,
            verdict: if safe {
                ThrowVerdict::Safe
            } else {
                ThrowVerdict::Out
            },
            runner: slot.runner.card,
            to_base: target,
        });

        state.bases.set(holding, None);
        if safe {
            match Base::from_number(target) {
                Some(target_base) => {
                    state.bases.set(target_base, Some(slot.runner));
                    parts.push(format!("{name} is SAFE at {}!", base_ordinal(target)));
                }
                None => {
                    state.add_run(slot.runner.pitcher_of_record);
                    parts.push(format!("{name} is SAFE at home!"));
                }
            }
        } else {
            state.outs += 1;
            parts.push(format!("{name} is THROWN OUT at {}!", base_ordinal(target)));
        }
    }

    // The 1B+ batter still trails the throw to second if it is open.
    if state.outs < 3
        && state.current_at_bat.swing.map(|s| s.outcome) == Some(Outcome::SinglePlus)
        && state.bases.second.is_none()
    {
        if let Some(batter) = state.bases.first.take() {
            state.bases.second = Some(batter);
            events.push(EventDraft::new(
                EventKind::Play,
                format!("{} steals second without a throw!", ctx.name(batter.card)),
            ));
        }
    }

    state.current_play = None;
    state.ready_for_next[Side::Home] = false;
    state.ready_for_next[Side::Away] = false;

    let message = if parts.is_empty() {
        initial_event
    } else {
        format!("{initial_event} {}", parts.join(" "))
    };
    let message = finish_message(state, message, original_outs, original_total);
    events.push(EventDraft::new(EventKind::Baserunning, message));

    inning::check_walk_off(state, events);
    inning::note_third_out(state, events);
    Ok(())
}

/// Resolve the batting side's answer to an infield-in ground ball.
pub fn resolve_infield_in(
    state: &mut GameState,
    send_runner: bool,
    ctx: &PlayContext<'_>,
    events: &mut Vec<EventDraft>,
) -> Result<(), GameError> {
    let Some(CurrentPlay::InfieldInChoice {
        runner_on_third,
        batter,
        runner_on_second,
        runner_on_first,
    }) = state.current_play.clone()
    else {
        return Err(GameError::MalformedDecision(
            "no infield-in play is pending".into(),
        ));
    };

    let original_outs = state.outs;
    let original_total = state.home_score + state.away_score;
    let mut parts: Vec<String> = Vec::new();
    let runner_name = ctx.name(runner_on_third.card).to_string();

    if send_runner {
        let speed = ctx.speed(runner_on_third.card)?;
        let roll = state.rng.d20();
        let defense_total = ctx.infield_defense + i32::from(roll);
        let safe = speed >= defense_total;

        state.last_throw = Some(ThrowResult {
            roll,
            defense: ctx.infield_defense,
            target: speed,
            verdict: if safe {
                ThrowVerdict::Safe
            } else {
                ThrowVerdict::Out
            },
            runner: runner_on_third.card,
            to_base: 4,
        });

        // Everyone moves up behind the play at the plate.
        state.bases.third = runner_on_second;
        state.bases.second = runner_on_first;
        state.bases.first = Some(batter);

        if safe {
            state.add_run(runner_on_third.pitcher_of_record);
            parts.push(format!(
                "{runner_name} is SENT HOME... SAFE! The batter reaches on a fielder's choice."
            ));
        } else {
            state.outs += 1;
            parts.push(format!(
                "{runner_name} is THROWN OUT at the plate! The batter reaches on a fielder's choice."
            ));
        }
    } else {
        parts.push(format!(
            "{} hits a ground ball, the runner on third holds.",
            ctx.name(batter.card)
        ));
        state.outs += 1;
        if state.outs < 3 && runner_on_first.is_some() && state.bases.second.is_none() {
            state.bases.second = state.bases.first.take();
        }
    }

    state.current_play = None;
    let message = finish_message(state, parts.join(" "), original_outs, original_total);
    events.push(EventDraft::new(EventKind::InfieldIn, message));

    inning::check_walk_off(state, events);
    inning::note_third_out(state, events);
    Ok(())
}
