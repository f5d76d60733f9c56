//! In-game lineup changes.
//!
//! A substitution always retires the outgoing player for good (no
//! re-entry) and patches every live reference to them: the batting-order
//! slot, the pitcher slot, the bases, and the at-bat in progress.
//! Defensive ratings are re-derived and both the acting side's and the
//! fielding side's lineups are re-validated after every change; an
//! outstanding violation blocks the next pitch until fixed.

use crate::cards::{Position, Roster};
use crate::core::{CardId, GameError, Side, SidePair, UserId};
use crate::lineup::{derive_ratings, is_eligible, validate_lineup};
use crate::rules::inning_ordinal;
use crate::state::{EventDraft, EventKind, GameState};

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Home => "Home",
        Side::Away => "Away",
    }
}

/// Re-derive one side's defense and re-validate the lineups the change
/// can have broken: the acting side's and the fielding side's.
///
/// Returns true when a previously owed relief pitcher has just been
/// seated, so the caller can announce them.
fn refresh_after_change(rosters: &SidePair<Roster>, state: &mut GameState, side: Side) -> bool {
    state.defense[side] = derive_ratings(&state.lineups[side], &rosters[side]);

    let was_awaiting = state.awaiting_lineup_change;
    let fielding = state.fielding_side();
    let mut errors = validate_lineup(&state.lineups[side], &rosters[side]);
    if side != fielding {
        errors.extend(validate_lineup(&state.lineups[fielding], &rosters[fielding]));
    }
    state.awaiting_lineup_change = !errors.is_empty();
    state.lineup_validation_errors = errors;

    if was_awaiting
        && !state.awaiting_lineup_change
        && state.current_at_bat.pitcher.is_none()
    {
        state.current_at_bat.pitcher = state.lineups[fielding].pitcher;
        return true;
    }
    false
}

/// Replace `player_out` with `player_in` in the acting user's lineup.
pub fn substitute(
    rosters: &SidePair<Roster>,
    state: &mut GameState,
    user: UserId,
    player_in: CardId,
    player_out: CardId,
    position: Option<Position>,
    events: &mut Vec<EventDraft>,
) -> Result<(), GameError> {
    let side = state.side_of(user).ok_or(GameError::OutOfTurn)?;
    let roster = &rosters[side];

    if !state.lineups[side].contains(player_out) {
        return Err(GameError::UnknownPlayer(player_out));
    }
    let card_in = roster
        .get(player_in)
        .ok_or(GameError::UnknownPlayer(player_in))?;
    if state.teams[side].used_players.contains(&player_in)
        || state.lineups[side].contains(player_in)
    {
        return Err(GameError::IneligibleSubstitution(player_in));
    }
    if let Some(pos) = position {
        if !is_eligible(card_in, pos) {
            return Err(GameError::IneligibleSubstitution(player_in));
        }
    }

    let incoming_is_pitcher = card_in.is_pitcher();
    let batting = state.batting_side();
    let on_base = [state.bases.first, state.bases.second, state.bases.third]
        .iter()
        .flatten()
        .any(|runner| runner.card == player_out);
    let is_pinch_runner = side == batting && on_base;
    let is_pinch_hitter = side == batting && state.current_at_bat.batter == player_out;
    let held_pitcher_slot = state.lineups[side].pitcher == Some(player_out);
    let in_batting_order = state.lineups[side].position_of(player_out).is_some();

    // A mound-only slot (DH lineup) takes nothing but a pitcher card.
    // A pitcher who bats can still be pinch hit for, leaving relief owed.
    if held_pitcher_slot && !in_batting_order && !incoming_is_pitcher {
        return Err(GameError::IneligibleSubstitution(player_in));
    }

    state.teams[side].used_players.push(player_out);

    let lineup = &mut state.lineups[side];
    lineup.replace_card(player_out, player_in);
    if let Some(pos) = position {
        lineup.assign_position(player_in, pos);
    }
    if held_pitcher_slot {
        // A non-pitcher taking the slot leaves the mound empty; a relief
        // pitcher is owed before this side fields again.
        lineup.pitcher = incoming_is_pitcher.then_some(player_in);
    } else if lineup.pitcher.is_none() && incoming_is_pitcher {
        lineup.pitcher = Some(player_in);
    }

    if is_pinch_hitter {
        state.current_at_bat.batter = player_in;
    }
    if is_pinch_runner {
        state.bases.replace_runner(player_out, player_in);
        state
            .current_at_bat
            .bases_before
            .replace_runner(player_out, player_in);
    }
    if held_pitcher_slot && state.current_at_bat.pitcher == Some(player_out) {
        state.current_at_bat.pitcher = state.lineups[side].pitcher;
    }

    let name_in = roster.name(player_in).to_string();
    let name_out = roster.name(player_out).to_string();
    let label = side_label(side);
    let message = if is_pinch_hitter {
        format!("{label} brings in {name_in} to pinch hit for {name_out}.")
    } else if is_pinch_runner {
        format!("{label} brings in {name_in} to pinch run for {name_out}.")
    } else if held_pitcher_slot && incoming_is_pitcher {
        format!("{label} brings in {name_in} to relieve {name_out}.")
    } else {
        let pos = state.lineups[side]
            .position_of(player_in)
            .map_or("P", |p| p.abbrev());
        format!("{label} substitutes {name_in} for {name_out}. {name_in} will now play {pos}.")
    };
    events.push(EventDraft::new(EventKind::Substitution, message));

    if refresh_after_change(rosters, state, side) {
        let fielding = state.fielding_side();
        if let Some(pitcher_id) = state.lineups[fielding].pitcher {
            events.push(EventDraft::new(
                EventKind::System,
                format!(
                    "{} {}. {} now pitching.",
                    if state.top_of_inning { "Top" } else { "Bottom" },
                    inning_ordinal(state.inning),
                    rosters[fielding].name(pitcher_id)
                ),
            ));
        }
    }
    Ok(())
}

/// Swap the fielding assignments of two players already in the order.
pub fn swap_positions(
    rosters: &SidePair<Roster>,
    state: &mut GameState,
    user: UserId,
    first: CardId,
    second: CardId,
    events: &mut Vec<EventDraft>,
) -> Result<(), GameError> {
    let side = state.side_of(user).ok_or(GameError::OutOfTurn)?;
    let roster = &rosters[side];

    let pos_first = state.lineups[side]
        .position_of(first)
        .ok_or(GameError::UnknownPlayer(first))?;
    let pos_second = state.lineups[side]
        .position_of(second)
        .ok_or(GameError::UnknownPlayer(second))?;

    let card_first = roster.get(first).ok_or(GameError::UnknownPlayer(first))?;
    let card_second = roster.get(second).ok_or(GameError::UnknownPlayer(second))?;
    if !is_eligible(card_first, pos_second) {
        return Err(GameError::IneligibleSubstitution(first));
    }
    if !is_eligible(card_second, pos_first) {
        return Err(GameError::IneligibleSubstitution(second));
    }

    state.lineups[side].swap_positions(first, second);
    refresh_after_change(rosters, state, side);

    events.push(EventDraft::new(
        EventKind::Substitution,
        format!(
            "{} moves {} to {} and {} to {}.",
            side_label(side),
            roster.name(first),
            pos_second.abbrev(),
            roster.name(second),
            pos_first.abbrev()
        ),
    ));
    Ok(())
}
