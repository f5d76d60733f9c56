//! Lineup eligibility and validation.

use crate::cards::{PlayerCard, Position, Roster};
use crate::core::LineupError;
use crate::lineup::{Lineup, LINEUP_SIZE};

/// Whether a card may be assigned to a position.
///
/// A printed rating at the position always qualifies. Beyond that:
/// any position player can stand at first base, any pitcher card can
/// pitch, corner outfield spots accept the shared LF/RF rating, and the
/// DH slot accepts anyone. Replacement cards are eligible everywhere.
#[must_use]
pub fn is_eligible(card: &PlayerCard, position: Position) -> bool {
    if card.card_id.is_replacement() {
        return true;
    }
    if position == Position::DesignatedHitter {
        return true;
    }
    if card.fielding.covers(position) {
        return true;
    }
    match position {
        Position::FirstBase => !card.is_pitcher(),
        Position::Pitcher => card.is_pitcher(),
        _ => false,
    }
}

/// Validate a lineup against its roster.
///
/// Returns every violation found, keyed to the offending card where one
/// exists. An empty result means the lineup may take the field.
#[must_use]
pub fn validate_lineup(lineup: &Lineup, roster: &Roster) -> Vec<LineupError> {
    let mut errors = Vec::new();

    if lineup.batting_order.len() != LINEUP_SIZE {
        errors.push(LineupError::structural(format!(
            "batting order has {} slots, expected {}",
            lineup.batting_order.len(),
            LINEUP_SIZE
        )));
    }

    for slot in &lineup.batting_order {
        match roster.get(slot.card) {
            None => errors.push(LineupError::for_card(slot.card, "not in roster")),
            Some(card) => {
                if !is_eligible(card, slot.position) {
                    errors.push(LineupError::for_card(
                        slot.card,
                        format!("{} is not eligible at {}", card.name, slot.position),
                    ));
                }
            }
        }
    }

    match lineup.pitcher {
        None => errors.push(LineupError::structural("no pitcher on the mound")),
        Some(id) => match roster.get(id) {
            None => errors.push(LineupError::for_card(id, "pitcher not in roster")),
            Some(card) if !card.is_pitcher() => errors.push(LineupError::for_card(
                id,
                format!("{} is not a pitcher card", card.name),
            )),
            Some(_) => {}
        },
    }

    errors
}
