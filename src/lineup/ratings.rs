//! Defensive ratings derived from the fielding lineup.
//!
//! Recomputed after every lineup mutation. The three totals feed the
//! contested-advance, steal, and ground-ball resolutions.

use crate::cards::{Position, Roster};
use crate::lineup::Lineup;
use serde::{Deserialize, Serialize};

/// Team defense totals for the side currently in the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensiveRatings {
    /// Catcher's arm, contested by would-be base stealers.
    pub catcher_arm: i32,
    /// Sum over 1B/2B/SS/3B, used for ground-ball plays.
    pub infield: i32,
    /// Sum over LF/CF/RF, used for throws on advances and tag-ups.
    pub outfield: i32,
}

/// Derive the defense totals for a lineup.
///
/// A slot without a usable rating contributes 0, except first base: a
/// position player without a 1B rating costs 1, and a card with no
/// defensive home at all costs 2.
#[must_use]
pub fn derive_ratings(lineup: &Lineup, roster: &Roster) -> DefensiveRatings {
    let mut totals = DefensiveRatings::default();

    for slot in &lineup.batting_order {
        let Some(card) = roster.get(slot.card) else {
            continue;
        };
        match slot.position {
            Position::Catcher => {
                totals.catcher_arm = card.fielding.rating_at(Position::Catcher).unwrap_or(0);
            }
            Position::FirstBase => {
                totals.infield += card.fielding.rating_at(Position::FirstBase).unwrap_or_else(
                    || {
                        if card.fielding.is_dh_only() {
                            -2
                        } else {
                            -1
                        }
                    },
                );
            }
            p if p.is_infield() => {
                totals.infield += card.fielding.rating_at(p).unwrap_or(0);
            }
            p if p.is_outfield() => {
                totals.outfield += card.fielding.rating_at(p).unwrap_or(0);
            }
            _ => {}
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Chart, FieldingRatings, Outcome, PlayerCard, Speed};
    use crate::core::CardId;
    use crate::lineup::LineupSlot;

    fn card(id: i32, fielding: FieldingRatings) -> PlayerCard {
        PlayerCard {
            card_id: CardId(id),
            name: format!("Player {id}"),
            control: None,
            on_base: 8,
            speed: Speed::B,
            ip: None,
            fielding,
            chart: Chart::from_ranges(&[(1, 20, Outcome::Single)]),
        }
    }

    #[test]
    fn test_totals_by_group() {
        let roster = Roster::new(vec![
            card(1, FieldingRatings::from_pairs(&[(Position::Catcher, 6)])),
            card(2, FieldingRatings::from_pairs(&[(Position::FirstBase, 1)])),
            card(3, FieldingRatings::from_pairs(&[(Position::SecondBase, 3)])),
            card(4, FieldingRatings::from_pairs(&[(Position::Shortstop, 5)])),
            card(5, FieldingRatings::from_pairs(&[(Position::ThirdBase, 2)])),
            card(6, FieldingRatings::from_pairs(&[(Position::CenterField, 3)])),
            card(7, FieldingRatings::none().with_left_right(2)),
            card(8, FieldingRatings::none().with_left_right(1)),
        ]);
        let order = vec![
            LineupSlot { card: CardId(1), position: Position::Catcher },
            LineupSlot { card: CardId(2), position: Position::FirstBase },
            LineupSlot { card: CardId(3), position: Position::SecondBase },
            LineupSlot { card: CardId(4), position: Position::Shortstop },
            LineupSlot { card: CardId(5), position: Position::ThirdBase },
            LineupSlot { card: CardId(6), position: Position::CenterField },
            LineupSlot { card: CardId(7), position: Position::LeftField },
            LineupSlot { card: CardId(8), position: Position::RightField },
        ];
        let lineup = Lineup::new(order, Some(CardId(1)));

        let totals = derive_ratings(&lineup, &roster);
        assert_eq!(totals.catcher_arm, 6);
        assert_eq!(totals.infield, 1 + 3 + 5 + 2);
        assert_eq!(totals.outfield, 3 + 2 + 1);
    }

    #[test]
    fn test_first_base_penalties() {
        let roster = Roster::new(vec![
            card(1, FieldingRatings::from_pairs(&[(Position::LeftField, 2)])),
            card(2, FieldingRatings::none()),
        ]);

        // Outfielder filling in at first: -1.
        let lineup = Lineup::new(
            vec![LineupSlot { card: CardId(1), position: Position::FirstBase }],
            Some(CardId(1)),
        );
        assert_eq!(derive_ratings(&lineup, &roster).infield, -1);

        // Pure DH at first: -2.
        let lineup = Lineup::new(
            vec![LineupSlot { card: CardId(2), position: Position::FirstBase }],
            Some(CardId(2)),
        );
        assert_eq!(derive_ratings(&lineup, &roster).infield, -2);
    }

    #[test]
    fn test_missing_groups_are_zero() {
        let roster = Roster::new(vec![]);
        let lineup = Lineup::new(vec![], None);
        assert_eq!(derive_ratings(&lineup, &roster), DefensiveRatings::default());
    }
}
