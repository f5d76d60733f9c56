//! Half-inning and game-over transitions.
//!
//! A third out never flips the half by itself: it raises the batting
//! side's between-half flag, and the flip happens once both users have
//! pressed ready for the next hitter. Terminal checks (walk-off, decided
//! ninth) run wherever a run or out can occur.

use crate::core::Side;
use crate::state::{Bases, EventDraft, EventKind, GameState};

/// Innings after which the game can end.
pub const REGULATION_INNINGS: u32 = 9;

/// Ordinal rendering for inning numbers ("1st", "2nd", ... "11th").
#[must_use]
pub fn inning_ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// End the game immediately if the home side has taken the lead in the
/// bottom of the 9th or later.
pub fn check_walk_off(state: &mut GameState, events: &mut Vec<EventDraft>) {
    if state.game_over {
        return;
    }
    if !state.top_of_inning
        && state.inning >= REGULATION_INNINGS
        && state.home_score > state.away_score
    {
        state.game_over = true;
        state.winning_side = Some(Side::Home);
        events.push(EventDraft::new(EventKind::System, "HOME TEAM WINS! WALK-OFF!"));
    }
}

/// Handle a third out: either the game is decided, or the batting side's
/// between-half flag goes up and play waits for both readiness flags.
pub fn note_third_out(state: &mut GameState, events: &mut Vec<EventDraft>) {
    if state.outs < 3 || state.game_over {
        return;
    }

    let decided = state.inning >= REGULATION_INNINGS
        && if state.top_of_inning {
            // Top half done and the home side already leads.
            state.home_score > state.away_score
        } else {
            // A completed bottom half only continues a tie.
            state.home_score != state.away_score
        };

    if decided {
        state.game_over = true;
        state.winning_side = Some(if state.home_score > state.away_score {
            Side::Home
        } else {
            Side::Away
        });
        events.push(EventDraft::new(
            EventKind::System,
            format!(
                "That's the ballgame! Final Score: Away {}, Home {}.",
                state.away_score, state.home_score
            ),
        ));
    } else {
        let batting = state.batting_side();
        state.between_half[batting] = true;
    }
}

/// Flip to the next half-inning: clear the bases and outs, bump the
/// inning entering a top half, drop the between-half flags.
pub fn advance_half(state: &mut GameState) {
    state.top_of_inning = !state.top_of_inning;
    if state.top_of_inning {
        state.inning += 1;
    }
    state.outs = 0;
    state.bases = Bases::empty();
    state.between_half[Side::Home] = false;
    state.between_half[Side::Away] = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Position;
    use crate::core::{CardId, SidePair, UserId};
    use crate::lineup::{DefensiveRatings, Lineup, LineupSlot};

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
            1,
        )
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(inning_ordinal(1), "1st");
        assert_eq!(inning_ordinal(2), "2nd");
        assert_eq!(inning_ordinal(3), "3rd");
        assert_eq!(inning_ordinal(4), "4th");
        assert_eq!(inning_ordinal(11), "11th");
        assert_eq!(inning_ordinal(12), "12th");
        assert_eq!(inning_ordinal(21), "21st");
    }

    #[test]
    fn test_third_out_raises_between_flag() {
        let mut s = state();
        s.outs = 3;
        let mut events = Vec::new();
        note_third_out(&mut s, &mut events);

        assert!(s.between_half[Side::Away]);
        assert!(!s.game_over);
        // Flip deferred until both users are ready.
        assert!(s.top_of_inning);
    }

    #[test]
    fn test_advance_half() {
        let mut s = state();
        s.outs = 3;
        s.between_half[Side::Away] = true;
        advance_half(&mut s);

        assert!(!s.top_of_inning);
        assert_eq!(s.inning, 1);
        assert_eq!(s.outs, 0);
        assert!(s.bases.is_empty());
        assert!(!s.between_half[Side::Away]);

        // Bottom to top bumps the inning.
        advance_half(&mut s);
        assert!(s.top_of_inning);
        assert_eq!(s.inning, 2);
    }

    #[test]
    fn test_walk_off() {
        let mut s = state();
        s.inning = 9;
        s.top_of_inning = false;
        s.home_score = 3;
        s.away_score = 3;
        let mut events = Vec::new();

        check_walk_off(&mut s, &mut events);
        assert!(!s.game_over);

        s.home_score = 4;
        check_walk_off(&mut s, &mut events);
        assert!(s.game_over);
        assert_eq!(s.winning_side, Some(Side::Home));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_no_walk_off_before_ninth() {
        let mut s = state();
        s.inning = 8;
        s.top_of_inning = false;
        s.home_score = 5;
        let mut events = Vec::new();
        check_walk_off(&mut s, &mut events);
        assert!(!s.game_over);
    }

    #[test]
    fn test_game_ends_after_decided_ninth() {
        let mut s = state();
        s.inning = 9;
        s.top_of_inning = false;
        s.outs = 3;
        s.away_score = 2;
        s.home_score = 1;
        let mut events = Vec::new();

        note_third_out(&mut s, &mut events);
        assert!(s.game_over);
        assert_eq!(s.winning_side, Some(Side::Away));
    }

    #[test]
    fn test_tie_after_ninth_continues() {
        let mut s = state();
        s.inning = 9;
        s.top_of_inning = false;
        s.outs = 3;
        s.away_score = 2;
        s.home_score = 2;
        let mut events = Vec::new();

        note_third_out(&mut s, &mut events);
        assert!(!s.game_over);
        assert!(s.between_half[Side::Home]);
    }

    #[test]
    fn test_top_ninth_ends_if_home_leads() {
        let mut s = state();
        s.inning = 9;
        s.top_of_inning = true;
        s.outs = 3;
        s.home_score = 4;
        s.away_score = 1;
        let mut events = Vec::new();

        note_third_out(&mut s, &mut events);
        assert!(s.game_over);
        assert_eq!(s.winning_side, Some(Side::Home));
    }
}
