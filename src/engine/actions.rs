//! The action vocabulary users submit.

use crate::cards::Position;
use crate::core::CardId;
use crate::state::{BaseDecisions, BatterAction, PitcherAction};
use serde::{Deserialize, Serialize};

/// One user-initiated move, validated by the turn arbiter before the
/// engine applies it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GameAction {
    /// Fielding side commits to a pitch or an intentional walk.
    SetPitcherAction(PitcherAction),
    /// Batting side commits to a swing or a bunt; resolves the at-bat.
    SetBatterAction(BatterAction),
    /// Fielding side toggles the infield in.
    SetDefense { infield_in: bool },
    /// Batting side sends the declared runners, all at once.
    DeclareSteal { attempts: BaseDecisions },
    /// Fielding side confirms it has seen the steal result.
    AcknowledgeSteal,
    /// Batting side answers a pending contested-advance play.
    AdvanceDecisions(BaseDecisions),
    /// Batting side answers a pending infield-in ground ball.
    ResolveInfieldIn { send_runner: bool },
    /// Bring a bench player in for a lineup player. `position` is where
    /// the incoming player fields; `None` keeps the outgoing player's
    /// slot position.
    Substitute {
        player_in: CardId,
        player_out: CardId,
        position: Option<Position>,
    },
    /// Swap the fielding positions of two lineup players.
    SwapPositions { first: CardId, second: CardId },
    /// Declare readiness for the next at-bat (or next half-inning).
    NextHitter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serde() {
        let action = GameAction::Substitute {
            player_in: CardId(7),
            player_out: CardId(3),
            position: Some(Position::LeftField),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"substitute\""));
        let back: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn test_unit_action_serde() {
        let json = serde_json::to_string(&GameAction::NextHitter).unwrap();
        let back: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameAction::NextHitter);
    }
}
