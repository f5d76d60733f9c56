//! Game records: identity, participants, and lifecycle status.

use crate::core::{GameId, Side, SidePair, UserId};
use serde::{Deserialize, Serialize};

/// Where a game sits in its series, when it belongs to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesLink {
    pub series_id: u64,
    /// 1-based game number within the series.
    pub game_in_series: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created; waiting on both lineups.
    Setup,
    InProgress,
    Completed,
}

/// One game's durable record, independent of any snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub users: SidePair<UserId>,
    pub series: Option<SeriesLink>,
    pub status: GameStatus,
}

impl Game {
    #[must_use]
    pub fn new(id: GameId, home: UserId, away: UserId) -> Self {
        Self {
            id,
            users: SidePair::new(home, away),
            series: None,
            status: GameStatus::Setup,
        }
    }

    #[must_use]
    pub fn user(&self, side: Side) -> UserId {
        self.users[side]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_in_setup() {
        let game = Game::new(GameId(1), UserId(10), UserId(20));
        assert_eq!(game.status, GameStatus::Setup);
        assert_eq!(game.user(Side::Home), UserId(10));
        assert_eq!(game.user(Side::Away), UserId(20));
        assert!(game.series.is_none());
    }
}
