//! In-memory game store.
//!
//! The store owns every game: its durable record, its engine, the full
//! snapshot history, and the append-only event log. Concurrent access
//! goes through a `DashMap` of per-game mutexes, so two games never
//! contend and two submissions to one game serialize.
//!
//! ## Optimistic concurrency
//!
//! Every committed transition bumps the turn number (the history
//! length). A submission may carry the turn number it was computed
//! against; if the game has moved on the store rejects it with
//! `StaleVersion` instead of applying it to state the user never saw.

use crate::cards::Roster;
use crate::core::{GameError, GameId, Side, SidePair, UserId};
use crate::engine::{Game, GameAction, GameEngine, GameStatus};
use crate::lineup::{derive_ratings, validate_lineup, Lineup};
use crate::rules::inning_ordinal;
use crate::state::{EventKind, GameEvent, GameState};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the store keeps for one game.
struct GameRecord {
    game: Game,
    /// Present once the game has started.
    engine: Option<GameEngine>,
    /// Every committed snapshot; `history.len()` is the turn number.
    history: im::Vector<GameState>,
    events: im::Vector<GameEvent>,
}

/// A read-only view of one game at its latest turn.
#[derive(Clone, Debug)]
pub struct GameSnapshot {
    pub game: Game,
    pub turn_number: u64,
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Thread-safe store of all live games.
pub struct GameStateStore {
    games: DashMap<GameId, Arc<Mutex<GameRecord>>>,
    next_id: AtomicU64,
}

impl Default for GameStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new game between two users. Play cannot begin until
    /// [`start_game`](Self::start_game) provides rosters and lineups.
    pub fn create_game(&self, home: UserId, away: UserId) -> GameId {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = GameRecord {
            game: Game::new(id, home, away),
            engine: None,
            history: im::Vector::new(),
            events: im::Vector::new(),
        };
        self.games.insert(id, Arc::new(Mutex::new(record)));
        info!(game_id = id.0, home = home.0, away = away.0, "game created");
        id
    }

    fn record(&self, id: GameId) -> Result<Arc<Mutex<GameRecord>>, GameError> {
        self.games
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(GameError::UnknownGame(id))
    }

    /// Validate both lineups, build the opening snapshot, and open play.
    pub fn start_game(
        &self,
        id: GameId,
        rosters: SidePair<Roster>,
        lineups: SidePair<Lineup>,
        seed: u64,
    ) -> Result<GameSnapshot, GameError> {
        let record = self.record(id)?;
        let mut record = record.lock();
        match record.game.status {
            GameStatus::Setup => {}
            GameStatus::InProgress => return Err(GameError::ActionAlreadySet),
            GameStatus::Completed => return Err(GameError::GameAlreadyOver),
        }

        let mut errors = Vec::new();
        for (side, lineup) in lineups.iter() {
            errors.extend(validate_lineup(lineup, &rosters[side]));
        }
        if !errors.is_empty() {
            return Err(GameError::InvalidLineup(errors));
        }

        let defense = SidePair::new(
            derive_ratings(&lineups[Side::Home], &rosters[Side::Home]),
            derive_ratings(&lineups[Side::Away], &rosters[Side::Away]),
        );
        let state = GameState::initial(record.game.users.clone(), lineups, defense, seed);

        let mut events = im::Vector::new();
        if let Some(pitcher) = state.pitcher_on_mound() {
            events.push_back(GameEvent {
                seq: 1,
                turn_number: 1,
                kind: EventKind::System,
                message: format!(
                    "Top {}. {} now pitching.",
                    inning_ordinal(state.inning),
                    rosters[Side::Home].name(pitcher)
                ),
            });
        }

        record.engine = Some(GameEngine::new(rosters));
        record.history = im::Vector::unit(state);
        record.events = events;
        record.game.status = GameStatus::InProgress;

        info!(game_id = id.0, seed, "game started");
        Self::view(&record)
    }

    /// Apply one action at the latest turn and commit the result.
    ///
    /// `expected_turn`, when given, must match the current turn number
    /// or the submission is rejected as stale.
    pub fn submit(
        &self,
        id: GameId,
        user: UserId,
        action: GameAction,
        expected_turn: Option<u64>,
    ) -> Result<GameSnapshot, GameError> {
        let record = self.record(id)?;
        let mut record = record.lock();

        if record.game.status == GameStatus::Completed {
            return Err(GameError::GameAlreadyOver);
        }
        let engine = record
            .engine
            .as_ref()
            .ok_or_else(|| GameError::CorruptState("game has not started".into()))?;
        let current_turn = record.history.len() as u64;
        if let Some(expected) = expected_turn {
            if expected != current_turn {
                warn!(
                    game_id = id.0,
                    expected, current = current_turn, "stale submission rejected"
                );
                return Err(GameError::StaleVersion {
                    expected,
                    current: current_turn,
                });
            }
        }

        let latest = record
            .history
            .last()
            .ok_or_else(|| GameError::CorruptState("empty history".into()))?;
        let transition = engine.apply(latest, user, action)?;

        let turn_number = current_turn + 1;
        let mut seq = record.events.len() as u64;
        for draft in transition.events {
            seq += 1;
            record.events.push_back(GameEvent {
                seq,
                turn_number,
                kind: draft.kind,
                message: draft.message,
            });
        }
        let game_over = transition.state.game_over;
        record.history.push_back(transition.state);

        if game_over {
            record.game.status = GameStatus::Completed;
            info!(game_id = id.0, turn = turn_number, "game completed");
        } else {
            info!(game_id = id.0, turn = turn_number, user = user.0, "turn committed");
        }
        Self::view(&record)
    }

    /// The latest committed view of a game.
    pub fn snapshot(&self, id: GameId) -> Result<GameSnapshot, GameError> {
        let record = self.record(id)?;
        let record = record.lock();
        Self::view(&record)
    }

    fn view(record: &GameRecord) -> Result<GameSnapshot, GameError> {
        let state = record
            .history
            .last()
            .cloned()
            .ok_or_else(|| GameError::CorruptState("game has not started".into()))?;
        Ok(GameSnapshot {
            game: record.game.clone(),
            turn_number: record.history.len() as u64,
            state,
            events: record.events.iter().cloned().collect(),
        })
    }
}
