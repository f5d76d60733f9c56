//! End-to-end game flow through the store: pitches, swings, half-inning
//! changes, and the event log.

use proptest::prelude::*;
use showdown_engine::{
    BatterAction, Chart, EventKind, FieldingRatings, GameAction, GameError, GameId, GameSnapshot,
    GameStateStore, GameStatus, CardId, HalfPhase, Lineup, LineupSlot, Outcome, PitcherAction,
    PlayerCard, Position, Roster, Side, SidePair, Speed, UserId,
};

const HOME: UserId = UserId(1);
const AWAY: UserId = UserId(2);

fn fielder(id: i32, on_base: i32, chart: Chart) -> PlayerCard {
    PlayerCard {
        card_id: CardId(id),
        name: format!("Player {id}"),
        control: None,
        on_base,
        speed: Speed::B,
        ip: None,
        fielding: FieldingRatings::from_pairs(&[
            (Position::Catcher, 4),
            (Position::SecondBase, 2),
            (Position::Shortstop, 2),
            (Position::ThirdBase, 1),
            (Position::LeftField, 1),
            (Position::CenterField, 2),
            (Position::RightField, 1),
        ]),
        chart,
    }
}

fn starter(id: i32) -> PlayerCard {
    PlayerCard {
        card_id: CardId(id),
        name: format!("Starter {id}"),
        control: Some(3),
        on_base: 0,
        speed: Speed::C,
        ip: Some(6),
        fielding: FieldingRatings::none(),
        chart: Chart::from_ranges(&[(1, 20, Outcome::Strikeout)]),
    }
}

/// Nine hitters with the given on-base and chart, a DH order, a starter.
fn side(base: i32, pitcher_id: i32, on_base: i32, chart: &Chart) -> (Roster, Lineup) {
    let mut cards: Vec<PlayerCard> = (base..base + 9)
        .map(|i| fielder(i, on_base, chart.clone()))
        .collect();
    cards.push(starter(pitcher_id));

    let mut order: Vec<LineupSlot> = (0..8)
        .map(|i| LineupSlot {
            card: CardId(base + i),
            position: Position::FIELDING[(i + 1) as usize],
        })
        .collect();
    order.push(LineupSlot {
        card: CardId(base + 8),
        position: Position::DesignatedHitter,
    });
    (Roster::new(cards), Lineup::new(order, Some(CardId(pitcher_id))))
}

/// Hitters who never see the advantage: every swing is a strikeout off
/// the pitcher's chart.
fn whiffers(base: i32, pitcher_id: i32) -> (Roster, Lineup) {
    let chart = Chart::from_ranges(&[(1, 20, Outcome::Single)]);
    side(base, pitcher_id, -30, &chart)
}

/// Hitters who always hold the advantage and always homer.
fn sluggers(base: i32, pitcher_id: i32) -> (Roster, Lineup) {
    let chart = Chart::from_ranges(&[(1, 20, Outcome::HomeRun)]);
    side(base, pitcher_id, 99, &chart)
}

fn start(
    home: (Roster, Lineup),
    away: (Roster, Lineup),
    seed: u64,
) -> (GameStateStore, GameId) {
    let store = GameStateStore::new();
    let id = store.create_game(HOME, AWAY);
    store
        .start_game(
            id,
            SidePair::new(home.0, away.0),
            SidePair::new(home.1, away.1),
            seed,
        )
        .unwrap();
    (store, id)
}

fn pitch_and_swing(store: &GameStateStore, id: GameId, fielding: UserId, batting: UserId) {
    store
        .submit(id, fielding, GameAction::SetPitcherAction(PitcherAction::Pitch), None)
        .unwrap();
    store
        .submit(id, batting, GameAction::SetBatterAction(BatterAction::Swing), None)
        .unwrap();
}

fn press_next_both(store: &GameStateStore, id: GameId) -> GameSnapshot {
    store.submit(id, HOME, GameAction::NextHitter, None).unwrap();
    store.submit(id, AWAY, GameAction::NextHitter, None).unwrap()
}

#[test]
fn home_run_scores_and_logs() {
    let (store, id) = start(whiffers(100, 150), sluggers(200, 250), 11);

    pitch_and_swing(&store, id, HOME, AWAY);

    let snap = store.snapshot(id).unwrap();
    assert_eq!(snap.state.away_score, 1);
    assert_eq!(snap.state.home_score, 0);
    assert!(snap.state.bases.is_empty());
    let play = snap
        .events
        .iter()
        .find(|e| e.kind == EventKind::Play)
        .unwrap();
    assert!(play.message.contains("HOME RUN"));
    assert!(play.message.contains("(Score: 1-0)"));
}

#[test]
fn three_strikeouts_end_the_half() {
    let (store, id) = start(whiffers(100, 150), whiffers(200, 250), 11);

    for _ in 0..2 {
        pitch_and_swing(&store, id, HOME, AWAY);
        press_next_both(&store, id);
    }
    pitch_and_swing(&store, id, HOME, AWAY);

    let snap = store.snapshot(id).unwrap();
    assert_eq!(snap.state.outs, 3);
    assert_eq!(snap.state.phase(), HalfPhase::BetweenHalfAwayPending);
    // Still the top half until both sides confirm.
    assert!(snap.state.top_of_inning);

    let snap = press_next_both(&store, id);
    assert_eq!(snap.state.phase(), HalfPhase::BottomHalf);
    assert_eq!(snap.state.outs, 0);
    assert!(snap.state.bases.is_empty());
    // The order pointer advances on the flip, same as after any at-bat.
    assert_eq!(snap.state.current_at_bat.batter, CardId(101));
    assert_eq!(snap.state.current_at_bat.pitcher, Some(CardId(250)));
    assert!(snap
        .events
        .iter()
        .any(|e| e.kind == EventKind::System && e.message.contains("Bottom 1st")));
}

#[test]
fn completed_at_bat_is_frozen_for_display() {
    let (store, id) = start(whiffers(100, 150), whiffers(200, 250), 11);

    pitch_and_swing(&store, id, HOME, AWAY);
    let snap = press_next_both(&store, id);

    let last = snap.state.last_completed_at_bat.unwrap();
    assert_eq!(last.batter, CardId(200));
    assert_eq!(last.swing.map(|s| s.outcome), Some(Outcome::Strikeout));
    assert_eq!(last.outs_before, 0);
    // Readiness resets once both sides have pressed.
    assert!(!snap.state.ready_for_next[Side::Home]);
    assert!(!snap.state.ready_for_next[Side::Away]);
    // Order moved to the second hitter.
    assert_eq!(snap.state.current_at_bat.batter, CardId(201));
}

#[test]
fn duplicate_declarations_are_rejected() {
    let (store, id) = start(whiffers(100, 150), whiffers(200, 250), 11);

    store
        .submit(id, HOME, GameAction::SetPitcherAction(PitcherAction::Pitch), None)
        .unwrap();
    let err = store
        .submit(id, HOME, GameAction::SetPitcherAction(PitcherAction::Pitch), None)
        .unwrap_err();
    assert_eq!(err, GameError::ActionAlreadySet);

    // Second ready press from the same side is rejected too.
    store
        .submit(id, AWAY, GameAction::SetBatterAction(BatterAction::Swing), None)
        .unwrap();
    store.submit(id, HOME, GameAction::NextHitter, None).unwrap();
    let err = store
        .submit(id, HOME, GameAction::NextHitter, None)
        .unwrap_err();
    assert_eq!(err, GameError::ActionAlreadySet);
}

#[test]
fn rejected_actions_do_not_commit() {
    let (store, id) = start(whiffers(100, 150), whiffers(200, 250), 11);
    let before = store.snapshot(id).unwrap();

    // Batter cannot act before the pitch; batting side cannot pitch.
    assert_eq!(
        store
            .submit(id, AWAY, GameAction::SetBatterAction(BatterAction::Swing), None)
            .unwrap_err(),
        GameError::OutOfTurn
    );
    assert_eq!(
        store
            .submit(id, AWAY, GameAction::SetPitcherAction(PitcherAction::Pitch), None)
            .unwrap_err(),
        GameError::OutOfTurn
    );

    let after = store.snapshot(id).unwrap();
    assert_eq!(after.turn_number, before.turn_number);
    assert_eq!(after.state, before.state);
    assert_eq!(after.events.len(), before.events.len());
}

#[test]
fn intentional_walk_forces_runners() {
    let (store, id) = start(whiffers(100, 150), whiffers(200, 250), 11);

    for _ in 0..2 {
        store
            .submit(
                id,
                HOME,
                GameAction::SetPitcherAction(PitcherAction::IntentionalWalk),
                None,
            )
            .unwrap();
        press_next_both(&store, id);
    }

    let snap = store.snapshot(id).unwrap();
    assert_eq!(snap.state.bases.occupied_count(), 2);
    assert_eq!(snap.state.outs, 0);
    assert!(snap
        .events
        .iter()
        .any(|e| e.kind == EventKind::Walk && e.message.contains("intentionally walked")));
}

#[test]
fn decided_ninth_completes_the_game() {
    let (store, id) = start(whiffers(100, 150), whiffers(200, 250), 11);

    // Top 1: four intentional walks force in a run, then three
    // strikeouts end the half.
    for _ in 0..4 {
        store
            .submit(
                id,
                HOME,
                GameAction::SetPitcherAction(PitcherAction::IntentionalWalk),
                None,
            )
            .unwrap();
        press_next_both(&store, id);
    }
    let mut play_half = |fielding: UserId, batting: UserId, last: bool| {
        for k in 0..3 {
            pitch_and_swing(&store, id, fielding, batting);
            if !(last && k == 2) {
                press_next_both(&store, id);
            }
        }
    };
    play_half(HOME, AWAY, false); // finish top 1
    play_half(AWAY, HOME, false); // bottom 1
    for _ in 2..=8 {
        play_half(HOME, AWAY, false);
        play_half(AWAY, HOME, false);
    }
    play_half(HOME, AWAY, false); // top 9
    play_half(AWAY, HOME, true); // bottom 9 ends the game

    // The bottom-9th third out decided it: away leads 1-0.
    let snap = store.snapshot(id).unwrap();
    assert_eq!(snap.game.status, GameStatus::Completed);
    assert!(snap.state.game_over);
    assert_eq!(snap.state.winning_side, Some(Side::Away));
    assert_eq!(snap.state.away_score, 1);
    assert_eq!(snap.state.home_score, 0);
    assert!(snap
        .events
        .iter()
        .any(|e| e.message.contains("That's the ballgame")));

    // Nothing more is accepted.
    assert_eq!(
        store
            .submit(id, HOME, GameAction::NextHitter, None)
            .unwrap_err(),
        GameError::GameAlreadyOver
    );
}

#[test]
fn same_seed_and_script_replays_identically() {
    let run = |seed: u64| {
        let (store, id) = start(whiffers(100, 150), sluggers(200, 250), seed);
        pitch_and_swing(&store, id, HOME, AWAY);
        press_next_both(&store, id);
        pitch_and_swing(&store, id, HOME, AWAY);
        store.snapshot(id).unwrap()
    };

    let a = run(77);
    let b = run(77);
    assert_eq!(a.state, b.state);
    assert_eq!(a.turn_number, b.turn_number);
    assert_eq!(a.events, b.events);

    let c = run(78);
    // A different seed still replays the same deterministic script of
    // forced outcomes, but the dice words differ.
    assert_ne!(a.state.rng, c.state.rng);
}

#[test]
fn snapshot_survives_serde() {
    let (store, id) = start(whiffers(100, 150), sluggers(200, 250), 5);
    pitch_and_swing(&store, id, HOME, AWAY);

    let snap = store.snapshot(id).unwrap();
    let json = serde_json::to_string(&snap.state).unwrap();
    let back: showdown_engine::GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(snap.state, back);

    // The restored state keeps rolling the same dice stream.
    let mut original = snap.state.clone();
    let mut restored = back;
    assert_eq!(original.rng.d20(), restored.rng.d20());
}

proptest! {
    #[test]
    fn outs_never_exceed_three(seed in any::<u64>()) {
        let (store, id) = start(whiffers(100, 150), whiffers(200, 250), seed);
        for _ in 0..2 {
            pitch_and_swing(&store, id, HOME, AWAY);
            let snap = store.snapshot(id).unwrap();
            prop_assert!(snap.state.outs <= 3);
            press_next_both(&store, id);
        }
        pitch_and_swing(&store, id, HOME, AWAY);
        let snap = store.snapshot(id).unwrap();
        prop_assert_eq!(snap.state.outs, 3);
        prop_assert!(snap.state.between_half[Side::Away]);
    }
}
