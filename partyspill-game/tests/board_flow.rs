use partyspill_game::board::{GamePhase, SpaceEvent};
use partyspill_game::constants::{KEY_BOARD_GAME_STATE, KEY_USED_TRIVIA, TRIVIA_FORFEIT_RULE};
use partyspill_game::quiz::{all_question_refs, question_by_ref};
use partyspill_game::views::RecordingNavigator;
use partyspill_game::{
    BoardConfig, BoardGame, BoardGameState, GameError, KeyValueStore, MemoryStore, Repository,
    SpaceType, View,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

fn new_game(
    store: &MemoryStore,
    seed: u64,
    players: &[&str],
) -> (BoardGame<MemoryStore>, ChaCha20Rng) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut game =
        BoardGame::open(Repository::new(store.clone()), BoardConfig::default(), &mut rng).unwrap();
    for name in players {
        game.add_player(name, &mut rng).unwrap();
    }
    game.start().unwrap();
    (game, rng)
}

#[test]
fn long_games_keep_every_invariant() {
    for seed in [1_u64, 7, 42, 1_000, 0xC0FFEE] {
        let store = MemoryStore::default();
        let (mut game, mut rng) = new_game(&store, seed, &["Kari", "Ola", "Nora"]);
        let loop_length = game.state().loop_length();
        let mut expected_index = 0;
        for _ in 0..300 {
            let before = game.state().clone();
            let outcome = game.take_turn(&mut rng).unwrap();
            assert_eq!(outcome.player_index, expected_index);
            let mover = &before.players[expected_index];
            assert_eq!(
                outcome.movement.to,
                (mover.position + outcome.movement.steps) % loop_length
            );
            assert!((1..=6).contains(&outcome.movement.steps));
            if outcome.movement.landed_on_start {
                assert!(matches!(outcome.event, SpaceEvent::LandedOnStart { .. }));
            } else if outcome.movement.passed_start {
                assert!(matches!(outcome.event, SpaceEvent::PassedStart { .. }));
            }
            expected_index = (expected_index + 1) % 3;
            assert_eq!(game.state().current_player_index, expected_index);
            assert!(game.state().is_consistent());
        }
        let starts = game
            .state()
            .spaces
            .iter()
            .filter(|s| s.space_type() == SpaceType::Start)
            .count();
        assert_eq!(starts, 1);
    }
}

#[test]
fn every_turn_is_saved_before_returning() {
    let store = MemoryStore::default();
    let (mut game, mut rng) = new_game(&store, 3, &["Kari", "Ola"]);
    for _ in 0..20 {
        game.take_turn(&mut rng).unwrap();
        let saved: BoardGameState =
            serde_json::from_str(&store.raw(KEY_BOARD_GAME_STATE).unwrap()).unwrap();
        assert_eq!(&saved, game.state());
    }
}

#[test]
fn trivia_never_repeats_until_the_deck_is_empty() {
    let store = MemoryStore::default();
    let (mut game, mut rng) = new_game(&store, 17, &["Kari", "Ola"]);
    let mut drawn = Vec::new();
    let mut forfeits = 0;
    for _ in 0..2_000 {
        let outcome = game.take_turn(&mut rng).unwrap();
        match outcome.event {
            SpaceEvent::Trivia { question, .. } => {
                assert!(question_by_ref(&question).is_some());
                drawn.push(question);
            }
            SpaceEvent::TriviaExhausted { rule } => {
                assert_eq!(rule, TRIVIA_FORFEIT_RULE);
                forfeits += 1;
            }
            _ => {}
        }
    }
    let unique: BTreeSet<_> = drawn.iter().cloned().collect();
    assert_eq!(unique.len(), drawn.len());
    assert_eq!(unique.len(), all_question_refs().len());
    assert!(forfeits > 0);

    let stored: BTreeSet<String> =
        serde_json::from_str(&store.raw(KEY_USED_TRIVIA).unwrap()).unwrap();
    assert_eq!(stored.len(), all_question_refs().len());
}

#[test]
fn used_trivia_survives_a_reload_and_reset_clears_it() {
    let store = MemoryStore::default();
    let (mut game, mut rng) = new_game(&store, 23, &["Kari", "Ola"]);
    while game.deck().used().is_empty() {
        game.take_turn(&mut rng).unwrap();
    }
    let used = game.deck().used().clone();
    drop(game);

    let mut reopened = BoardGame::open(
        Repository::new(store.clone()),
        BoardConfig::default(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(reopened.deck().used(), &used);
    assert_eq!(reopened.phase(), GamePhase::Playing);

    reopened.reset(&mut rng).unwrap();
    assert!(reopened.deck().used().is_empty());
    assert_eq!(reopened.phase(), GamePhase::Setup);
    assert!(store.raw(KEY_USED_TRIVIA).is_none());
}

#[test]
fn special_events_navigate_to_wheels() {
    let store = MemoryStore::default();
    let (mut game, mut rng) = new_game(&store, 99, &["Kari", "Ola"]);
    let mut nav = RecordingNavigator::default();
    let mut expected = Vec::new();
    for _ in 0..200 {
        let outcome = game.take_turn(&mut rng).unwrap();
        if let Some(view) = outcome.destination() {
            expected.push(view);
        }
        outcome.follow(&mut nav);
    }
    assert_eq!(nav.visited, expected);
    assert!(nav.visited.contains(&View::RulesWheel) || nav.visited.contains(&View::PriceWheel));
    assert!(nav.visited.iter().all(|view| matches!(
        view,
        View::PriceWheel | View::PunishmentWheel | View::RulesWheel
    )));
}

#[test]
fn smaller_configured_loops_work_end_to_end() {
    let store = MemoryStore::default();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let cfg = BoardConfig::from_json(r#"{"loopLength": 5, "minPlayers": 1}"#).unwrap();
    let mut game = BoardGame::open(Repository::new(store), cfg, &mut rng).unwrap();
    game.add_player("Solo", &mut rng).unwrap();
    game.start().unwrap();
    for _ in 0..50 {
        let outcome = game.take_turn(&mut rng).unwrap();
        assert!(outcome.movement.to < 5);
        assert_eq!(outcome.next_player_index, 0);
    }
}

#[derive(Debug, thiserror::Error)]
#[error("quota exceeded")]
struct QuotaExceeded;

/// Memory store whose writes can be switched off, like a full `localStorage`.
#[derive(Clone, Default)]
struct QuotaStore {
    inner: MemoryStore,
    full: Rc<Cell<bool>>,
}

impl KeyValueStore for QuotaStore {
    type Error = QuotaExceeded;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.inner.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.full.get() {
            return Err(QuotaExceeded);
        }
        self.inner.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.inner.remove(key).map_err(|never| match never {})
    }
}

#[test]
fn failed_saves_leave_the_game_untouched() {
    let store = QuotaStore::default();
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let mut game =
        BoardGame::open(Repository::new(store.clone()), BoardConfig::default(), &mut rng).unwrap();
    game.add_player("Kari", &mut rng).unwrap();
    game.add_player("Ola", &mut rng).unwrap();
    game.start().unwrap();
    let saved = store.inner.raw(KEY_BOARD_GAME_STATE).unwrap();
    let before = game.state().clone();

    store.full.set(true);
    for steps in 1..=6 {
        assert!(matches!(game.play_roll(steps, &mut rng), Err(GameError::Storage(_))));
        assert_eq!(game.state(), &before);
        assert!(game.deck().used().is_empty());
    }
    assert!(game.reset(&mut rng).is_err());
    assert_eq!(game.state(), &before);
    assert_eq!(store.inner.raw(KEY_BOARD_GAME_STATE).unwrap(), saved);

    store.full.set(false);
    let outcome = game.play_roll(3, &mut rng).unwrap();
    assert_eq!(outcome.player_index, 0);
    assert_eq!(outcome.movement.from, 0);
    assert_eq!(game.state().players[0].position, 3);
    let stored: BoardGameState =
        serde_json::from_str(&store.inner.raw(KEY_BOARD_GAME_STATE).unwrap()).unwrap();
    assert_eq!(&stored, game.state());
}

#[test]
fn failed_setup_saves_keep_the_roster() {
    let store = QuotaStore::default();
    let mut rng = ChaCha20Rng::seed_from_u64(22);
    let mut game =
        BoardGame::open(Repository::new(store.clone()), BoardConfig::default(), &mut rng).unwrap();
    let id = game.add_player("Kari", &mut rng).unwrap().id.clone();
    game.add_player("Ola", &mut rng).unwrap();

    store.full.set(true);
    assert!(game.add_player("Nora", &mut rng).is_err());
    assert!(game.remove_player(&id).is_err());
    assert!(game.start().is_err());
    assert_eq!(game.state().players.len(), 2);
    assert_eq!(game.phase(), GamePhase::Setup);
}
