//! Logic scenarios: each one drives the game crate headlessly for a seed and
//! fails with a description of the first broken expectation.
use anyhow::{Result, bail, ensure};
use partyspill_game::bingo::{BINGO_SONGS, is_valid_board};
use partyspill_game::board::{SpaceEvent, TriviaDeck};
use partyspill_game::constants::{
    ENCRYPTION_SALT, KEY_BINGO_SIZE, KEY_BOARD_GAME_STATE, KEY_QUIZ_ATTEMPTS, KEY_THEME,
    KEY_USED_TRIVIA, TRIVIA_FORFEIT_RULE,
};
use partyspill_game::quiz::{QuizBook, all_question_refs, quizzes, review};
use partyspill_game::theme::load_theme;
use partyspill_game::views::RecordingNavigator;
use partyspill_game::wheel::segment_at;
use partyspill_game::{
    BingoSession, BoardConfig, BoardGame, BoardGameState, BoardSize, MemoryStore, QuizAttempt,
    QuizError, Repository, SpaceKind, Theme, UserAnswer, WheelKind, decode_answer, encode_answer,
    generate_board, has_winning_line, is_password_correct, spin,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::BTreeSet;

pub struct ScenarioCtx<'a> {
    pub seed: u64,
    pub config: &'a BoardConfig,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed)
    }
}

pub type ScenarioFn = fn(&ScenarioCtx<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

const SCENARIOS: [Scenario; 7] = [
    Scenario {
        key: "smoke",
        description: "Open every feature once against a fresh store",
        run: smoke,
    },
    Scenario {
        key: "bingo-determinism",
        description: "Seeded bingo cards repeat exactly and detect lines",
        run: bingo_determinism,
    },
    Scenario {
        key: "wheel-landing",
        description: "Spin rotations stop inside the picked segment",
        run: wheel_landing,
    },
    Scenario {
        key: "board-invariants",
        description: "Long board games keep movement, turn order and snapshots consistent",
        run: board_invariants,
    },
    Scenario {
        key: "trivia-exhaustion",
        description: "Trivia never repeats and falls back to the forfeit rule",
        run: trivia_exhaustion,
    },
    Scenario {
        key: "quiz-roundtrip",
        description: "Answers decode, reviews honour passwords, attempts persist",
        run: quiz_roundtrip,
    },
    Scenario {
        key: "persistence-recovery",
        description: "Corrupt snapshots are replaced by fresh defaults",
        run: persistence_recovery,
    },
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description))
}

pub fn get_scenario(key: &str) -> Option<Scenario> {
    SCENARIOS.iter().find(|s| s.key == key).copied()
}

/// Expand `all` into every scenario key, keeping explicit keys in order.
pub fn expand_scenarios(requested: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = requested.iter().filter(|k| *k != "all").cloned().collect();
    if requested.iter().any(|k| k == "all") {
        for scenario in &SCENARIOS {
            if !keys.iter().any(|k| k == scenario.key) {
                keys.push(scenario.key.to_string());
            }
        }
    }
    keys
}

fn open_game(
    store: &MemoryStore,
    ctx: &ScenarioCtx<'_>,
    rng: &mut ChaCha20Rng,
    players: usize,
) -> Result<BoardGame<MemoryStore>> {
    let mut game = BoardGame::open(Repository::new(store.clone()), ctx.config.clone(), rng)?;
    for i in 0..players {
        game.add_player(&format!("Spiller {}", i + 1), rng)?;
    }
    game.start()?;
    Ok(game)
}

fn smoke(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let store = MemoryStore::default();
    let mut rng = ctx.rng();

    let bingo = BingoSession::open(Repository::new(store.clone()))?;
    ensure!(!bingo.user_id().is_empty(), "bingo user id missing");
    ensure!(bingo.board().len() == 9, "default bingo card should be 3x3");

    for kind in WheelKind::ALL {
        ensure!(spin(kind.items(), &mut rng).is_some(), "{kind:?} wheel did not spin");
    }

    let players = ctx.config.min_players.max(2);
    let mut game = open_game(&store, ctx, &mut rng, players)?;
    for _ in 0..10 {
        game.take_turn(&mut rng)?;
    }
    ensure!(
        load_theme(&Repository::new(store))? == Theme::Light,
        "theme should default to light"
    );
    Ok(())
}

fn bingo_determinism(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let seed = format!("seed-{}", ctx.seed);
    for size in BoardSize::ALL {
        let board = generate_board(size, &seed);
        ensure!(board == generate_board(size, &seed), "{size} card changed between calls");
        ensure!(is_valid_board(&board, size), "{size} card is malformed");
        ensure!(
            board.iter().all(|s| BINGO_SONGS.contains(&s.label.as_str())),
            "{size} card has an unknown song"
        );
        ensure!(!has_winning_line(&board, size), "unmarked {size} card reported bingo");

        let (rows, cols) = size.dimensions();
        for row in 0..rows {
            let mut marked = board.clone();
            for col in 0..cols {
                marked[row * cols + col].marked = true;
            }
            ensure!(has_winning_line(&marked, size), "{size} row {row} not detected");
        }
        for col in 0..cols {
            let mut marked = board.clone();
            for row in 0..rows {
                marked[row * cols + col].marked = true;
            }
            ensure!(has_winning_line(&marked, size), "{size} column {col} not detected");
        }
    }
    Ok(())
}

fn wheel_landing(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut rng = ctx.rng();
    for kind in WheelKind::ALL {
        let items = kind.items();
        for _ in 0..200 {
            let Some(result) = spin(items, &mut rng) else {
                bail!("{kind:?} wheel is empty");
            };
            let expected = items.iter().position(|i| i.id == result.item.id);
            let landed = segment_at(items, result.rotation);
            ensure!(
                expected == landed,
                "{kind:?} picked {} but rotation {} lands on {landed:?}",
                result.item.id,
                result.rotation
            );
        }
    }
    Ok(())
}

fn board_invariants(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let store = MemoryStore::default();
    let mut rng = ctx.rng();
    let fewest = ctx.config.min_players.max(2);
    let players = rng.gen_range(fewest..=fewest + 3);
    let mut game = open_game(&store, ctx, &mut rng, players)?;
    let loop_length = game.state().loop_length();
    ensure!(loop_length == ctx.config.loop_length, "board has {loop_length} spaces");
    let mut nav = RecordingNavigator::default();

    for turn in 0..500 {
        let before = game.state().clone();
        let outcome = game.take_turn(&mut rng)?;
        let mover = &before.players[before.current_player_index];
        let steps = outcome.movement.steps;
        ensure!((1..=6).contains(&steps), "turn {turn}: rolled {steps}");
        ensure!(
            outcome.movement.to == (mover.position + steps) % loop_length,
            "turn {turn}: {} + {steps} landed on {}",
            mover.position,
            outcome.movement.to
        );
        ensure!(
            outcome.movement.passed_start == (mover.position + steps >= loop_length),
            "turn {turn}: passed-start flag wrong"
        );
        let movement = &outcome.movement;
        match (&outcome.event, movement.landed_on_start, movement.passed_start) {
            (SpaceEvent::LandedOnStart { .. }, true, _)
            | (SpaceEvent::PassedStart { .. }, false, true) => {}
            (_, true, _) | (_, false, true) => {
                bail!("turn {turn}: start event not applied ({:?})", outcome.event)
            }
            _ => {}
        }
        ensure!(
            outcome.next_player_index == (before.current_player_index + 1) % players,
            "turn {turn}: turn order skipped"
        );
        ensure!(game.state().is_consistent(), "turn {turn}: state inconsistent");
        let saved = store.raw(KEY_BOARD_GAME_STATE).unwrap_or_default();
        let saved: BoardGameState = serde_json::from_str(&saved)?;
        ensure!(&saved == game.state(), "turn {turn}: snapshot lags behind state");
        outcome.follow(&mut nav);
    }
    if ctx.verbose {
        println!("    navigated {} times", nav.visited.len());
    }
    Ok(())
}

fn trivia_exhaustion(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let store = MemoryStore::default();
    let mut rng = ctx.rng();
    let mut game = open_game(&store, ctx, &mut rng, ctx.config.min_players.max(2))?;
    let total = all_question_refs().len();
    let mut drawn = BTreeSet::new();
    let mut forfeits = 0_usize;

    for _ in 0..5_000 {
        match game.take_turn(&mut rng)?.event {
            SpaceEvent::Trivia { question, .. } => {
                ensure!(drawn.insert(question.clone()), "{question} drawn twice");
            }
            SpaceEvent::TriviaExhausted { rule } => {
                ensure!(drawn.len() == total, "deck ran dry after {} questions", drawn.len());
                ensure!(rule == TRIVIA_FORFEIT_RULE, "unexpected forfeit text {rule}");
                forfeits += 1;
            }
            _ => {}
        }
        if forfeits > 0 {
            break;
        }
    }
    let has_trivia = game
        .state()
        .spaces
        .iter()
        .any(|s| matches!(s.kind, SpaceKind::Trivia { .. }));
    ensure!(!has_trivia || forfeits > 0, "never exhausted the deck");

    let stored: BTreeSet<_> = Repository::new(store.clone())
        .load_used_trivia()?
        .unwrap_or_default();
    ensure!(stored == drawn, "persisted used-set differs from draws");

    game.reset(&mut rng)?;
    ensure!(store.raw(KEY_USED_TRIVIA).is_none(), "reset kept used trivia");
    ensure!(TriviaDeck::default().remaining().len() == total, "catalog changed size");
    Ok(())
}

fn quiz_roundtrip(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let store = MemoryStore::default();
    let book = QuizBook::new(Repository::new(store.clone()));
    let passwords = [("mixed-quiz", "allmenn"), ("norway-quiz", "norge")];

    for quiz in quizzes() {
        let mut answers = Vec::new();
        for question in &quiz.questions {
            let Some(answer) = question.reveal_answer() else {
                bail!("{}:{} answer unreadable", quiz.id, question.id);
            };
            let again = encode_answer(&answer, ENCRYPTION_SALT)?;
            ensure!(decode_answer(&again, ENCRYPTION_SALT)? == answer, "cipher drifted");
            answers.push(UserAnswer {
                question_id: question.id.clone(),
                answer,
            });
        }
        book.record(QuizAttempt {
            quiz_id: quiz.id.clone(),
            timestamp: ctx.seed,
            answers,
        })?;

        let stored = book.current_answers(&quiz.id)?;
        match review(quiz, &stored, "wrong password") {
            Err(QuizError::WrongPassword) => {}
            other => bail!("{} accepted a wrong password: {other:?}", quiz.id),
        }
        let Some((_, password)) = passwords.iter().find(|(id, _)| *id == quiz.id) else {
            continue;
        };
        ensure!(is_password_correct(password, Some(quiz)), "{} password rejected", quiz.id);
        let lines = review(quiz, &stored, password)?;
        ensure!(
            lines.iter().all(|l| l.is_correct),
            "{} review marked a correct answer wrong",
            quiz.id
        );
    }
    ensure!(is_password_correct("17mai", None), "legacy password rejected");
    ensure!(store.raw(KEY_QUIZ_ATTEMPTS).is_some(), "attempts not persisted");
    Ok(())
}

fn persistence_recovery(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let store = MemoryStore::default();
    let mut rng = ctx.rng();
    for (key, junk) in [
        (KEY_BOARD_GAME_STATE, "{\"spaces\": []}"),
        (KEY_USED_TRIVIA, "42"),
        (KEY_BINGO_SIZE, "\"7x7\""),
        (KEY_QUIZ_ATTEMPTS, "not json"),
        (KEY_THEME, "\"neon\""),
    ] {
        store.insert_raw(key, junk);
    }

    let game = BoardGame::open(Repository::new(store.clone()), ctx.config.clone(), &mut rng)?;
    ensure!(game.state().players.is_empty(), "recovered game has players");
    ensure!(game.state().is_consistent(), "recovered board is inconsistent");
    ensure!(game.deck().used().is_empty(), "recovered deck is not fresh");

    let bingo = BingoSession::open(Repository::new(store.clone()))?;
    ensure!(bingo.size() == BoardSize::ThreeByThree, "bad size did not fall back");

    let book = QuizBook::new(Repository::new(store.clone()));
    ensure!(book.log()?.is_empty(), "corrupt attempt log survived");
    ensure!(load_theme(&Repository::new(store))? == Theme::Light, "bad theme survived");
    Ok(())
}
