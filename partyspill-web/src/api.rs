//! JavaScript-facing handles over the game crate.
//!
//! Every handle reads and writes `localStorage` through [`LocalStore`], so a
//! page reload picks up where the table left off.
use crate::dom::{apply_theme, to_js_error};
use crate::navigation::{HashNavigator, current_view};
use crate::storage::LocalStore;
use partyspill_game::quiz::{QuizBook, QuizCategory, categories, quiz_by_id, quizzes, review};
use partyspill_game::theme::{load_theme, toggle_theme};
use partyspill_game::{
    BingoSession, BoardConfig, BoardGame, BoardSize, Navigator, QuizError, QuizRun, Repository,
    UserAnswer, View, WheelKind, spin,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

type JsResult<T> = Result<T, JsValue>;

fn repo() -> Repository<LocalStore> {
    Repository::new(LocalStore)
}

/// Flattened fields must come out as plain objects, not `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(to_js_error)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> JsResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

/// Items of a wheel (`"price"`, `"punishment"` or `"rules"`).
///
/// # Errors
///
/// Returns an error for an unknown wheel name.
#[wasm_bindgen(js_name = wheelItems)]
pub fn wheel_items(kind: JsValue) -> JsResult<JsValue> {
    let kind: WheelKind = from_js(kind)?;
    to_js(kind.items())
}

/// Pick a result and the rotation that lands on it; `null` for an empty wheel.
///
/// # Errors
///
/// Returns an error for an unknown wheel name.
#[wasm_bindgen(js_name = spinWheel)]
pub fn spin_wheel(kind: JsValue) -> JsResult<JsValue> {
    let kind: WheelKind = from_js(kind)?;
    let result = spin(kind.items(), &mut rand::thread_rng());
    to_js(&result)
}

#[wasm_bindgen]
pub struct BingoHandle {
    session: BingoSession<LocalStore>,
}

#[wasm_bindgen]
impl BingoHandle {
    /// # Errors
    ///
    /// Returns an error if `localStorage` is unusable.
    #[wasm_bindgen(constructor)]
    pub fn open() -> JsResult<BingoHandle> {
        let session = BingoSession::open(repo()).map_err(to_js_error)?;
        Ok(Self { session })
    }

    /// # Errors
    ///
    /// Returns an error if the board cannot be converted.
    pub fn board(&self) -> JsResult<JsValue> {
        to_js(self.session.board())
    }

    #[must_use]
    pub fn size(&self) -> String {
        self.session.size().tag().to_string()
    }

    #[wasm_bindgen(js_name = userId)]
    #[must_use]
    pub fn user_id(&self) -> String {
        self.session.user_id().to_string()
    }

    /// Switch size; unknown tags fall back to 3x3.
    ///
    /// # Errors
    ///
    /// Returns an error if `localStorage` is unusable.
    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, tag: &str) -> JsResult<()> {
        self.session
            .set_size(BoardSize::parse(tag))
            .map_err(to_js_error)
    }

    /// # Errors
    ///
    /// Returns an error if `localStorage` is unusable.
    pub fn toggle(&mut self, id: usize) -> JsResult<bool> {
        self.session.toggle(id).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = hasBingo)]
    #[must_use]
    pub fn has_bingo(&self) -> bool {
        self.session.has_bingo()
    }
}

/// Quiz categories and quizzes, answers still obfuscated.
///
/// # Errors
///
/// Returns an error if the catalog cannot be converted.
#[wasm_bindgen(js_name = quizCatalog)]
pub fn quiz_catalog() -> JsResult<JsValue> {
    #[derive(Serialize)]
    struct Catalog {
        categories: &'static [QuizCategory],
        quizzes: &'static [partyspill_game::Quiz],
    }
    to_js(&Catalog {
        categories: categories(),
        quizzes: quizzes(),
    })
}

/// Answers from the latest stored attempt of `quiz_id`.
///
/// # Errors
///
/// Returns an error if `localStorage` is unusable.
#[wasm_bindgen(js_name = quizCurrentAnswers)]
pub fn quiz_current_answers(quiz_id: &str) -> JsResult<JsValue> {
    let answers = QuizBook::new(repo())
        .current_answers(quiz_id)
        .map_err(to_js_error)?;
    to_js(&answers)
}

/// Store a finished attempt stamped with the current time.
///
/// # Errors
///
/// Returns an error for malformed answers or if `localStorage` is unusable.
#[wasm_bindgen(js_name = quizRecordAttempt)]
pub fn quiz_record_attempt(quiz_id: &str, answers: JsValue) -> JsResult<()> {
    let answers: Vec<UserAnswer> = from_js(answers)?;
    let attempt = partyspill_game::QuizAttempt {
        quiz_id: quiz_id.to_string(),
        timestamp: now_ms(),
        answers,
    };
    QuizBook::new(repo()).record(attempt).map_err(to_js_error)
}

/// Review the latest attempt; the error message is shown inline on a wrong password.
///
/// # Errors
///
/// Returns an error for an unknown quiz, a wrong password or storage failure.
#[wasm_bindgen(js_name = quizReview)]
pub fn quiz_review(quiz_id: &str, password: &str) -> JsResult<JsValue> {
    let quiz = quiz_by_id(quiz_id)
        .ok_or_else(|| to_js_error(QuizError::UnknownQuiz(quiz_id.to_string())))?;
    let answers = QuizBook::new(repo())
        .current_answers(quiz_id)
        .map_err(to_js_error)?;
    let lines = review(quiz, &answers, password).map_err(to_js_error)?;
    to_js(&lines)
}

/// One pass through a quiz, resumed from the latest stored answers.
#[wasm_bindgen]
pub struct QuizRunHandle {
    run: QuizRun<'static>,
}

#[wasm_bindgen]
impl QuizRunHandle {
    /// # Errors
    ///
    /// Returns an error for an unknown quiz or if `localStorage` is unusable.
    #[wasm_bindgen(constructor)]
    pub fn new(quiz_id: &str) -> JsResult<QuizRunHandle> {
        let quiz = quiz_by_id(quiz_id)
            .ok_or_else(|| to_js_error(QuizError::UnknownQuiz(quiz_id.to_string())))?;
        let answers = QuizBook::new(repo())
            .current_answers(quiz_id)
            .map_err(to_js_error)?;
        Ok(Self {
            run: QuizRun::resume(quiz, answers),
        })
    }

    /// The current question, `undefined` for an empty quiz.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be converted.
    pub fn question(&self) -> JsResult<JsValue> {
        self.run
            .current_question()
            .map_or(Ok(JsValue::UNDEFINED), to_js)
    }

    #[wasm_bindgen(js_name = currentIndex)]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.run.current_index()
    }

    #[wasm_bindgen(js_name = currentAnswer)]
    #[must_use]
    pub fn current_answer(&self) -> Option<String> {
        self.run.current_answer().map(str::to_string)
    }

    pub fn answer(&mut self, text: &str) {
        self.run.answer(text);
    }

    pub fn next(&mut self) -> bool {
        self.run.next()
    }

    pub fn prev(&mut self) -> bool {
        self.run.prev()
    }

    #[wasm_bindgen(js_name = isCompleted)]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.run.is_completed()
    }

    /// Store the attempt stamped with the current time and close the run.
    ///
    /// # Errors
    ///
    /// Returns an error if `localStorage` is unusable.
    pub fn finish(&mut self) -> JsResult<JsValue> {
        let attempt = self
            .run
            .finish(&QuizBook::new(repo()), now_ms())
            .map_err(to_js_error)?;
        to_js(&attempt)
    }

    pub fn restart(&mut self) {
        self.run.restart();
    }
}

#[wasm_bindgen]
pub struct BoardGameHandle {
    game: BoardGame<LocalStore>,
    rng: StdRng,
}

#[wasm_bindgen]
impl BoardGameHandle {
    /// Open the saved game; `config_json` overrides the default tuning.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid config or if `localStorage` is unusable.
    #[wasm_bindgen(constructor)]
    pub fn open(config_json: Option<String>) -> JsResult<BoardGameHandle> {
        let config = match config_json {
            Some(json) => BoardConfig::from_json(&json).map_err(to_js_error)?,
            None => BoardConfig::default(),
        };
        let mut rng = StdRng::from_entropy();
        let game = BoardGame::open(repo(), config, &mut rng).map_err(to_js_error)?;
        Ok(Self { game, rng })
    }

    /// # Errors
    ///
    /// Returns an error if the state cannot be converted.
    pub fn state(&self) -> JsResult<JsValue> {
        to_js(self.game.state())
    }

    /// # Errors
    ///
    /// Returns an error if the phase cannot be converted.
    pub fn phase(&self) -> JsResult<JsValue> {
        to_js(&self.game.phase())
    }

    /// # Errors
    ///
    /// Fails after the game started, for a blank name, or on storage failure.
    #[wasm_bindgen(js_name = addPlayer)]
    pub fn add_player(&mut self, name: &str) -> JsResult<JsValue> {
        let player = self
            .game
            .add_player(name, &mut self.rng)
            .map_err(to_js_error)?;
        to_js(player)
    }

    /// # Errors
    ///
    /// Fails after the game started, for an unknown id, or on storage failure.
    #[wasm_bindgen(js_name = removePlayer)]
    pub fn remove_player(&mut self, player_id: &str) -> JsResult<()> {
        self.game
            .remove_player(player_id)
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// # Errors
    ///
    /// Fails with too few players or on storage failure.
    pub fn start(&mut self) -> JsResult<()> {
        self.game.start().map_err(to_js_error)
    }

    /// Roll, move and resolve one turn. When `navigate` is set, start and
    /// wheel events also switch the page to their wheel.
    ///
    /// # Errors
    ///
    /// Fails before the game starts or on storage failure.
    #[wasm_bindgen(js_name = takeTurn)]
    pub fn take_turn(&mut self, navigate: bool) -> JsResult<JsValue> {
        let outcome = self.game.take_turn(&mut self.rng).map_err(to_js_error)?;
        if navigate {
            outcome.follow(&mut HashNavigator);
        }
        to_js(&outcome)
    }

    /// # Errors
    ///
    /// Returns an error if `localStorage` is unusable.
    pub fn reset(&mut self) -> JsResult<()> {
        self.game.reset(&mut self.rng).map_err(to_js_error)
    }
}

/// Current theme name, applied to the document.
///
/// # Errors
///
/// Returns an error if `localStorage` is unusable.
#[wasm_bindgen(js_name = currentTheme)]
pub fn current_theme() -> JsResult<String> {
    let theme = load_theme(&repo()).map_err(to_js_error)?;
    apply_theme(theme.as_str());
    Ok(theme.as_str().to_string())
}

/// # Errors
///
/// Returns an error if `localStorage` is unusable.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme_js() -> JsResult<String> {
    let theme = toggle_theme(&repo()).map_err(to_js_error)?;
    apply_theme(theme.as_str());
    Ok(theme.as_str().to_string())
}

/// # Errors
///
/// Returns an error if the view cannot be converted.
#[wasm_bindgen(js_name = currentView)]
pub fn current_view_js() -> JsResult<JsValue> {
    to_js(&current_view())
}

/// Navigate to a view given in its serialized form, e.g. `{"view": "board-game"}`.
///
/// # Errors
///
/// Returns an error for an unknown view.
#[wasm_bindgen(js_name = navigateTo)]
pub fn navigate_to(view: JsValue) -> JsResult<()> {
    let view: View = from_js(view)?;
    HashNavigator.navigate(view);
    Ok(())
}
