//! Partyspill Game Logic
//!
//! Platform-agnostic core for the Partyspill party toolkit: prize, punishment
//! and rules wheels, seeded music bingo, obfuscated quizzes and the party
//! board game. Nothing here touches a browser; persistence goes through the
//! [`KeyValueStore`] trait and navigation through [`views::Navigator`].

pub mod bingo;
pub mod board;
pub mod config;
pub mod constants;
pub mod quiz;
pub mod seed;
pub mod storage;
pub mod theme;
pub mod views;
pub mod wheel;

pub use bingo::{
    BingoSession, BingoSquare, BoardSize, generate_board, has_winning_line, is_valid_board,
    toggle_square,
};
pub use board::{
    BoardGame, BoardGameState, ChanceOutcome, GameError, GamePhase, GameSpace, MoveReport, Player,
    Position, SpaceEvent, SpaceKind, SpaceType, TriviaReward, TurnOutcome, advance, generate_spaces,
    move_player, roll_die,
};
pub use config::{BoardConfig, ConfigError};
pub use quiz::{
    AttemptLog, QuestionRef, Quiz, QuizAttempt, QuizBook, QuizError, QuizQuestion, QuizRun,
    UserAnswer, decode_answer, encode_answer, hash_password, is_password_correct,
};
pub use seed::{SeededLcg, string_hash};
pub use storage::{MemoryStore, Repository};
pub use theme::Theme;
pub use views::{Navigator, View};
pub use wheel::{Spin, WheelItem, WheelKind, spin};

use thiserror::Error;

/// Flat string key-value persistence, such as browser local storage.
///
/// Platform crates implement this; everything else goes through
/// [`storage::Repository`].
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot remove the key.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
