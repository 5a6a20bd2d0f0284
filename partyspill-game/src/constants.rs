//! Centralized tuning constants for Partyspill game logic.
//!
//! Storage keys, palettes and the fixed parameters of the seeded generators
//! live here so that stored snapshots and generated boards only change
//! through reviewed code changes.

// Storage keys -------------------------------------------------------------
pub const KEY_BINGO_USER_ID: &str = "bingoUserId";
pub const KEY_BINGO_SIZE: &str = "bingoSize";
pub const KEY_BINGO_BOARD_PREFIX: &str = "bingoBoard-";
pub const KEY_BOARD_GAME_STATE: &str = "boardGameState";
pub const KEY_USED_TRIVIA: &str = "usedTriviaQuestions";
pub const KEY_QUIZ_ATTEMPTS: &str = "quizAttempts";
pub const KEY_THEME: &str = "theme";

// Seeded LCG ---------------------------------------------------------------
pub(crate) const LCG_MULTIPLIER: u64 = 9301;
pub(crate) const LCG_INCREMENT: u64 = 49297;
pub(crate) const LCG_MODULUS: u64 = 233_280;
pub(crate) const STRING_HASH_MULTIPLIER: i32 = 31;

// Wheel spin ---------------------------------------------------------------
pub(crate) const WHEEL_FULL_TURN_DEGREES: f64 = 360.0;
pub(crate) const WHEEL_EXTRA_TURNS: f64 = 5.0;
pub(crate) const WHEEL_OFFSET_FRACTION: f64 = 0.7;

// Quiz ---------------------------------------------------------------------
pub const ENCRYPTION_SALT: &str = "NorwegianQuiz2025";
pub const LEGACY_QUIZ_PASSWORD: &str = "17mai";
pub const WRONG_PASSWORD_MESSAGE: &str = "Feil passord. Prøv igjen.";

// Board game ---------------------------------------------------------------
pub const DIE_FACES: u8 = 6;
pub const DEFAULT_LOOP_LENGTH: usize = 32;
pub const DEFAULT_MIN_PLAYERS: usize = 2;
pub const DEFAULT_SIPS_MIN: u8 = 1;
pub const DEFAULT_SIPS_MAX: u8 = 3;
pub const MAX_PLAYER_NAME_CHARS: usize = 20;
pub const START_SPACE_COLOR: &str = "checkered";
pub const SPACE_COLORS: [&str; 3] = ["#BA0C2F", "#FFFFFF", "#00205B"];
pub const PLAYER_COLORS: [&str; 8] = [
    "#FF5252", "#4CAF50", "#2196F3", "#FFC107", "#9C27B0", "#FF9800", "#795548", "#607D8B",
];
pub const TRIVIA_FORFEIT_RULE: &str = "No questions left - take 2 sips instead!";
