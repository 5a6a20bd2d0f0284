//! The party board game: a loop of typed spaces that players walk around.
//!
//! Space and player identity is positional. The whole [`BoardGameState`] is
//! persisted as one snapshot and replaced wholesale on load.
pub mod generation;
pub mod movement;
pub mod players;
pub mod session;
pub mod trivia;

pub use generation::{generate_spaces, position_for};
pub use movement::{MoveReport, advance, move_player, next_player_index, roll_die};
pub use players::{create_player, normalize_name, pick_color};
pub use session::{BoardGame, GameError, GamePhase, SpaceEvent, TurnOutcome};
pub use trivia::TriviaDeck;

use crate::config::BoardConfig;
use crate::quiz::QuestionRef;
use crate::views::View;
use crate::wheel::WheelKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fieldless space tag used for weighting and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpaceType {
    Start,
    Finish,
    Trivia,
    Chance,
    MusicBingo,
    InstantPrize,
    RandomWheel,
    Cheers,
    DrinkSips,
    GiveSips,
}

impl SpaceType {
    #[must_use]
    pub const fn is_start(self) -> bool {
        matches!(self, Self::Start | Self::Finish)
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Start | Self::Finish => "🏁",
            Self::Trivia => "❓",
            Self::Chance => "🎲",
            Self::MusicBingo => "🎵",
            Self::InstantPrize => "🎁",
            Self::RandomWheel => "🎡",
            Self::Cheers => "🥂",
            Self::DrinkSips => "🥤",
            Self::GiveSips => "👉",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Finish => "Finish",
            Self::Trivia => "Trivia",
            Self::Chance => "Chance",
            Self::MusicBingo => "Music Bingo",
            Self::InstantPrize => "Instant Prize!",
            Self::RandomWheel => "Spin a Wheel!",
            Self::Cheers => "Cheers!",
            Self::DrinkSips => "Drink Sips",
            Self::GiveSips => "Give Sips",
        }
    }
}

/// What answering a trivia space earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriviaReward {
    Prize,
    Punishment,
    None,
}

impl TriviaReward {
    pub const ALL: [Self; 3] = [Self::Prize, Self::Punishment, Self::None];
}

/// Trivia data on a space; the question is attached when someone lands there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriviaAssignment {
    #[serde(default)]
    pub question_id: Option<QuestionRef>,
    pub reward: TriviaReward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChanceOutcome {
    PriceWheel,
    PunishmentWheel,
    RulesWheel,
    TakeShot,
    GiveShot,
    PickPrize,
    BingoFreeSpot,
}

impl ChanceOutcome {
    pub const ALL: [Self; 7] = [
        Self::PriceWheel,
        Self::PunishmentWheel,
        Self::RulesWheel,
        Self::TakeShot,
        Self::GiveShot,
        Self::PickPrize,
        Self::BingoFreeSpot,
    ];

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::PriceWheel => "Go to Price Wheel",
            Self::PunishmentWheel => "Go to Punishment Wheel",
            Self::RulesWheel => "Go to Rules Wheel",
            Self::TakeShot => "Take a shot",
            Self::GiveShot => "Give a shot",
            Self::PickPrize => "Pick a prize",
            Self::BingoFreeSpot => "Bingo free spot",
        }
    }

    #[must_use]
    pub const fn destination(self) -> Option<View> {
        match self {
            Self::PriceWheel => Some(WheelKind::Price.view()),
            Self::PunishmentWheel => Some(WheelKind::Punishment.view()),
            Self::RulesWheel => Some(WheelKind::Rules.view()),
            Self::TakeShot | Self::GiveShot | Self::PickPrize | Self::BingoFreeSpot => None,
        }
    }
}

/// Wheels granted for landing exactly on start or for passing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartBonus {
    pub landed: WheelKind,
    pub passed: WheelKind,
}

impl Default for StartBonus {
    fn default() -> Self {
        Self {
            landed: WheelKind::Price,
            passed: WheelKind::Rules,
        }
    }
}

/// A space's type together with the data only that type carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SpaceKind {
    Start {
        #[serde(default)]
        special_action: StartBonus,
    },
    Finish,
    Trivia {
        trivia_question: TriviaAssignment,
    },
    Chance {
        chance_outcome: ChanceOutcome,
    },
    MusicBingo,
    InstantPrize,
    RandomWheel,
    Cheers,
    DrinkSips {
        sips_count: u8,
    },
    GiveSips {
        sips_count: u8,
    },
}

impl SpaceKind {
    #[must_use]
    pub const fn space_type(&self) -> SpaceType {
        match self {
            Self::Start { .. } => SpaceType::Start,
            Self::Finish => SpaceType::Finish,
            Self::Trivia { .. } => SpaceType::Trivia,
            Self::Chance { .. } => SpaceType::Chance,
            Self::MusicBingo => SpaceType::MusicBingo,
            Self::InstantPrize => SpaceType::InstantPrize,
            Self::RandomWheel => SpaceType::RandomWheel,
            Self::Cheers => SpaceType::Cheers,
            Self::DrinkSips { .. } => SpaceType::DrinkSips,
            Self::GiveSips { .. } => SpaceType::GiveSips,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSpace {
    pub id: usize,
    #[serde(flatten)]
    pub kind: SpaceKind,
    pub color: String,
    pub position: Position,
    pub icon: String,
    pub label: String,
}

impl GameSpace {
    #[must_use]
    pub const fn space_type(&self) -> SpaceType {
        self.kind.space_type()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: usize,
    pub color: String,
}

/// The whole game, persisted and restored as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardGameState {
    pub spaces: Vec<GameSpace>,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub game_started: bool,
}

impl BoardGameState {
    /// Freshly generated board with no players.
    pub fn fresh<R: Rng + ?Sized>(cfg: &BoardConfig, rng: &mut R) -> Self {
        Self {
            spaces: generate_spaces(cfg, rng),
            players: Vec::new(),
            current_player_index: 0,
            game_started: false,
        }
    }

    #[must_use]
    pub fn loop_length(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn start_bonus(&self) -> StartBonus {
        match self.spaces.first().map(|space| &space.kind) {
            Some(SpaceKind::Start { special_action }) => *special_action,
            _ => StartBonus::default(),
        }
    }

    /// Structural checks applied to restored snapshots.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let len = self.spaces.len();
        if len < 2 {
            return false;
        }
        if !self.spaces[0].space_type().is_start() {
            return false;
        }
        let starts = self
            .spaces
            .iter()
            .filter(|space| space.space_type().is_start())
            .count();
        if starts != 1 {
            return false;
        }
        if self.spaces.iter().enumerate().any(|(idx, space)| space.id != idx) {
            return false;
        }
        if self.players.iter().any(|player| player.position >= len) {
            return false;
        }
        if self.game_started {
            self.current_player_index < self.players.len()
        } else {
            self.current_player_index < self.players.len().max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn fresh_state() -> BoardGameState {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        BoardGameState::fresh(&BoardConfig::default(), &mut rng)
    }

    #[test]
    fn space_json_keeps_flat_shape() {
        let space = GameSpace {
            id: 3,
            kind: SpaceKind::DrinkSips { sips_count: 2 },
            color: "#FFFFFF".to_string(),
            position: Position { x: 3, y: 0 },
            icon: SpaceType::DrinkSips.icon().to_string(),
            label: SpaceType::DrinkSips.label().to_string(),
        };
        let json = serde_json::to_value(&space).unwrap();
        assert_eq!(json["type"], "drink-sips");
        assert_eq!(json["sipsCount"], 2);
        assert_eq!(json["position"]["x"], 3);
        let back: GameSpace = serde_json::from_value(json).unwrap();
        assert_eq!(back, space);
    }

    #[test]
    fn state_snapshot_roundtrips_verbatim() {
        let state = fresh_state();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"currentPlayerIndex\":0"));
        assert!(json.contains("\"gameStarted\":false"));
        let back: BoardGameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn consistency_rejects_broken_snapshots() {
        let state = fresh_state();
        assert!(state.is_consistent());

        let mut no_start = state.clone();
        no_start.spaces[0].kind = SpaceKind::Cheers;
        assert!(!no_start.is_consistent());

        let mut two_starts = state.clone();
        two_starts.spaces[5].kind = SpaceKind::Finish;
        assert!(!two_starts.is_consistent());

        let mut stray_player = state.clone();
        stray_player.players.push(Player {
            id: "p".to_string(),
            name: "Kari".to_string(),
            position: 999,
            color: "#FF5252".to_string(),
        });
        assert!(!stray_player.is_consistent());

        let mut started_empty = state;
        started_empty.game_started = true;
        assert!(!started_empty.is_consistent());
    }

    #[test]
    fn chance_destinations_only_for_wheels() {
        let with_destination = ChanceOutcome::ALL
            .iter()
            .filter(|o| o.destination().is_some())
            .count();
        assert_eq!(with_destination, 3);
        assert_eq!(ChanceOutcome::RulesWheel.destination(), Some(View::RulesWheel));
    }

    #[test]
    fn start_bonus_defaults_when_missing_from_json() {
        let json = r#"{"type":"start"}"#;
        let kind: SpaceKind = serde_json::from_str(json).unwrap();
        assert_eq!(
            kind,
            SpaceKind::Start {
                special_action: StartBonus::default()
            }
        );
    }
}
