//! Persistent board-game session: setup, turns and reset.
use super::movement::{MoveReport, advance, next_player_index, roll_die};
use super::players::create_player;
use super::trivia::TriviaDeck;
use super::{BoardGameState, ChanceOutcome, Player, SpaceKind, TriviaReward};
use crate::config::{BoardConfig, ConfigError};
use crate::constants::{DIE_FACES, TRIVIA_FORFEIT_RULE};
use crate::quiz::QuestionRef;
use crate::storage::Repository;
use crate::views::{Navigator, View};
use crate::wheel::WheelKind;
use crate::{KeyValueStore, StorageError};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("the game has not started yet")]
    NotStarted,
    #[error("player name cannot be empty")]
    EmptyName,
    #[error("need at least {needed} players to start (have {have})")]
    NotEnoughPlayers { needed: usize, have: usize },
    #[error("no player with id {0}")]
    UnknownPlayer(String),
    #[error("a roll must be between 1 and {max} (got {steps})", max = DIE_FACES)]
    InvalidRoll { steps: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    Setup,
    Playing,
}

/// What the landing space asks of the mover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SpaceEvent {
    LandedOnStart { wheel: WheelKind },
    PassedStart { wheel: WheelKind },
    Trivia { question: QuestionRef, reward: TriviaReward },
    TriviaExhausted { rule: String },
    Chance { outcome: ChanceOutcome },
    MusicBingo,
    InstantPrize,
    RandomWheel { wheel: WheelKind },
    Cheers,
    DrinkSips { sips: u8 },
    GiveSips { sips: u8 },
    Rest,
}

impl SpaceEvent {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::LandedOnStart { wheel } => {
                format!("Landed right on start! Spin {}!", wheel.title())
            }
            Self::PassedStart { wheel } => format!("Passed start! Spin {}!", wheel.title()),
            Self::Trivia { .. } => "Answer the trivia question!".to_string(),
            Self::TriviaExhausted { rule } => rule.clone(),
            Self::Chance { outcome } => format!("Chance: {}", outcome.text()),
            Self::MusicBingo => "Music Bingo space!".to_string(),
            Self::InstantPrize => "You won an instant prize!".to_string(),
            Self::RandomWheel { wheel } => format!("Spin a random wheel: {}!", wheel.title()),
            Self::Cheers => "Cheers! Everyone drinks!".to_string(),
            Self::DrinkSips { sips } => format!("Drink {sips} sips!"),
            Self::GiveSips { sips } => format!("Give {sips} sips to another player!"),
            Self::Rest => "Start/Finish space!".to_string(),
        }
    }

    /// View the event sends the table to, if any.
    #[must_use]
    pub const fn destination(&self) -> Option<View> {
        match self {
            Self::LandedOnStart { wheel }
            | Self::PassedStart { wheel }
            | Self::RandomWheel { wheel } => Some(wheel.view()),
            Self::Chance { outcome } => outcome.destination(),
            Self::Trivia { .. }
            | Self::TriviaExhausted { .. }
            | Self::MusicBingo
            | Self::InstantPrize
            | Self::Cheers
            | Self::DrinkSips { .. }
            | Self::GiveSips { .. }
            | Self::Rest => None,
        }
    }
}

/// Everything a single turn changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub player_index: usize,
    pub player_id: String,
    pub player_name: String,
    pub movement: MoveReport,
    pub event: SpaceEvent,
    pub message: String,
    pub next_player_index: usize,
}

impl TurnOutcome {
    #[must_use]
    pub const fn destination(&self) -> Option<View> {
        self.event.destination()
    }

    /// Navigate to the event's destination; returns whether anything happened.
    pub fn follow<N: Navigator + ?Sized>(&self, navigator: &mut N) -> bool {
        match self.destination() {
            Some(view) => {
                navigator.navigate(view);
                true
            }
            None => false,
        }
    }
}

/// Board game bound to a store. Every mutation persists the full snapshot.
pub struct BoardGame<S: KeyValueStore> {
    repo: Repository<S>,
    config: BoardConfig,
    state: BoardGameState,
    deck: TriviaDeck,
}

impl<S: KeyValueStore> BoardGame<S> {
    /// Restore the saved game, or generate and save a fresh board when the
    /// snapshot is missing or inconsistent.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or the storage backend fails.
    pub fn open<R: Rng + ?Sized>(
        repo: Repository<S>,
        config: BoardConfig,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let state = match repo.load_board_game()? {
            Some(state) if state.is_consistent() => state,
            Some(_) => {
                log::warn!("discarding inconsistent board game snapshot");
                let state = BoardGameState::fresh(&config, rng);
                repo.save_board_game(&state)?;
                state
            }
            None => {
                let state = BoardGameState::fresh(&config, rng);
                log::info!("generated board with {} spaces", state.loop_length());
                repo.save_board_game(&state)?;
                state
            }
        };
        let deck = TriviaDeck::new(repo.load_used_trivia()?.unwrap_or_default());
        Ok(Self {
            repo,
            config,
            state,
            deck,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &BoardGameState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub const fn deck(&self) -> &TriviaDeck {
        &self.deck
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        if self.state.game_started {
            GamePhase::Playing
        } else {
            GamePhase::Setup
        }
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    /// Save `next` and only then make it the live state.
    fn commit(&mut self, next: BoardGameState) -> Result<(), StorageError> {
        self.repo.save_board_game(&next)?;
        self.state = next;
        Ok(())
    }

    /// Add a player at the start space.
    ///
    /// # Errors
    ///
    /// Fails once the game has started, for a blank name, or on storage failure.
    pub fn add_player<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        rng: &mut R,
    ) -> Result<&Player, GameError> {
        if self.state.game_started {
            return Err(GameError::AlreadyStarted);
        }
        let player = create_player(name, &self.state.players, rng).ok_or(GameError::EmptyName)?;
        log::info!("player {} joined with color {}", player.name, player.color);
        let mut next = self.state.clone();
        next.players.push(player);
        self.commit(next)?;
        let idx = self.state.players.len() - 1;
        Ok(&self.state.players[idx])
    }

    /// # Errors
    ///
    /// Fails once the game has started, for an unknown id, or on storage failure.
    pub fn remove_player(&mut self, player_id: &str) -> Result<Player, GameError> {
        if self.state.game_started {
            return Err(GameError::AlreadyStarted);
        }
        let idx = self
            .state
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))?;
        let mut next = self.state.clone();
        let removed = next.players.remove(idx);
        if next.current_player_index >= next.players.len() {
            next.current_player_index = 0;
        }
        self.commit(next)?;
        Ok(removed)
    }

    /// # Errors
    ///
    /// Fails if already started, with too few players, or on storage failure.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state.game_started {
            return Err(GameError::AlreadyStarted);
        }
        let have = self.state.players.len();
        let needed = self.config.min_players;
        if have < needed {
            return Err(GameError::NotEnoughPlayers { needed, have });
        }
        let mut next = self.state.clone();
        next.game_started = true;
        next.current_player_index = 0;
        self.commit(next)?;
        log::info!("game started with {have} players");
        Ok(())
    }

    /// Roll the die for the current player and play the turn.
    ///
    /// # Errors
    ///
    /// See [`Self::play_roll`].
    pub fn take_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnOutcome, GameError> {
        let steps = usize::from(roll_die(rng));
        self.play_roll(steps, rng)
    }

    /// Play a turn with a known roll.
    ///
    /// The start events are judged from the mover's position before the
    /// move. The turn is played on a copy of the state; the copy replaces
    /// the live state only once it has been saved, so a failed write leaves
    /// the game exactly as it was.
    ///
    /// # Errors
    ///
    /// Fails before the game starts, for a roll outside the die range, or on
    /// storage failure.
    pub fn play_roll<R: Rng + ?Sized>(
        &mut self,
        steps: usize,
        rng: &mut R,
    ) -> Result<TurnOutcome, GameError> {
        if !self.state.game_started {
            return Err(GameError::NotStarted);
        }
        if steps == 0 || steps > usize::from(DIE_FACES) {
            return Err(GameError::InvalidRoll { steps });
        }
        let mut next = self.state.clone();
        let mut deck = self.deck.clone();
        let player_index = next.current_player_index;
        let loop_length = next.loop_length();
        let bonus = next.start_bonus();
        let Some(player) = next.players.get_mut(player_index) else {
            return Err(GameError::NotStarted);
        };
        let movement = advance(player.position, steps, loop_length);
        player.position = movement.to;
        let player_id = player.id.clone();
        let player_name = player.name.clone();

        let event = if movement.landed_on_start {
            SpaceEvent::LandedOnStart {
                wheel: bonus.landed,
            }
        } else if movement.passed_start {
            SpaceEvent::PassedStart {
                wheel: bonus.passed,
            }
        } else {
            resolve_space(&mut next, &mut deck, movement.to, rng)
        };

        let next_player_index = next_player_index(player_index, next.players.len());
        next.current_player_index = next_player_index;
        if matches!(event, SpaceEvent::Trivia { .. }) {
            self.repo.save_used_trivia(deck.used())?;
        }
        self.commit(next)?;
        self.deck = deck;

        log::debug!(
            "{player_name} moved {} -> {} ({:?})",
            movement.from,
            movement.to,
            event
        );
        let message = event.message();
        Ok(TurnOutcome {
            player_index,
            player_id,
            player_name,
            movement,
            event,
            message,
            next_player_index,
        })
    }

    /// Throw away the current game: new board, no players, fresh trivia.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let fresh = BoardGameState::fresh(&self.config, rng);
        self.repo.clear_used_trivia()?;
        self.commit(fresh)?;
        self.deck.reset();
        log::info!("board game reset");
        Ok(())
    }
}

fn resolve_space<R: Rng + ?Sized>(
    state: &mut BoardGameState,
    deck: &mut TriviaDeck,
    index: usize,
    rng: &mut R,
) -> SpaceEvent {
    let Some(space) = state.spaces.get_mut(index) else {
        return SpaceEvent::Rest;
    };
    match &mut space.kind {
        SpaceKind::Start { .. } | SpaceKind::Finish => SpaceEvent::Rest,
        SpaceKind::Trivia { trivia_question } => match deck.draw(rng) {
            Some(question) => {
                trivia_question.question_id = Some(question.clone());
                SpaceEvent::Trivia {
                    question,
                    reward: trivia_question.reward,
                }
            }
            None => SpaceEvent::TriviaExhausted {
                rule: TRIVIA_FORFEIT_RULE.to_string(),
            },
        },
        SpaceKind::Chance { chance_outcome } => SpaceEvent::Chance {
            outcome: *chance_outcome,
        },
        SpaceKind::MusicBingo => SpaceEvent::MusicBingo,
        SpaceKind::InstantPrize => SpaceEvent::InstantPrize,
        SpaceKind::RandomWheel => SpaceEvent::RandomWheel {
            wheel: *WheelKind::ALL.choose(rng).unwrap_or(&WheelKind::Price),
        },
        SpaceKind::Cheers => SpaceEvent::Cheers,
        SpaceKind::DrinkSips { sips_count } => SpaceEvent::DrinkSips { sips: *sips_count },
        SpaceKind::GiveSips { sips_count } => SpaceEvent::GiveSips { sips: *sips_count },
    }
}
