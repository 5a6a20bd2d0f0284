//! Typed snapshots on top of a flat key-value store.
//!
//! Every persisted concern has its own key. Loads treat a missing value and
//! a value that no longer parses the same way: both come back as `None`,
//! and the caller starts fresh.
use crate::bingo::{BingoSquare, BoardSize};
use crate::board::BoardGameState;
use crate::constants::{
    KEY_BINGO_BOARD_PREFIX, KEY_BINGO_SIZE, KEY_BINGO_USER_ID, KEY_BOARD_GAME_STATE,
    KEY_QUIZ_ATTEMPTS, KEY_THEME, KEY_USED_TRIVIA,
};
use crate::quiz::{AttemptLog, QuestionRef};
use crate::theme::Theme;
use crate::{KeyValueStore, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::rc::Rc;

/// In-memory store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Write a raw value, bypassing serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

fn backend<E: std::error::Error + Send + Sync + 'static>(err: E) -> StorageError {
    StorageError::Backend(Box::new(err))
}

/// Typed access to every persisted snapshot.
#[derive(Debug, Clone, Default)]
pub struct Repository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load and parse `key`; unparseable values are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key).map_err(backend)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                log::warn!("ignoring malformed snapshot {key}: {err}");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if serialization or the storage backend fails.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).map_err(backend)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove(key).map_err(backend)
    }

    #[must_use]
    pub fn bingo_board_key(size: BoardSize) -> String {
        format!("{KEY_BINGO_BOARD_PREFIX}{}", size.tag())
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_bingo_user_id(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .load::<String>(KEY_BINGO_USER_ID)?
            .filter(|id| !id.trim().is_empty()))
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_bingo_user_id(&self, id: &str) -> Result<(), StorageError> {
        self.save(KEY_BINGO_USER_ID, id)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_bingo_size(&self) -> Result<Option<BoardSize>, StorageError> {
        self.load(KEY_BINGO_SIZE)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_bingo_size(&self, size: BoardSize) -> Result<(), StorageError> {
        self.save(KEY_BINGO_SIZE, &size)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_bingo_board(
        &self,
        size: BoardSize,
    ) -> Result<Option<Vec<BingoSquare>>, StorageError> {
        self.load(&Self::bingo_board_key(size))
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_bingo_board(
        &self,
        size: BoardSize,
        board: &[BingoSquare],
    ) -> Result<(), StorageError> {
        self.save(&Self::bingo_board_key(size), board)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_board_game(&self) -> Result<Option<BoardGameState>, StorageError> {
        self.load(KEY_BOARD_GAME_STATE)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_board_game(&self, state: &BoardGameState) -> Result<(), StorageError> {
        self.save(KEY_BOARD_GAME_STATE, state)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_used_trivia(&self) -> Result<Option<BTreeSet<QuestionRef>>, StorageError> {
        self.load(KEY_USED_TRIVIA)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_used_trivia(&self, used: &BTreeSet<QuestionRef>) -> Result<(), StorageError> {
        self.save(KEY_USED_TRIVIA, used)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn clear_used_trivia(&self) -> Result<(), StorageError> {
        self.clear(KEY_USED_TRIVIA)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_quiz_attempts(&self) -> Result<Option<AttemptLog>, StorageError> {
        self.load(KEY_QUIZ_ATTEMPTS)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_quiz_attempts(&self, log: &AttemptLog) -> Result<(), StorageError> {
        self.save(KEY_QUIZ_ATTEMPTS, log)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn load_theme(&self) -> Result<Option<Theme>, StorageError> {
        self.load(KEY_THEME)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.save(KEY_THEME, &theme)
    }
}
