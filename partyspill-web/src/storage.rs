//! `localStorage` backend for the game repository.
use crate::dom::{js_error_message, local_storage};
use partyspill_game::KeyValueStore;
use web_sys::Storage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("localStorage error: {0}")]
    Js(String),
}

/// Key-value store over the page's `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, WebStorageError> {
        local_storage().ok_or(WebStorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| WebStorageError::Js(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| WebStorageError::Js(js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| WebStorageError::Js(js_error_message(&e)))
    }
}
