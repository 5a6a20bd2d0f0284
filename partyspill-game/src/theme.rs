//! Light/dark UI preference.
use crate::storage::Repository;
use crate::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Saved theme, or light when nothing usable is stored.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn load_theme<S: KeyValueStore>(repo: &Repository<S>) -> Result<Theme, StorageError> {
    Ok(repo.load_theme()?.unwrap_or_default())
}

/// Flip and persist the theme, returning the new value.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn toggle_theme<S: KeyValueStore>(repo: &Repository<S>) -> Result<Theme, StorageError> {
    let next = load_theme(repo)?.toggled();
    repo.save_theme(next)?;
    Ok(next)
}
