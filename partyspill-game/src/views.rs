//! Named views and the navigation capability handed to the engines.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "view", content = "quizId")]
pub enum View {
    Home,
    PriceWheel,
    PunishmentWheel,
    RulesWheel,
    MusicBingo,
    Quiz(Option<String>),
    BoardGame,
}

impl View {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::PriceWheel => "/price-wheel".to_string(),
            Self::PunishmentWheel => "/punishment-wheel".to_string(),
            Self::RulesWheel => "/rules-wheel".to_string(),
            Self::MusicBingo => "/music-bingo".to_string(),
            Self::Quiz(None) => "/quiz".to_string(),
            Self::Quiz(Some(id)) => format!("/quiz/{id}"),
            Self::BoardGame => "/board-game".to_string(),
        }
    }

    /// Resolve a route path. Trailing slashes and a leading `#` are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_start_matches('#');
        let trimmed = trimmed.trim_end_matches('/');
        let view = match trimmed {
            "" => Self::Home,
            "/price-wheel" => Self::PriceWheel,
            "/punishment-wheel" => Self::PunishmentWheel,
            "/rules-wheel" => Self::RulesWheel,
            "/music-bingo" => Self::MusicBingo,
            "/quiz" => Self::Quiz(None),
            "/board-game" => Self::BoardGame,
            other => {
                let id = other.strip_prefix("/quiz/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Self::Quiz(Some(id.to_string()))
            }
        };
        Some(view)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Something that can switch the visible view.
pub trait Navigator {
    fn navigate(&mut self, view: View);
}

/// Records every navigation; handy for headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNavigator {
    pub visited: Vec<View>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, view: View) {
        self.visited.push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_roundtrip() {
        let views = [
            View::Home,
            View::PriceWheel,
            View::PunishmentWheel,
            View::RulesWheel,
            View::MusicBingo,
            View::Quiz(None),
            View::Quiz(Some("norway-quiz".to_string())),
            View::BoardGame,
        ];
        for view in views {
            assert_eq!(View::from_path(&view.path()), Some(view));
        }
    }

    #[test]
    fn hash_prefixed_and_trailing_slash_paths_resolve() {
        assert_eq!(View::from_path("#/board-game"), Some(View::BoardGame));
        assert_eq!(View::from_path("/music-bingo/"), Some(View::MusicBingo));
        assert_eq!(View::from_path("#/"), Some(View::Home));
    }

    #[test]
    fn unknown_paths_are_rejected() {
        assert_eq!(View::from_path("/casino"), None);
        assert_eq!(View::from_path("/quiz/a/b"), None);
    }
}
