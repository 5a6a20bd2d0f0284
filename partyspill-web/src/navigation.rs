//! Hash-based routing between views.
use crate::dom::{js_error_message, window};
use partyspill_game::{Navigator, View};

/// Navigates by rewriting `location.hash`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashNavigator;

impl Navigator for HashNavigator {
    fn navigate(&mut self, view: View) {
        let Some(win) = window() else {
            log::warn!("no window; cannot navigate to {view}");
            return;
        };
        if let Err(err) = win.location().set_hash(&hash_for(&view)) {
            log::warn!("navigation to {view} failed: {}", js_error_message(&err));
        }
    }
}

/// Hash fragment for a view, e.g. `#/board-game`.
#[must_use]
pub fn hash_for(view: &View) -> String {
    format!("#{}", view.path())
}

/// View named by the current `location.hash`, home when absent or unknown.
#[must_use]
pub fn current_view() -> View {
    window()
        .and_then(|win| win.location().hash().ok())
        .and_then(|hash| View::from_path(&hash))
        .unwrap_or(View::Home)
}
