#![forbid(unsafe_code)]
//! Browser bindings for Partyspill: `localStorage` persistence, hash routing
//! and `wasm-bindgen` handles over the game crate.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod api;
pub mod dom;
pub mod navigation;
pub mod storage;

pub use navigation::HashNavigator;
pub use storage::{LocalStore, WebStorageError};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from(err.to_string()));
    }
    match api::current_theme() {
        Ok(theme) => log::info!("Partyspill ready ({theme} theme)"),
        Err(err) => log::warn!("theme unavailable: {}", dom::js_error_message(&err)),
    }
}
