use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Storage, Window};

#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Browser local storage, if the page is allowed to use it.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    window().and_then(|win| win.local_storage().ok().flatten())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Set `data-theme` on the root element so stylesheets can follow it.
pub fn apply_theme(theme: &str) {
    if let Some(root) = window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.document_element())
    {
        if let Err(err) = root.set_attribute("data-theme", theme) {
            log::warn!("could not apply theme: {}", js_error_message(&err));
        }
    }
}

/// Turn any displayable error into a JS exception value.
pub fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from(js_sys::Error::new(&err.to_string()))
}
