//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::config::{DEFAULT_DEVICE_NAME, DEVICE_NAME_GLOBAL};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Vertical scroll position of the page.
pub fn scroll_offset() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Scroll the page to a vertical position.
pub fn set_scroll_offset(offset: f64) {
    if let Some(window) = window() {
        window.scroll_to_with_x_and_y(0.0, offset);
    }
}

/// Send the browser to `url` (downloads and install prompts).
pub fn navigate(url: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_href(url);
    }
}

/// Device name injected by the server page, or the configured fallback.
pub fn device_name() -> String {
    window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(DEVICE_NAME_GLOBAL)).ok())
        .and_then(|v| v.as_string())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string())
}
