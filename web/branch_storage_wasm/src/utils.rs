//! Utility functions for WASM setup and JS interop.

use wasm_bindgen::{JsCast, JsValue};

/// Sets up the panic hook for better error messages.
///
/// Called automatically when the WASM module initializes.
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Renders a thrown JS value as text.
///
/// `DOMException` and other `Error` objects yield `"Name: message"`; strings
/// are returned as-is.
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    format!("{value:?}")
}
