//! Error types for WASM bindings.

use crate::utils::describe;
use branch_storage::StorageError;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors thrown to JavaScript.
#[derive(Debug, Error)]
pub enum WasmError {
    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// JavaScript error occurred.
    #[error("JS error: {0}")]
    JsError(String),
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<JsValue> for WasmError {
    fn from(val: JsValue) -> Self {
        WasmError::JsError(describe(&val))
    }
}

impl From<StorageError> for WasmError {
    fn from(err: StorageError) -> Self {
        WasmError::Storage(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for WasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WasmError::InvalidInput(err.to_string())
    }
}

/// Result type for WASM operations.
pub type WasmResult<T> = Result<T, WasmError>;
