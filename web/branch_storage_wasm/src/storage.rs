//! The JavaScript-facing `BranchStorage` class.

use crate::environment::browser_environment;
use crate::error::{WasmError, WasmResult};
use branch_storage::{BranchStorage, StorageConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A key-value store bound to the first usable browser backend.
///
/// ## Example
///
/// ```javascript
/// const storage = new BranchStorage(["session", "cookie", "pojo"]);
/// storage.set("key", "value");
/// storage.get("key");      // "value"
/// storage.get("missing");  // null
/// storage.getAll();        // { key: "value" }
/// storage.kind;            // "session"
/// storage.clear();
/// ```
#[wasm_bindgen(js_name = BranchStorage)]
pub struct JsBranchStorage {
    inner: BranchStorage,
}

impl JsBranchStorage {
    fn create(preferences: Vec<String>, config: JsValue) -> WasmResult<JsBranchStorage> {
        let config: StorageConfig = if config.is_undefined() || config.is_null() {
            StorageConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let inner = BranchStorage::with_config(preferences, &browser_environment(), config)?;
        Ok(JsBranchStorage { inner })
    }
}

#[wasm_bindgen(js_class = BranchStorage)]
impl JsBranchStorage {
    /// Creates a storage from backend tokens in preference order.
    ///
    /// Recognized tokens are `session`, `local`, `cookie` and `pojo`;
    /// anything else is skipped. `config` is an optional plain object
    /// with the `StorageConfig` fields in camelCase.
    #[wasm_bindgen(constructor)]
    pub fn new(preferences: Vec<String>, config: JsValue) -> Result<JsBranchStorage, JsValue> {
        Ok(Self::create(preferences, config)?)
    }

    /// Token of the bound backend.
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.inner.kind().token().to_string()
    }

    /// Whether the in-memory backend was bound only because nothing else
    /// was usable.
    #[wasm_bindgen(getter, js_name = isFallback)]
    pub fn is_fallback(&self) -> bool {
        self.inner.is_fallback()
    }

    /// Returns the value stored under `key`, or `null`.
    pub fn get(&self, key: &str) -> JsValue {
        self.inner
            .get(key)
            .map_or(JsValue::NULL, |value| JsValue::from_str(&value))
    }

    /// Stores `value` under `key`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), JsValue> {
        self.inner.set(key, value).map_err(|e| WasmError::from(e).into())
    }

    /// Deletes `key`.
    pub fn remove(&self, key: &str) -> Result<(), JsValue> {
        self.inner.remove(key).map_err(|e| WasmError::from(e).into())
    }

    /// Deletes every entry owned by this storage.
    pub fn clear(&self) -> Result<(), JsValue> {
        self.inner.clear().map_err(|e| WasmError::from(e).into())
    }

    /// Returns every owned entry as a plain object.
    #[wasm_bindgen(js_name = getAll)]
    pub fn get_all(&self) -> Result<JsValue, JsValue> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        self.inner
            .get_all()
            .serialize(&serializer)
            .map_err(|e| WasmError::from(e).into())
    }
}
