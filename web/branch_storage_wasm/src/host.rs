//! Host ports over `web-sys`.

use crate::utils::describe;
use branch_storage::host::{CookieHost, WebStorageHost};
use branch_storage::{HostError, HostResult};
use wasm_bindgen::JsValue;
use web_sys::{HtmlDocument, Navigator, Storage};

fn host_error(err: JsValue) -> HostError {
    HostError::new(describe(&err))
}

/// A DOM `Storage` object (`sessionStorage` or `localStorage`).
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// Wraps a `Storage` handle.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl WebStorageHost for BrowserStorage {
    fn get_item(&self, key: &str) -> HostResult<Option<String>> {
        self.storage.get_item(key).map_err(host_error)
    }

    fn set_item(&self, key: &str, value: &str) -> HostResult<()> {
        self.storage.set_item(key, value).map_err(host_error)
    }

    fn remove_item(&self, key: &str) -> HostResult<()> {
        self.storage.remove_item(key).map_err(host_error)
    }

    fn keys(&self) -> HostResult<Vec<String>> {
        let len = self.storage.length().map_err(host_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.storage.key(index).map_err(host_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// `document.cookie` of an HTML document.
#[derive(Debug, Clone)]
pub struct DocumentCookies {
    document: HtmlDocument,
    navigator: Navigator,
}

impl DocumentCookies {
    /// Wraps a document. `navigator` supplies the `cookieEnabled` flag.
    pub fn new(document: HtmlDocument, navigator: Navigator) -> Self {
        Self {
            document,
            navigator,
        }
    }
}

impl CookieHost for DocumentCookies {
    fn enabled(&self) -> bool {
        self.navigator.cookie_enabled()
    }

    fn read(&self) -> HostResult<String> {
        self.document.cookie().map_err(host_error)
    }

    fn write(&self, assignment: &str) -> HostResult<()> {
        self.document.set_cookie(assignment).map_err(host_error)
    }
}
