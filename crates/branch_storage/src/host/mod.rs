//! Host ports: the browser objects the adapters talk to.
//!
//! Adapters never touch `window` or `document` directly. They go through the
//! two traits defined here, which the wasm crate implements over `web-sys`
//! and the [`memory`] module implements in plain Rust for tests and native
//! builds.
//!
//! Browser handles are not `Send`, so ports are shared as `Rc<dyn ...>` and
//! the whole crate assumes the single-threaded event-loop model.

pub mod memory;

use crate::error::HostResult;
use std::fmt;
use std::rc::Rc;

pub use memory::{MemoryCookieJar, MemoryTable, MemoryWebStorage};

/// The DOM `Storage` interface (`sessionStorage` / `localStorage`).
///
/// Every method may fail: private-browsing modes throw on write, quota can be
/// exhausted, and some embedders throw `SecurityError` on any access.
pub trait WebStorageHost {
    /// Reads the value stored under the physical `key`.
    fn get_item(&self, key: &str) -> HostResult<Option<String>>;

    /// Stores `value` under the physical `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> HostResult<()>;

    /// Removes the physical `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> HostResult<()>;

    /// Lists every physical key currently stored, owned or not.
    fn keys(&self) -> HostResult<Vec<String>>;
}

/// The `document.cookie` accessor pair.
///
/// Reading returns every cookie visible to the document as one
/// `name=value; name=value` string. Writing takes a single assignment such
/// as `name=value; path=/` and only affects the named cookie.
pub trait CookieHost {
    /// Advisory switch (`navigator.cookieEnabled`).
    fn enabled(&self) -> bool {
        true
    }

    /// Returns the raw cookie string.
    fn read(&self) -> HostResult<String>;

    /// Performs one cookie assignment.
    fn write(&self, assignment: &str) -> HostResult<()>;
}

/// The set of hosts available to a [`BranchStorage`](crate::BranchStorage).
///
/// A host that is `None` makes the matching backend unavailable without
/// probing. The in-memory table is always present; hand the same table to two
/// environments to make their in-memory backends share data.
#[derive(Clone, Default)]
pub struct Environment {
    session: Option<Rc<dyn WebStorageHost>>,
    local: Option<Rc<dyn WebStorageHost>>,
    cookies: Option<Rc<dyn CookieHost>>,
    memory: MemoryTable,
}

impl Environment {
    /// Creates an environment with no browser hosts and a fresh memory table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `sessionStorage` host.
    #[must_use]
    pub fn with_session(mut self, host: Rc<dyn WebStorageHost>) -> Self {
        self.session = Some(host);
        self
    }

    /// Sets the `localStorage` host.
    #[must_use]
    pub fn with_local(mut self, host: Rc<dyn WebStorageHost>) -> Self {
        self.local = Some(host);
        self
    }

    /// Sets the `document.cookie` host.
    #[must_use]
    pub fn with_cookies(mut self, host: Rc<dyn CookieHost>) -> Self {
        self.cookies = Some(host);
        self
    }

    /// Replaces the in-memory table.
    #[must_use]
    pub fn with_memory(mut self, table: MemoryTable) -> Self {
        self.memory = table;
        self
    }

    /// Returns the `sessionStorage` host, if any.
    pub fn session(&self) -> Option<&Rc<dyn WebStorageHost>> {
        self.session.as_ref()
    }

    /// Returns the `localStorage` host, if any.
    pub fn local(&self) -> Option<&Rc<dyn WebStorageHost>> {
        self.local.as_ref()
    }

    /// Returns the cookie host, if any.
    pub fn cookies(&self) -> Option<&Rc<dyn CookieHost>> {
        self.cookies.as_ref()
    }

    /// Returns the in-memory table.
    pub fn memory(&self) -> &MemoryTable {
        &self.memory
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("session", &self.session.is_some())
            .field("local", &self.local.is_some())
            .field("cookies", &self.cookies.is_some())
            .field("memory_entries", &self.memory.len())
            .finish()
    }
}
