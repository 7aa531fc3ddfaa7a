//! Backend adapters.
//!
//! Each adapter turns one host mechanism into the same five-operation
//! contract. The contract, for every adapter:
//!
//! - `get` returns `None` for a missing or unowned key and never fails
//! - `set` then `get` of the same key returns the value just written
//! - `remove` of a missing key succeeds
//! - `clear` removes owned entries only; other data sharing the host is kept
//! - `get_all` returns every owned entry under its logical key
//!
//! # Implementors
//!
//! - [`WebStorageAdapter`] - `sessionStorage` and `localStorage`, prefixed keys
//! - [`CookieAdapter`] - `document.cookie`, allow-listed names
//! - [`InMemoryAdapter`] - a [`MemoryTable`](crate::host::MemoryTable), prefixed keys

mod cookie;
mod memory;
mod prefix;
mod web;

pub use cookie::CookieAdapter;
pub use memory::InMemoryAdapter;
pub use prefix::KeyPrefix;
pub use web::WebStorageAdapter;

use crate::config::StorageConfig;
use crate::error::StorageResult;
use crate::host::Environment;
use crate::kind::BackendKind;
use std::collections::HashMap;

/// Logical key to value, as returned by `get_all`.
pub type Entries = HashMap<String, String>;

/// The capability set shared by all backends.
pub trait StorageAdapter {
    /// Which backend this adapter drives.
    fn kind(&self) -> BackendKind;

    /// Reads the value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the write or, for cookies, if
    /// `key` is empty.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the removal.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Removes every owned entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot be enumerated or rejects a removal.
    fn clear(&self) -> StorageResult<()>;

    /// Returns every owned entry.
    fn get_all(&self) -> Entries;

    /// Runs a write/read/remove round trip on a throwaway `marker` key.
    ///
    /// The marker is removed on every path out of the probe.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ProbeFailed`](crate::StorageError::ProbeFailed)
    /// or a host error when the backend is not usable.
    fn probe(&self, marker: &str) -> StorageResult<()>;
}

/// Builds the adapter for `kind`, or `None` when the environment lacks the host.
pub fn build(
    kind: BackendKind,
    env: &Environment,
    config: &StorageConfig,
) -> Option<Box<dyn StorageAdapter>> {
    let prefix = || KeyPrefix::new(config.key_prefix.clone());
    let adapter: Box<dyn StorageAdapter> = match kind {
        BackendKind::SessionStorage => {
            Box::new(WebStorageAdapter::session(env.session()?.clone(), prefix()))
        }
        BackendKind::LocalStorage => {
            Box::new(WebStorageAdapter::local(env.local()?.clone(), prefix()))
        }
        BackendKind::Cookie => Box::new(CookieAdapter::new(
            env.cookies()?.clone(),
            config.cookie.clone(),
        )),
        BackendKind::InMemory => Box::new(InMemoryAdapter::new(env.memory().clone(), prefix())),
    };
    Some(adapter)
}
