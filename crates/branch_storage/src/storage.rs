//! The `BranchStorage` facade.

use crate::adapter::{self, Entries, InMemoryAdapter, KeyPrefix, StorageAdapter};
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::host::Environment;
use crate::kind::BackendKind;
use crate::probe;
use std::fmt;

/// One storage namespace bound to the first usable backend.
///
/// Construction walks the preference list in order, probes each candidate
/// and binds the first that passes. Every later call forwards to that one
/// adapter; the facade keeps no data of its own.
///
/// Probing writes and removes a throwaway marker on each candidate it tries,
/// so constructing a `BranchStorage` touches real browser storage even if no
/// value is ever set.
///
/// # Example
///
/// ```rust
/// use branch_storage::{BackendKind, BranchStorage, Environment};
/// use branch_storage::host::MemoryWebStorage;
/// use std::rc::Rc;
///
/// let session = MemoryWebStorage::new();
/// let env = Environment::new().with_session(Rc::new(session.clone()));
///
/// let storage = BranchStorage::new(["session", "pojo"], &env).unwrap();
/// assert_eq!(storage.kind(), BackendKind::SessionStorage);
///
/// storage.set("key", "value").unwrap();
/// assert_eq!(storage.get("key").as_deref(), Some("value"));
/// assert_eq!(
///     session.table().get("BRANCH_WEBSDK_KEYkey").as_deref(),
///     Some("value")
/// );
/// ```
pub struct BranchStorage {
    adapter: Box<dyn StorageAdapter>,
    fallback: bool,
}

impl BranchStorage {
    /// Binds the first usable backend from `preferences` with default settings.
    ///
    /// Unrecognized tokens are skipped. With the default configuration this
    /// always succeeds: when nothing in the list works, the in-memory backend
    /// is bound.
    ///
    /// # Errors
    ///
    /// Only fails if the configuration disables the in-memory fallback; see
    /// [`BranchStorage::with_config`].
    pub fn new<I, S>(preferences: I, env: &Environment) -> StorageResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(preferences, env, StorageConfig::default())
    }

    /// Binds the first usable backend from `preferences`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoUsableBackend`] when no candidate passes the
    /// probe and `config.fallback_to_memory` is false.
    pub fn with_config<I, S>(
        preferences: I,
        env: &Environment,
        config: StorageConfig,
    ) -> StorageResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = BackendKind::parse_preferences(preferences);
        Self::from_kinds(&kinds, env, config)
    }

    /// Binds the first usable backend from an already-parsed list.
    ///
    /// # Errors
    ///
    /// Same as [`BranchStorage::with_config`].
    pub fn from_kinds(
        kinds: &[BackendKind],
        env: &Environment,
        config: StorageConfig,
    ) -> StorageResult<Self> {
        for &kind in kinds {
            let Some(candidate) = adapter::build(kind, env, &config) else {
                tracing::debug!(backend = %kind, "no host for storage backend");
                continue;
            };
            if probe::is_available(candidate.as_ref(), &config.probe_key) {
                tracing::debug!(backend = %kind, "bound storage backend");
                return Ok(Self {
                    adapter: candidate,
                    fallback: false,
                });
            }
        }

        if !config.fallback_to_memory {
            return Err(StorageError::NoUsableBackend {
                tried: kinds.to_vec(),
            });
        }

        tracing::warn!(tried = ?kinds, "no preferred storage backend usable, falling back to memory");
        Ok(Self {
            adapter: Box::new(InMemoryAdapter::new(
                env.memory().clone(),
                KeyPrefix::new(config.key_prefix),
            )),
            fallback: true,
        })
    }

    /// Returns the bound backend.
    pub fn kind(&self) -> BackendKind {
        self.adapter.kind()
    }

    /// Returns true if the in-memory backend was bound because nothing in
    /// the preference list was usable.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Returns the bound adapter.
    pub fn adapter(&self) -> &dyn StorageAdapter {
        self.adapter.as_ref()
    }

    /// Reads the value stored under `key`, or `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.adapter.get(key)
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.adapter.set(key, value)
    }

    /// Removes `key`. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.adapter.remove(key)
    }

    /// Removes every entry this instance owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects a removal.
    pub fn clear(&self) -> StorageResult<()> {
        self.adapter.clear()
    }

    /// Returns every entry this instance owns, keyed by logical key.
    pub fn get_all(&self) -> Entries {
        self.adapter.get_all()
    }
}

impl fmt::Debug for BranchStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BranchStorage")
            .field("kind", &self.kind())
            .field("fallback", &self.fallback)
            .finish()
    }
}
