//! `sessionStorage` / `localStorage` adapter.

use super::{Entries, KeyPrefix, StorageAdapter};
use crate::error::{StorageError, StorageResult};
use crate::host::WebStorageHost;
use crate::kind::BackendKind;
use crate::probe::{ProbeGuard, PROBE_VALUE};
use std::fmt;
use std::rc::Rc;

/// Adapter over a DOM `Storage` object.
///
/// Keys are stored as `prefix + key`; values are stored as-is.
pub struct WebStorageAdapter {
    kind: BackendKind,
    host: Rc<dyn WebStorageHost>,
    prefix: KeyPrefix,
}

impl WebStorageAdapter {
    /// Creates an adapter over `sessionStorage`.
    pub fn session(host: Rc<dyn WebStorageHost>, prefix: KeyPrefix) -> Self {
        Self {
            kind: BackendKind::SessionStorage,
            host,
            prefix,
        }
    }

    /// Creates an adapter over `localStorage`.
    pub fn local(host: Rc<dyn WebStorageHost>, prefix: KeyPrefix) -> Self {
        Self {
            kind: BackendKind::LocalStorage,
            host,
            prefix,
        }
    }

    fn owned_keys(&self) -> StorageResult<Vec<String>> {
        let keys = self
            .host
            .keys()
            .map_err(|e| StorageError::from_host(self.kind, e))?;
        Ok(keys.into_iter().filter(|k| self.prefix.owns(k)).collect())
    }
}

impl StorageAdapter for WebStorageAdapter {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.host.get_item(&self.prefix.apply(key)) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(backend = %self.kind, key, %err, "read failed, treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        tracing::trace!(backend = %self.kind, key, "set");
        self.host
            .set_item(&self.prefix.apply(key), value)
            .map_err(|e| StorageError::from_host(self.kind, e))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        tracing::trace!(backend = %self.kind, key, "remove");
        self.host
            .remove_item(&self.prefix.apply(key))
            .map_err(|e| StorageError::from_host(self.kind, e))
    }

    fn clear(&self) -> StorageResult<()> {
        // Snapshot the keys first; removing while walking `key(i)` skips entries.
        for key in self.owned_keys()? {
            self.host
                .remove_item(&key)
                .map_err(|e| StorageError::from_host(self.kind, e))?;
        }
        Ok(())
    }

    fn get_all(&self) -> Entries {
        let keys = match self.owned_keys() {
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!(backend = %self.kind, %err, "enumeration failed");
                return Entries::new();
            }
        };
        keys.iter()
            .filter_map(|physical| {
                let logical = self.prefix.strip(physical)?;
                let value = self.host.get_item(physical).ok().flatten()?;
                Some((logical.to_string(), value))
            })
            .collect()
    }

    fn probe(&self, marker: &str) -> StorageResult<()> {
        let key = self.prefix.apply(marker);
        let guard = ProbeGuard::new(|| self.host.remove_item(&key));

        self.host
            .set_item(&key, PROBE_VALUE)
            .map_err(|e| StorageError::from_host(self.kind, e))?;
        let read = self
            .host
            .get_item(&key)
            .map_err(|e| StorageError::from_host(self.kind, e))?;
        if read.as_deref() != Some(PROBE_VALUE) {
            return Err(StorageError::probe_failed(
                self.kind,
                format!("marker read back as {read:?}"),
            ));
        }

        guard
            .release()
            .map_err(|e| StorageError::from_host(self.kind, e))
    }
}

impl fmt::Debug for WebStorageAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebStorageAdapter")
            .field("kind", &self.kind)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
