//! `document.cookie` adapter.

use super::{Entries, StorageAdapter};
use crate::config::CookieConfig;
use crate::cookie::{codec, CookieAllowList};
use crate::error::{StorageError, StorageResult};
use crate::host::CookieHost;
use crate::kind::BackendKind;
use crate::probe::{ProbeGuard, PROBE_VALUE};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Adapter over the document's cookie string.
///
/// Cookie names carry no prefix and are percent-encoded on the wire. Only
/// names on the allow-list are visible to `get`, `get_all` and `clear`;
/// every name written through `set` joins the allow-list. `remove` accepts
/// any non-empty name.
pub struct CookieAdapter {
    host: Rc<dyn CookieHost>,
    config: CookieConfig,
    owned: CookieAllowList,
}

impl CookieAdapter {
    /// Creates a cookie adapter.
    pub fn new(host: Rc<dyn CookieHost>, config: CookieConfig) -> Self {
        let owned = CookieAllowList::new(config.owned_names.iter().cloned());
        Self {
            host,
            config,
            owned,
        }
    }

    /// Returns the allow-list.
    pub fn owned(&self) -> &CookieAllowList {
        &self.owned
    }

    fn read(&self) -> StorageResult<String> {
        self.host
            .read()
            .map_err(|e| StorageError::from_host(BackendKind::Cookie, e))
    }

    fn write(&self, assignment: &str) -> StorageResult<()> {
        self.host
            .write(assignment)
            .map_err(|e| StorageError::from_host(BackendKind::Cookie, e))
    }

    fn read_or_empty(&self) -> String {
        self.read().unwrap_or_else(|err| {
            tracing::warn!(%err, "cookie read failed, treating as empty");
            String::new()
        })
    }
}

impl StorageAdapter for CookieAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::Cookie
    }

    fn get(&self, key: &str) -> Option<String> {
        if !self.owned.contains(key) {
            return None;
        }
        codec::find(&self.read_or_empty(), key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        tracing::trace!(key, "set cookie");
        self.write(&codec::serialize_set(key, value, &self.config)?)?;
        self.owned.insert(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        tracing::trace!(key, "remove cookie");
        self.write(&codec::serialize_remove(key, &self.config)?)
    }

    fn clear(&self) -> StorageResult<()> {
        let raw = self.read()?;
        let present: BTreeSet<String> = codec::pairs(&raw)
            .map(|(name, _)| codec::decode_name(name).into_owned())
            .filter(|name| self.owned.contains(name))
            .collect();
        for name in &present {
            self.remove(name)?;
        }
        Ok(())
    }

    fn get_all(&self) -> Entries {
        let mut entries = codec::parse(&self.read_or_empty());
        entries.retain(|name, _| self.owned.contains(name));
        entries
    }

    fn probe(&self, marker: &str) -> StorageResult<()> {
        if !self.host.enabled() {
            return Err(StorageError::probe_failed(
                BackendKind::Cookie,
                "cookies are disabled",
            ));
        }
        // Written directly so the marker never joins the allow-list.
        let removal = codec::serialize_remove(marker, &self.config)?;
        let assignment = codec::serialize_set(marker, PROBE_VALUE, &self.config)?;
        let guard = ProbeGuard::new(|| self.host.write(&removal));

        self.write(&assignment)?;
        let read = codec::find(&self.read()?, marker);
        if read.as_deref() != Some(PROBE_VALUE) {
            return Err(StorageError::probe_failed(
                BackendKind::Cookie,
                "cookie write did not stick",
            ));
        }

        guard
            .release()
            .map_err(|e| StorageError::from_host(BackendKind::Cookie, e))
    }
}

impl fmt::Debug for CookieAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieAdapter")
            .field("config", &self.config)
            .field("owned", &self.owned.names())
            .finish_non_exhaustive()
    }
}
