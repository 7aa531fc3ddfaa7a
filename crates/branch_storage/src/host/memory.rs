//! In-process host implementations.
//!
//! These stand in for the browser when running natively or under test. They
//! reproduce the observable behaviour the adapters depend on, including the
//! ways real browsers refuse to store data.

use super::{CookieHost, WebStorageHost};
use crate::cookie::codec::{self, EXPIRED};
use crate::error::{HostError, HostResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A shareable key/value table.
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Stores `value` under `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Removes `key`, returning the previous value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.borrow_mut().remove(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Returns every key in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Returns a copy of every entry.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    /// Removes every key for which `f` returns false.
    pub fn retain(&self, mut f: impl FnMut(&str) -> bool) {
        self.entries.borrow_mut().retain(|key, _| f(key));
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Total bytes of keys and values.
    fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// A `Storage` object backed by a [`MemoryTable`].
///
/// # Example
///
/// ```rust
/// use branch_storage::host::{MemoryWebStorage, WebStorageHost};
///
/// let storage = MemoryWebStorage::new();
/// storage.set_item("a", "1").unwrap();
/// assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
///
/// let locked = MemoryWebStorage::disabled();
/// assert!(locked.set_item("a", "1").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWebStorage {
    table: MemoryTable,
    disabled: bool,
    quota: Option<usize>,
}

impl MemoryWebStorage {
    /// Creates an empty, working storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that fails every call, like Web Storage in some
    /// private-browsing modes.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Creates a storage that rejects writes beyond `bytes` of keys and values.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Returns the backing table, for inspecting raw (prefixed) keys.
    pub fn table(&self) -> &MemoryTable {
        &self.table
    }

    fn check_enabled(&self) -> HostResult<()> {
        if self.disabled {
            return Err(HostError::new("SecurityError: storage is disabled"));
        }
        Ok(())
    }
}

impl WebStorageHost for MemoryWebStorage {
    fn get_item(&self, key: &str) -> HostResult<Option<String>> {
        self.check_enabled()?;
        Ok(self.table.get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> HostResult<()> {
        self.check_enabled()?;
        if let Some(quota) = self.quota {
            let replaced = self
                .table
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let needed = self.table.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(HostError::new(format!(
                    "QuotaExceededError: {needed} bytes exceeds quota of {quota}"
                )));
            }
        }
        self.table.insert(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> HostResult<()> {
        self.check_enabled()?;
        self.table.remove(key);
        Ok(())
    }

    fn keys(&self) -> HostResult<Vec<String>> {
        self.check_enabled()?;
        Ok(self.table.keys())
    }
}

/// A `document.cookie` model.
///
/// Cookies are kept in creation order and keyed by name only; path and domain
/// are accepted but do not partition the jar. An assignment with
/// `max-age` of zero or less deletes the cookie, as does an `expires` date in
/// 1970 or earlier. The jar has no clock, so any later `expires` date is
/// treated as future and keeps the cookie.
#[derive(Debug)]
pub struct MemoryCookieJar {
    cookies: RefCell<Vec<(String, String)>>,
    enabled: Cell<bool>,
    rejecting: bool,
    failing: bool,
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self {
            cookies: RefCell::new(Vec::new()),
            enabled: Cell::new(true),
            rejecting: false,
            failing: false,
        }
    }
}

impl MemoryCookieJar {
    /// Creates an empty, working jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a jar that silently drops every write, like cookies on a
    /// `file:` page in some browsers.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Self::default()
        }
    }

    /// Creates a jar whose every access throws, like a sandboxed frame.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Sets the value reported by [`CookieHost::enabled`].
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Returns the raw (still encoded) value of `name`.
    pub fn raw_value(&self, name: &str) -> Option<String> {
        self.cookies
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Returns every cookie name in creation order.
    pub fn names(&self) -> Vec<String> {
        self.cookies.borrow().iter().map(|(n, _)| n.clone()).collect()
    }

    fn check_access(&self) -> HostResult<()> {
        if self.failing {
            return Err(HostError::new("SecurityError: cookies are not accessible"));
        }
        Ok(())
    }
}

/// Returns true if the attribute list of an assignment expires the cookie.
///
/// The jar has no clock: an `expires` date counts as past when its year is
/// 1970 or earlier (which covers [`EXPIRED`]); later dates keep the cookie.
fn is_expiring(attributes: &str) -> bool {
    attributes.split(';').filter_map(codec::split_pair).any(|(attr, value)| {
        if attr.eq_ignore_ascii_case("expires") {
            value == EXPIRED || expiry_year(value).map_or(false, |year| year <= 1970)
        } else if attr.eq_ignore_ascii_case("max-age") {
            value.parse::<i64>().map_or(false, |secs| secs <= 0)
        } else {
            false
        }
    })
}

/// Extracts the four-digit year of an HTTP date such as
/// `Wed, 21 Oct 2015 07:28:00 GMT` (or the dashed `21-Oct-2015` form).
fn expiry_year(date: &str) -> Option<u32> {
    date.split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .find(|part| part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|year| year.parse().ok())
}

impl CookieHost for MemoryCookieJar {
    fn enabled(&self) -> bool {
        self.enabled.get()
    }

    fn read(&self) -> HostResult<String> {
        self.check_access()?;
        let joined = self
            .cookies
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        Ok(joined)
    }

    fn write(&self, assignment: &str) -> HostResult<()> {
        self.check_access()?;
        if self.rejecting {
            return Ok(());
        }
        let (pair, attributes) = assignment.split_once(';').unwrap_or((assignment, ""));
        // Browsers ignore assignments they cannot parse.
        let Some((name, value)) = codec::split_pair(pair) else {
            return Ok(());
        };

        let mut cookies = self.cookies.borrow_mut();
        let existing = cookies.iter().position(|(n, _)| n == name);
        if is_expiring(attributes) {
            if let Some(index) = existing {
                cookies.remove(index);
            }
            return Ok(());
        }
        match existing {
            Some(index) => cookies[index].1 = value.to_string(),
            None => cookies.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }
}
