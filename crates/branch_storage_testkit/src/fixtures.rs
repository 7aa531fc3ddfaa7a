//! Fake browser fixtures.
//!
//! A [`FakeBrowser`] owns the in-memory hosts and keeps handles to them so
//! tests can inspect the raw data behind a [`BranchStorage`].

use branch_storage::host::{CookieHost, MemoryCookieJar, MemoryTable, MemoryWebStorage};
use branch_storage::{BranchStorage, Environment, StorageConfig};
use std::rc::Rc;

/// Cookies set by other scripts on the page.
pub const THIRD_PARTY_COOKIES: [(&str, &str); 3] = [
    ("non_branch_cookie_1", "abc"),
    ("non_branch_cookie_2", "def"),
    ("non_branch_cookie_3", "ghi"),
];

/// An unprefixed Web Storage key written by another script.
pub const FOREIGN_KEY: &str = "other_app_setting";

/// Value stored under [`FOREIGN_KEY`].
pub const FOREIGN_VALUE: &str = "keep me";

/// In-memory stand-in for a browser page.
#[derive(Debug)]
pub struct FakeBrowser {
    /// `sessionStorage`.
    pub session: MemoryWebStorage,
    /// `localStorage`.
    pub local: MemoryWebStorage,
    /// `document.cookie`.
    pub cookies: Rc<MemoryCookieJar>,
    /// Table behind the in-memory backend.
    pub memory: MemoryTable,
}

impl Default for FakeBrowser {
    fn default() -> Self {
        Self::from_parts(
            MemoryWebStorage::new(),
            MemoryWebStorage::new(),
            MemoryCookieJar::new(),
        )
    }
}

impl FakeBrowser {
    /// A browser with every backend working and no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// A working browser where other scripts already stored data.
    pub fn with_third_party_data() -> Self {
        let browser = Self::new();
        browser.seed_third_party_data();
        browser
    }

    /// Web Storage throws on every call; cookies work.
    pub fn private_mode() -> Self {
        Self::from_parts(
            MemoryWebStorage::disabled(),
            MemoryWebStorage::disabled(),
            MemoryCookieJar::new(),
        )
    }

    /// Cookie writes are silently dropped; Web Storage works.
    pub fn file_origin() -> Self {
        Self::from_parts(
            MemoryWebStorage::new(),
            MemoryWebStorage::new(),
            MemoryCookieJar::rejecting(),
        )
    }

    /// Nothing but the in-memory backend works.
    pub fn locked_down() -> Self {
        let browser = Self::from_parts(
            MemoryWebStorage::disabled(),
            MemoryWebStorage::disabled(),
            MemoryCookieJar::new(),
        );
        browser.cookies.set_enabled(false);
        browser
    }

    fn from_parts(session: MemoryWebStorage, local: MemoryWebStorage, jar: MemoryCookieJar) -> Self {
        Self {
            session,
            local,
            cookies: Rc::new(jar),
            memory: MemoryTable::new(),
        }
    }

    /// Writes the third-party cookies and foreign Web Storage keys.
    pub fn seed_third_party_data(&self) {
        for (name, value) in THIRD_PARTY_COOKIES {
            self.cookies
                .write(&format!("{name}={value}"))
                .expect("seed cookie");
        }
        self.session.table().insert(FOREIGN_KEY, FOREIGN_VALUE);
        self.local.table().insert(FOREIGN_KEY, FOREIGN_VALUE);
        self.memory.insert(FOREIGN_KEY, FOREIGN_VALUE);
    }

    /// Builds an environment over this browser's hosts.
    pub fn environment(&self) -> Environment {
        Environment::new()
            .with_session(Rc::new(self.session.clone()))
            .with_local(Rc::new(self.local.clone()))
            .with_cookies(self.cookies.clone())
            .with_memory(self.memory.clone())
    }

    /// Builds a storage with default settings.
    pub fn storage(&self, preferences: &[&str]) -> BranchStorage {
        BranchStorage::new(preferences.iter().copied(), &self.environment())
            .expect("default config always binds a backend")
    }

    /// Builds a storage with `config`.
    pub fn storage_with_config(&self, preferences: &[&str], config: StorageConfig) -> BranchStorage {
        BranchStorage::with_config(preferences.iter().copied(), &self.environment(), config)
            .expect("failed to bind storage")
    }

    /// Returns the raw `document.cookie` string.
    pub fn raw_cookies(&self) -> String {
        self.cookies.read().expect("read cookies")
    }

    /// Panics unless every seeded third-party entry is still present.
    pub fn assert_third_party_data_intact(&self) {
        let raw = self.raw_cookies();
        let found = raw
            .split(';')
            .filter_map(|cookie| cookie.trim().split_once('='))
            .filter(|(name, value)| {
                THIRD_PARTY_COOKIES
                    .iter()
                    .any(|(n, v)| n == name && v == value)
            })
            .count();
        assert_eq!(found, THIRD_PARTY_COOKIES.len(), "third-party cookies: {raw}");

        for table in [self.session.table(), self.local.table(), &self.memory] {
            assert_eq!(table.get(FOREIGN_KEY).as_deref(), Some(FOREIGN_VALUE));
        }
    }
}
