//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Prefix applied to every key stored in Web Storage or memory.
pub const DEFAULT_KEY_PREFIX: &str = "BRANCH_WEBSDK_KEY";

/// Key used by the availability probe.
pub const DEFAULT_PROBE_KEY: &str = "branch_storage_probe";

/// Cookie names owned by default.
pub const DEFAULT_COOKIE_NAMES: [&str; 2] = ["branch_session", "branch_session_first"];

/// Configuration for a [`BranchStorage`](crate::BranchStorage) instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Prefix for keys in session, local and in-memory storage.
    pub key_prefix: String,

    /// Throwaway key written and removed by the availability probe.
    pub probe_key: String,

    /// Whether to bind the in-memory backend when no preference is usable.
    pub fallback_to_memory: bool,

    /// Cookie adapter settings.
    pub cookie: CookieConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            probe_key: DEFAULT_PROBE_KEY.to_string(),
            fallback_to_memory: true,
            cookie: CookieConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key prefix.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets the probe key.
    #[must_use]
    pub fn probe_key(mut self, key: impl Into<String>) -> Self {
        self.probe_key = key.into();
        self
    }

    /// Sets whether to fall back to memory when nothing else works.
    #[must_use]
    pub const fn fallback_to_memory(mut self, value: bool) -> Self {
        self.fallback_to_memory = value;
        self
    }

    /// Replaces the cookie settings.
    #[must_use]
    pub fn cookie(mut self, cookie: CookieConfig) -> Self {
        self.cookie = cookie;
        self
    }
}

/// How long cookies written by the adapter live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum CookieLifetime {
    /// Cookie ends with the browsing session (no expiry attribute).
    Session,
    /// Cookie persists for the given number of seconds.
    #[serde(rename_all = "camelCase")]
    Persistent {
        /// Value of the `max-age` attribute.
        max_age_secs: u64,
    },
}

/// The `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    /// `samesite=lax`
    Lax,
    /// `samesite=strict`
    Strict,
    /// `samesite=none`
    None,
}

impl SameSite {
    /// Attribute value as written into the cookie string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SameSite::Lax => "lax",
            SameSite::Strict => "strict",
            SameSite::None => "none",
        }
    }
}

/// Settings for the cookie adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CookieConfig {
    /// Cookie names treated as owned from the start.
    pub owned_names: Vec<String>,

    /// `path` attribute for every write.
    pub path: String,

    /// Lifetime of written cookies.
    pub lifetime: CookieLifetime,

    /// Whether to add the `secure` attribute.
    pub secure: bool,

    /// Optional `samesite` attribute.
    pub same_site: Option<SameSite>,

    /// Optional `domain` attribute.
    pub domain: Option<String>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            owned_names: DEFAULT_COOKIE_NAMES.iter().map(|s| s.to_string()).collect(),
            path: "/".to_string(),
            lifetime: CookieLifetime::Session,
            secure: false,
            same_site: None,
            domain: None,
        }
    }
}

impl CookieConfig {
    /// Creates cookie settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name to the initial allow-list.
    #[must_use]
    pub fn owned_name(mut self, name: impl Into<String>) -> Self {
        self.owned_names.push(name.into());
        self
    }

    /// Sets the cookie path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the cookie lifetime.
    #[must_use]
    pub const fn lifetime(mut self, lifetime: CookieLifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Sets the `secure` attribute.
    #[must_use]
    pub const fn secure(mut self, value: bool) -> Self {
        self.secure = value;
        self
    }

    /// Sets the `samesite` attribute.
    #[must_use]
    pub const fn same_site(mut self, value: SameSite) -> Self {
        self.same_site = Some(value);
        self
    }

    /// Sets the `domain` attribute.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}
