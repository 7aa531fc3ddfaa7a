//! Key prefixing for the namespaced backends.

/// Maps logical keys to physical keys and back.
///
/// Web Storage and the in-memory table are flat namespaces shared with other
/// code, so every key this crate writes carries the prefix and only prefixed
/// keys are considered owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    /// Creates a prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Returns the prefix string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the physical key for `key`.
    pub fn apply(&self, key: &str) -> String {
        let mut physical = String::with_capacity(self.0.len() + key.len());
        physical.push_str(&self.0);
        physical.push_str(key);
        physical
    }

    /// Returns the logical key if `physical` is owned.
    pub fn strip<'a>(&self, physical: &'a str) -> Option<&'a str> {
        physical.strip_prefix(self.0.as_str())
    }

    /// Returns true if `physical` carries the prefix.
    pub fn owns(&self, physical: &str) -> bool {
        physical.starts_with(self.0.as_str())
    }
}
