//! The set of cookie names this instance treats as its own.

use std::cell::RefCell;
use std::collections::BTreeSet;

/// Cookie names owned by one cookie adapter.
///
/// Names are logical (decoded). Cookies have no namespace, so ownership is
/// by name. The list starts from
/// the configured names and grows whenever a name is written through the
/// adapter; names are never dropped for the adapter's lifetime.
#[derive(Debug, Default)]
pub struct CookieAllowList {
    names: RefCell<BTreeSet<String>>,
}

impl CookieAllowList {
    /// Creates an allow-list seeded with `names`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: RefCell::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns true if `name` is owned.
    pub fn contains(&self, name: &str) -> bool {
        self.names.borrow().contains(name)
    }

    /// Marks `name` as owned. Returns true if it was not owned before.
    pub fn insert(&self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.borrow_mut().insert(name.to_string())
    }

    /// Returns the owned names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.names.borrow().iter().cloned().collect()
    }
}
