//! Backend kinds and preference-token parsing.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One concrete storage mechanism.
///
/// The string form is the preference token callers pass to the facade:
/// `session`, `local`, `cookie` and `pojo` (in-memory).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// `window.sessionStorage`.
    #[serde(rename = "session")]
    SessionStorage,
    /// `window.localStorage`.
    #[serde(rename = "local")]
    LocalStorage,
    /// `document.cookie`.
    #[serde(rename = "cookie")]
    Cookie,
    /// Plain in-process table with no persistence.
    #[serde(rename = "pojo")]
    InMemory,
}

impl BackendKind {
    /// All kinds, in the order a typical caller would prefer them.
    pub const ALL: [BackendKind; 4] = [
        BackendKind::SessionStorage,
        BackendKind::LocalStorage,
        BackendKind::Cookie,
        BackendKind::InMemory,
    ];

    /// Returns the preference token for this kind.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            BackendKind::SessionStorage => "session",
            BackendKind::LocalStorage => "local",
            BackendKind::Cookie => "cookie",
            BackendKind::InMemory => "pojo",
        }
    }

    /// Returns true for the kinds that store keys under the key prefix.
    #[must_use]
    pub const fn is_prefixed(self) -> bool {
        !matches!(self, BackendKind::Cookie)
    }

    /// Parses a preference list, skipping tokens that are not recognized.
    ///
    /// Order is preserved and duplicates are kept; probing a kind twice is
    /// harmless.
    pub fn parse_preferences<I, S>(tokens: I) -> Vec<BackendKind>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter_map(|token| match token.as_ref().parse() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    tracing::warn!(%err, "skipping backend preference");
                    None
                }
            })
            .collect()
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for BackendKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "session" => Ok(BackendKind::SessionStorage),
            "local" => Ok(BackendKind::LocalStorage),
            "cookie" => Ok(BackendKind::Cookie),
            "pojo" => Ok(BackendKind::InMemory),
            other => Err(StorageError::UnknownBackend(other.to_string())),
        }
    }
}
