//! Property-based test generators using proptest.
//!
//! Keys and values deliberately include the characters that break naive
//! cookie handling: spaces, `=`, `;`, `/`, `%` and non-ASCII text.

use proptest::prelude::*;

/// Backend tokens the facade understands.
pub const BACKEND_TOKENS: [&str; 4] = ["session", "local", "cookie", "pojo"];

/// Strategy for non-empty keys.
///
/// Keys stay within 16 characters so they never collide with the seeded
/// third-party cookie names or foreign Web Storage keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("Invalid regex"),
        prop::string::string_regex("[a-zA-Z0-9 =;/,%_-]{1,16}").expect("Invalid regex"),
        prop::string::string_regex("[a-zé ü日本=;]{1,8}").expect("Invalid regex"),
    ]
}

/// Strategy for values, biased towards cookie delimiters.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z0-9]{0,12}").expect("Invalid regex"),
        prop::string::string_regex("[a-z;=%, ]{0,24}").expect("Invalid regex"),
        any::<String>(),
    ]
}

/// Strategy for one backend token.
pub fn backend_token_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(BACKEND_TOKENS.to_vec())
}

/// A single storage operation for model-based tests.
#[derive(Debug, Clone)]
pub enum StorageOperation {
    /// Write a value.
    Set {
        /// Logical key.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Remove a key.
    Remove {
        /// Logical key.
        key: String,
    },
    /// Clear every owned entry.
    Clear,
}

/// Strategy for one operation drawn from a small key space so that
/// overwrites and removals hit existing keys.
pub fn operation_strategy() -> impl Strategy<Value = StorageOperation> {
    let key = prop::sample::select(vec![
        "alpha",
        "beta",
        "key unstored",
        "a=b; c",
        "path/seg",
        "branch_session",
    ])
    .prop_map(|key| key.to_string());
    prop_oneof![
        6 => (key.clone(), value_strategy())
            .prop_map(|(key, value)| StorageOperation::Set { key, value }),
        3 => key.prop_map(|key| StorageOperation::Remove { key }),
        1 => Just(StorageOperation::Clear),
    ]
}

/// Strategy for a sequence of operations.
pub fn operations_strategy(max_len: usize) -> impl Strategy<Value = Vec<StorageOperation>> {
    prop::collection::vec(operation_strategy(), 0..max_len)
}
