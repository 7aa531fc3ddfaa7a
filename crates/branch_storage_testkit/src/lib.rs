//! # Branch Storage Testkit
//!
//! Test utilities for `branch_storage`.
//!
//! This crate provides:
//! - A fake browser with seeded third-party data
//! - Property-based test generators using proptest
//! - Reusable checks for the backend contract
//! - Tracing setup for tests
//!
//! ## Usage
//!
//! ```rust
//! use branch_storage_testkit::prelude::*;
//!
//! let browser = FakeBrowser::with_third_party_data();
//! let storage = browser.storage(&["session"]);
//! assert_backend_contract(&storage);
//! browser.assert_third_party_data_intact();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod contract;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::contract::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::init_tracing;
}

pub use contract::*;
pub use fixtures::*;
pub use generators::*;

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
