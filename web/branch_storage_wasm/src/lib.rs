//! # Branch Storage WASM
//!
//! WebAssembly bindings for `branch_storage`.
//!
//! This crate provides:
//! - `web-sys` implementations of the host ports over `window.sessionStorage`,
//!   `window.localStorage` and `document.cookie`
//! - A JavaScript `BranchStorage` class wrapping the core facade
//!
//! ## Usage
//!
//! ```javascript
//! import init, { BranchStorage } from 'branch_storage_wasm';
//!
//! async function main() {
//!     await init();
//!
//!     const storage = new BranchStorage(["session", "cookie", "pojo"]);
//!     storage.set("identity", "abc");
//!     console.log(storage.kind, storage.get("identity"));
//!
//!     const cookies = new BranchStorage(["cookie"], { cookie: { secure: true } });
//!     cookies.set("branch_session", "xyz");
//!     console.log(cookies.getAll());
//! }
//! ```
//!
//! Instances created with the `pojo` token share one in-memory table for the
//! lifetime of the module.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod environment;
mod error;
mod host;
mod storage;
mod utils;

pub use environment::browser_environment;
pub use error::*;
pub use host::{BrowserStorage, DocumentCookies};
pub use storage::JsBranchStorage;

use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// This sets up panic hooks for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
}
