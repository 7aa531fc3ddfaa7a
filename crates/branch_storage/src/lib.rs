//! # Branch Storage
//!
//! One key-value interface over the storage mechanisms a browser may offer.
//!
//! Callers read and write string settings without caring whether the page
//! can use `sessionStorage`, `localStorage`, cookies, or nothing at all.
//! A [`BranchStorage`] is built from an ordered preference list; the first
//! backend that passes an availability probe is bound for the instance's
//! lifetime.
//!
//! ## Backends
//!
//! | token     | backend             | owned entries                       |
//! |-----------|---------------------|-------------------------------------|
//! | `session` | `sessionStorage`    | keys starting with the key prefix   |
//! | `local`   | `localStorage`      | keys starting with the key prefix   |
//! | `cookie`  | `document.cookie`   | names on the cookie allow-list      |
//! | `pojo`    | in-process table    | keys starting with the key prefix   |
//!
//! `clear` and `get_all` only ever see owned entries; everything else sharing
//! the host (other scripts' keys, third-party cookies) is left untouched.
//!
//! ## Hosts
//!
//! The browser objects are reached through the [`host::WebStorageHost`] and
//! [`host::CookieHost`] ports, bundled in an [`Environment`]. The
//! `branch_storage_wasm` crate provides the `web-sys` implementations;
//! [`host::memory`] provides in-process ones.
//!
//! ## Example
//!
//! ```rust
//! use branch_storage::{BackendKind, BranchStorage, Environment};
//! use branch_storage::host::MemoryCookieJar;
//! use std::rc::Rc;
//!
//! let jar = Rc::new(MemoryCookieJar::new());
//! let env = Environment::new().with_cookies(jar.clone());
//!
//! let storage = BranchStorage::new(["cookie", "pojo"], &env).unwrap();
//! assert_eq!(storage.kind(), BackendKind::Cookie);
//!
//! storage.set("branch_session", "abc; def").unwrap();
//! assert_eq!(storage.get("branch_session").as_deref(), Some("abc; def"));
//! assert_eq!(storage.get_all().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod config;
pub mod cookie;
mod error;
pub mod host;
mod kind;
pub mod probe;
mod storage;

pub use adapter::{Entries, StorageAdapter};
pub use config::{CookieConfig, CookieLifetime, SameSite, StorageConfig};
pub use error::{HostError, HostResult, StorageError, StorageResult};
pub use host::Environment;
pub use kind::BackendKind;
pub use storage::BranchStorage;
