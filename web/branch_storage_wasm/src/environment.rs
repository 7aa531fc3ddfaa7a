//! Discovery of the browser hosts.

use crate::host::{BrowserStorage, DocumentCookies};
use branch_storage::host::MemoryTable;
use branch_storage::Environment;
use std::rc::Rc;
use wasm_bindgen::JsCast;

thread_local! {
    static MEMORY: MemoryTable = MemoryTable::new();
}

/// Builds an [`Environment`] from the global `window`.
///
/// Accessing `sessionStorage` or `localStorage` can itself throw (sandboxed
/// frames, blocked third-party storage); such hosts are left out, which
/// makes their backends unavailable. Outside a window (workers) only the
/// in-memory backend remains. The in-memory table is shared by every
/// environment built in this module instance.
pub fn browser_environment() -> Environment {
    let env = Environment::new().with_memory(MEMORY.with(MemoryTable::clone));
    let Some(window) = web_sys::window() else {
        tracing::debug!("no window, only in-memory storage is available");
        return env;
    };

    let mut env = env;
    match window.session_storage() {
        Ok(Some(storage)) => env = env.with_session(Rc::new(BrowserStorage::new(storage))),
        Ok(None) => tracing::debug!("sessionStorage is not available"),
        Err(err) => tracing::debug!(error = %crate::utils::describe(&err), "sessionStorage access threw"),
    }
    match window.local_storage() {
        Ok(Some(storage)) => env = env.with_local(Rc::new(BrowserStorage::new(storage))),
        Ok(None) => tracing::debug!("localStorage is not available"),
        Err(err) => tracing::debug!(error = %crate::utils::describe(&err), "localStorage access threw"),
    }
    match window
        .document()
        .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
    {
        Some(document) => {
            let cookies = DocumentCookies::new(document, window.navigator());
            env = env.with_cookies(Rc::new(cookies));
        }
        None => tracing::debug!("document.cookie is not available"),
    }
    env
}
