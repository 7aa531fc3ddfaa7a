//! Browser tests for the wasm bindings.
//!
//! Run with `wasm-pack test --headless --chrome` (or `--firefox`).

#![cfg(target_arch = "wasm32")]

use branch_storage::host::CookieHost;
use branch_storage_wasm::{DocumentCookies, JsBranchStorage};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|token| token.to_string()).collect()
}

fn storage(list: &[&str]) -> JsBranchStorage {
    JsBranchStorage::new(tokens(list), JsValue::UNDEFINED).unwrap()
}

fn text(storage: &JsBranchStorage, key: &str) -> Option<String> {
    storage.get(key).as_string()
}

fn document() -> web_sys::HtmlDocument {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .dyn_into()
        .unwrap()
}

#[wasm_bindgen_test]
fn session_storage_uses_prefixed_keys() {
    let storage = storage(&["session"]);
    assert_eq!(storage.kind(), "session");
    storage.set("key", "value").unwrap();

    let raw = web_sys::window().unwrap().session_storage().unwrap().unwrap();
    assert_eq!(
        raw.get_item("BRANCH_WEBSDK_KEYkey").unwrap().as_deref(),
        Some("value")
    );
    assert_eq!(text(&storage, "key").as_deref(), Some("value"));

    storage.clear().unwrap();
    assert_eq!(raw.get_item("BRANCH_WEBSDK_KEYkey").unwrap(), None);
}

#[wasm_bindgen_test]
fn local_storage_keeps_foreign_keys() {
    let raw = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    raw.set_item("other_app_setting", "keep me").unwrap();

    let storage = storage(&["local"]);
    storage.set("key", "value").unwrap();
    storage.clear().unwrap();

    assert_eq!(text(&storage, "key"), None);
    assert_eq!(
        raw.get_item("other_app_setting").unwrap().as_deref(),
        Some("keep me")
    );
    raw.remove_item("other_app_setting").unwrap();
}

#[wasm_bindgen_test]
fn cookie_clear_keeps_third_party_cookies() {
    let document = document();
    document.set_cookie("non_branch_cookie_1=abc; path=/").unwrap();

    let storage = storage(&["cookie"]);
    assert_eq!(storage.kind(), "cookie");
    storage.set("branch_session", "a;b=c").unwrap();
    assert_eq!(text(&storage, "branch_session").as_deref(), Some("a;b=c"));

    storage.clear().unwrap();
    assert_eq!(text(&storage, "branch_session"), None);
    assert!(document.cookie().unwrap().contains("non_branch_cookie_1=abc"));

    document
        .set_cookie("non_branch_cookie_1=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/")
        .unwrap();
}

#[wasm_bindgen_test]
fn get_all_returns_plain_object() {
    let storage = storage(&["pojo"]);
    storage.clear().unwrap();
    storage.set("a", "1").unwrap();

    let all = storage.get_all().unwrap();
    let value = js_sys::Reflect::get(&all, &JsValue::from_str("a")).unwrap();
    assert_eq!(value.as_string().as_deref(), Some("1"));
    assert_eq!(js_sys::Object::keys(all.unchecked_ref()).length(), 1);
}

#[wasm_bindgen_test]
fn pojo_instances_share_one_table() {
    let first = storage(&["pojo"]);
    let second = storage(&["pojo"]);
    first.set("shared", "yes").unwrap();
    assert_eq!(text(&second, "shared").as_deref(), Some("yes"));
    first.clear().unwrap();
}

#[wasm_bindgen_test]
fn unknown_tokens_fall_back_to_memory() {
    let storage = storage(&["indexeddb"]);
    assert_eq!(storage.kind(), "pojo");
    assert!(storage.is_fallback());
}

#[wasm_bindgen_test]
fn config_object_is_honored() {
    let config = js_sys::JSON::parse(r#"{"keyPrefix":"TEST_","fallbackToMemory":false}"#).unwrap();
    let storage = JsBranchStorage::new(tokens(&["session"]), config).unwrap();
    storage.set("k", "v").unwrap();

    let raw = web_sys::window().unwrap().session_storage().unwrap().unwrap();
    assert_eq!(raw.get_item("TEST_k").unwrap().as_deref(), Some("v"));
    storage.clear().unwrap();
}

#[wasm_bindgen_test]
fn missing_key_is_null_on_every_backend() {
    for token in ["session", "local", "cookie", "pojo"] {
        let storage = storage(&[token]);
        assert_eq!(storage.kind(), token);
        let value = storage.get("missing");
        assert!(value.is_null(), "{token}: get of a missing key returned {value:?}");
    }
}

#[wasm_bindgen_test]
fn cookie_names_with_delimiters_round_trip() {
    let storage = storage(&["cookie"]);
    for key in ["key unstored", "a=b", "path/seg"] {
        storage.set(key, "value").unwrap();
        assert_eq!(text(&storage, key).as_deref(), Some("value"), "{key:?}");
    }
    assert!(document().cookie().unwrap().contains("key%20unstored=value"));
    storage.clear().unwrap();
    assert!(storage.get("a=b").is_null());
}

#[wasm_bindgen_test]
fn empty_cookie_name_throws() {
    let storage = storage(&["cookie"]);
    assert!(storage.set("", "v").is_err());
}

#[wasm_bindgen_test]
fn document_cookies_report_navigator_flag() {
    let window = web_sys::window().unwrap();
    let cookies = DocumentCookies::new(document(), window.navigator());
    assert_eq!(cookies.enabled(), window.navigator().cookie_enabled());
    assert!(cookies.enabled());
}
