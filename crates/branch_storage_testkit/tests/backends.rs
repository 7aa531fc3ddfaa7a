//! Scenario tests for every backend through the facade.

use branch_storage::{BackendKind, StorageConfig};
use branch_storage_testkit::prelude::*;

const BRANCH_KEY_PREFIX: &str = "BRANCH_WEBSDK_KEY";
const ITEM_KEY: &str = "key";
const ITEM_KEY_UNSTORED: &str = "key unstored";
const ITEM_VALUE: &str = "value";

#[test]
fn every_backend_honors_the_contract() {
    init_tracing();
    for token in BACKEND_TOKENS {
        let browser = FakeBrowser::with_third_party_data();
        let storage = browser.storage(&[token]);
        assert_eq!(storage.kind().token(), token);
        assert!(!storage.is_fallback());

        assert_backend_contract(&storage);
        browser.assert_third_party_data_intact();
    }
}

#[test]
fn every_backend_accepts_ordinary_string_keys() {
    for token in BACKEND_TOKENS {
        let browser = FakeBrowser::with_third_party_data();
        let storage = browser.storage(&[token]);
        for key in [ITEM_KEY_UNSTORED, "a=b", "path/seg", "x; y", "clé"] {
            storage
                .set(key, ITEM_VALUE)
                .unwrap_or_else(|e| panic!("{token}: set({key:?}) failed: {e}"));
            assert_eq!(storage.get(key).as_deref(), Some(ITEM_VALUE), "{token}: {key:?}");
        }
        assert_eq!(storage.get_all().len(), 5, "{token}");

        storage.clear().unwrap();
        assert!(storage.get_all().is_empty(), "{token}");
        browser.assert_third_party_data_intact();
    }
}

mod session_storage {
    use super::*;

    #[test]
    fn set_stores_prefixed_key() {
        let browser = FakeBrowser::new();
        let storage = browser.storage(&["session"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        assert_eq!(
            browser
                .session
                .table()
                .get(&format!("{BRANCH_KEY_PREFIX}{ITEM_KEY}"))
                .as_deref(),
            Some(ITEM_VALUE)
        );
        assert!(browser.local.table().is_empty());
    }

    #[test]
    fn get_returns_stored_value() {
        let browser = FakeBrowser::new();
        let storage = browser.storage(&["session"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        assert_eq!(storage.get(ITEM_KEY).as_deref(), Some(ITEM_VALUE));
    }

    #[test]
    fn unstored_item_is_none() {
        let storage = FakeBrowser::new().storage(&["session"]);
        assert_eq!(storage.get(ITEM_KEY_UNSTORED), None);
    }

    #[test]
    fn clear_removes_item() {
        let browser = FakeBrowser::new();
        let storage = browser.storage(&["session"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.get(ITEM_KEY), None);
        assert!(browser.session.table().is_empty());
    }
}

mod local_storage {
    use super::*;

    #[test]
    fn set_stores_prefixed_key() {
        let browser = FakeBrowser::new();
        let storage = browser.storage(&["local"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        assert_eq!(
            browser
                .local
                .table()
                .get(&format!("{BRANCH_KEY_PREFIX}{ITEM_KEY}"))
                .as_deref(),
            Some(ITEM_VALUE)
        );
    }

    #[test]
    fn remove_then_get_is_none() {
        let storage = FakeBrowser::new().storage(&["local"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        storage.remove(ITEM_KEY).unwrap();
        assert_eq!(storage.get(ITEM_KEY), None);
    }

    #[test]
    fn quota_error_surfaces_from_set() {
        let browser = FakeBrowser {
            local: branch_storage::host::MemoryWebStorage::with_quota(64),
            ..FakeBrowser::new()
        };
        let storage = browser.storage(&["local"]);
        assert_eq!(storage.kind(), BackendKind::LocalStorage);
        let err = storage.set(ITEM_KEY, &"x".repeat(128)).unwrap_err();
        assert!(err.to_string().contains("QuotaExceededError"), "{err}");
        assert_eq!(storage.get(ITEM_KEY), None);
    }
}

mod cookie_storage {
    use super::*;

    const ITEM_KEY: &str = "branch_session";
    const ITEM_VALUE: &str = "test_val";

    #[test]
    fn get_stored_item() {
        let browser = FakeBrowser::with_third_party_data();
        let storage = browser.storage(&["cookie"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        assert_eq!(storage.get(ITEM_KEY).as_deref(), Some(ITEM_VALUE));
    }

    #[test]
    fn unstored_item_is_none() {
        let storage = FakeBrowser::with_third_party_data().storage(&["cookie"]);
        assert_eq!(storage.get("not_an_item"), None);
    }

    #[test]
    fn remove_owned_cookie() {
        let storage = FakeBrowser::with_third_party_data().storage(&["cookie"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        storage.remove(ITEM_KEY).unwrap();
        assert_eq!(storage.get(ITEM_KEY), None);
    }

    #[test]
    fn remove_cookie_outside_default_names() {
        let storage = FakeBrowser::with_third_party_data().storage(&["cookie"]);
        storage.set("test_1", "123").unwrap();
        storage.remove("test_1").unwrap();
        assert_eq!(storage.get("test_1"), None);
    }

    #[test]
    fn clear_removes_all_owned_cookies() {
        let browser = FakeBrowser::with_third_party_data();
        let storage = browser.storage(&["cookie"]);
        let cookies = [
            ("key_1", "val_1"),
            ("branch_session", "val_2"),
            ("branch_session_first", "val_3"),
        ];
        for (name, value) in cookies {
            storage.set(name, value).unwrap();
        }

        storage.clear().unwrap();

        for (name, _) in cookies {
            assert_eq!(storage.get(name), None, "{name} survived clear");
        }
        browser.assert_third_party_data_intact();
    }

    #[test]
    fn get_all_returns_owned_cookies_only() {
        let browser = FakeBrowser::with_third_party_data();
        let storage = browser.storage(&["cookie"]);
        let expected = [
            ("key_1", "val_1"),
            ("branch_session", "val_2"),
            ("branch_session_first", "val_3"),
        ];
        for (name, value) in expected {
            storage.set(name, value).unwrap();
        }

        let actual = storage.get_all();
        assert_eq!(actual.len(), expected.len());
        for (name, value) in expected {
            assert_eq!(actual.get(name).map(String::as_str), Some(value));
        }
        for (name, _) in THIRD_PARTY_COOKIES {
            assert!(!actual.contains_key(name), "{name} leaked into get_all");
        }
    }

    #[test]
    fn third_party_cookies_remain_after_clear() {
        let browser = FakeBrowser::with_third_party_data();
        let storage = browser.storage(&["cookie"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        storage.clear().unwrap();
        assert_eq!(
            browser.raw_cookies(),
            "non_branch_cookie_1=abc; non_branch_cookie_2=def; non_branch_cookie_3=ghi"
        );
    }

    #[test]
    fn foreign_cookie_with_owned_name_is_cleared() {
        let browser = FakeBrowser::new();
        branch_storage::host::CookieHost::write(browser.cookies.as_ref(), "branch_session_first=1")
            .unwrap();
        let storage = browser.storage(&["cookie"]);
        assert_eq!(storage.get("branch_session_first").as_deref(), Some("1"));
        storage.clear().unwrap();
        assert_eq!(browser.raw_cookies(), "");
    }

    #[test]
    fn configured_names_are_owned_before_first_set() {
        let browser = FakeBrowser::with_third_party_data();
        let config = StorageConfig::new().cookie(
            branch_storage::CookieConfig::new().owned_name("non_branch_cookie_2"),
        );
        let storage = browser.storage_with_config(&["cookie"], config);
        assert_eq!(storage.get("non_branch_cookie_2").as_deref(), Some("def"));
        assert_eq!(storage.get_all().len(), 1);
    }
}

mod pojo_storage {
    use super::*;

    #[test]
    fn set_stores_in_table() {
        let browser = FakeBrowser::new();
        let storage = browser.storage(&["pojo"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        assert_eq!(
            browser
                .memory
                .get(&format!("{BRANCH_KEY_PREFIX}{ITEM_KEY}"))
                .as_deref(),
            Some(ITEM_VALUE)
        );
    }

    #[test]
    fn unstored_item_is_none() {
        let storage = FakeBrowser::new().storage(&["pojo"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        assert_eq!(storage.get(ITEM_KEY_UNSTORED), None);
    }

    #[test]
    fn clear_leaves_no_entry() {
        let browser = FakeBrowser::new();
        let storage = browser.storage(&["pojo"]);
        storage.set(ITEM_KEY, ITEM_VALUE).unwrap();
        storage.clear().unwrap();
        assert!(!browser
            .memory
            .contains_key(&format!("{BRANCH_KEY_PREFIX}{ITEM_KEY}")));
        assert_eq!(storage.get(ITEM_KEY), None);
    }

    #[test]
    fn instances_sharing_a_table_share_data() {
        let browser = FakeBrowser::new();
        let first = browser.storage(&["pojo"]);
        let second = browser.storage(&["pojo"]);
        first.set(ITEM_KEY, ITEM_VALUE).unwrap();
        assert_eq!(second.get(ITEM_KEY).as_deref(), Some(ITEM_VALUE));
    }
}

mod selection {
    use super::*;

    #[test]
    fn private_mode_falls_through_to_cookies() {
        let browser = FakeBrowser::private_mode();
        let storage = browser.storage(&["session", "local", "cookie", "pojo"]);
        assert_eq!(storage.kind(), BackendKind::Cookie);
    }

    #[test]
    fn file_origin_skips_cookies() {
        let browser = FakeBrowser::file_origin();
        let storage = browser.storage(&["cookie", "local"]);
        assert_eq!(storage.kind(), BackendKind::LocalStorage);
        assert!(browser.local.table().is_empty(), "probe left residue");
    }

    #[test]
    fn locked_down_browser_falls_back_to_memory() {
        let browser = FakeBrowser::locked_down();
        let storage = browser.storage(&["session", "local", "cookie"]);
        assert_eq!(storage.kind(), BackendKind::InMemory);
        assert!(storage.is_fallback());
        assert_backend_contract(&storage);
    }

    #[test]
    fn locked_down_without_fallback_fails() {
        let browser = FakeBrowser::locked_down();
        let result = branch_storage::BranchStorage::with_config(
            ["session", "cookie"],
            &browser.environment(),
            StorageConfig::new().fallback_to_memory(false),
        );
        assert!(result.is_err());
    }

    #[test]
    fn get_all_serializes_as_plain_object() {
        let storage = FakeBrowser::new().storage(&["session"]);
        storage.set("a", "1").unwrap();
        let json = serde_json::to_value(storage.get_all()).unwrap();
        assert_eq!(json, serde_json::json!({ "a": "1" }));
    }
}
