//! Reusable checks for the backend contract.
//!
//! Every backend must satisfy the same observable behaviour; these helpers
//! exercise a bound [`BranchStorage`] and panic with a descriptive message on
//! the first violation.

use branch_storage::BranchStorage;

/// Key that is never written by the contract checks.
pub const UNSET_KEY: &str = "key_unstored";

/// Asserts that `set` followed by `get` returns `value`.
pub fn assert_round_trip(storage: &BranchStorage, key: &str, value: &str) {
    storage
        .set(key, value)
        .unwrap_or_else(|e| panic!("{}: set({key:?}) failed: {e}", storage.kind()));
    assert_eq!(
        storage.get(key).as_deref(),
        Some(value),
        "{}: get({key:?}) after set",
        storage.kind()
    );
}

/// Runs the full contract against `storage`.
///
/// Uses the cookie backend's default names plus one adopted name so the
/// same check applies to every backend.
/// Leaves the storage cleared.
pub fn assert_backend_contract(storage: &BranchStorage) {
    let kind = storage.kind();
    storage.clear().expect("initial clear");

    assert_eq!(storage.get(UNSET_KEY), None, "{kind}: unset key");

    assert_round_trip(storage, "branch_session", "value");
    assert_round_trip(storage, "branch_session", "overwritten");
    assert_round_trip(storage, "branch_session_first", "");
    assert_round_trip(storage, "key_1", "needs; encoding=yes");

    let all = storage.get_all();
    assert_eq!(all.len(), 3, "{kind}: get_all after three sets: {all:?}");
    assert_eq!(all.get("branch_session").map(String::as_str), Some("overwritten"));
    assert_eq!(all.get("branch_session_first").map(String::as_str), Some(""));
    assert_eq!(all.get("key_1").map(String::as_str), Some("needs; encoding=yes"));

    storage.remove("branch_session").expect("remove");
    assert_eq!(storage.get("branch_session"), None, "{kind}: get after remove");
    storage.remove("branch_session").expect("remove of missing key");
    storage.remove(UNSET_KEY).expect("remove of never-set key");

    storage.clear().expect("clear");
    assert_eq!(storage.get("key_1"), None, "{kind}: get after clear");
    assert_eq!(storage.get("branch_session_first"), None, "{kind}: get after clear");
    assert!(storage.get_all().is_empty(), "{kind}: get_all after clear");
}
