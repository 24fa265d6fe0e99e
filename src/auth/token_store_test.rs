use super::*;

// =============================================================
// TokenStore
// =============================================================

#[test]
fn get_is_none_on_fresh_store() {
    let store = TokenStore::in_memory("token");
    assert_eq!(store.get(), None);
}

#[test]
fn set_then_get_returns_token() {
    let store = TokenStore::in_memory("token");
    store.set(Some("abc.def.ghi"));
    assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));
}

#[test]
fn set_overwrites_previous_token() {
    let store = TokenStore::in_memory("token");
    store.set(Some("first"));
    store.set(Some("second"));
    assert_eq!(store.get().as_deref(), Some("second"));
}

#[test]
fn set_none_clears_existing_token() {
    let store = TokenStore::in_memory("token");
    store.set(Some("abc"));
    store.set(None);
    assert_eq!(store.get(), None);
}

#[test]
fn set_empty_string_clears_existing_token() {
    let store = TokenStore::in_memory("token");
    store.set(Some("abc"));
    store.set(Some(""));
    assert_eq!(store.get(), None);
}

#[test]
fn clear_is_idempotent() {
    let store = TokenStore::in_memory("token");
    store.set(Some("abc"));
    store.clear();
    store.clear();
    assert_eq!(store.get(), None);
}

#[test]
fn clones_share_the_same_slot() {
    let store = TokenStore::in_memory("token");
    let other = store.clone();
    store.set(Some("shared"));
    assert_eq!(other.get().as_deref(), Some("shared"));
    other.clear();
    assert_eq!(store.get(), None);
}

#[test]
fn stores_with_different_keys_do_not_collide() {
    let backend: Arc<dyn TokenStorage> = Arc::new(MemoryStorage::default());
    let a = TokenStore::new("a", backend.clone());
    let b = TokenStore::new("b", backend);
    a.set(Some("token-a"));
    assert_eq!(b.get(), None);
    assert_eq!(a.key(), "a");
}

// =============================================================
// LocalStorage (off-browser)
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_storage_is_noop_off_browser() {
    let store = TokenStore::browser("token");
    store.set(Some("abc"));
    assert_eq!(store.get(), None);
    store.clear();
}

#[test]
fn rejected_storage_operations_are_reported() {
    assert!(report_storage_result::<()>("write", Ok(())));
    assert!(!report_storage_result("write", Err("quota exceeded")));
    assert!(!report_storage_result("remove", Err("security error")));
}
