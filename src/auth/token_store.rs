//! Durable storage for the bearer credential.
//!
//! SYSTEM CONTEXT
//! ==============
//! One key holds the raw token string; there is no schema and no encryption.
//! The HTTP pipeline reads it on every request and the session controller
//! writes it on login/logout, so both share one cloned `TokenStore`.
//!
//! TRADE-OFFS
//! ==========
//! Browser storage is best-effort: when `localStorage` is unavailable (SSR,
//! private mode quota errors) reads return `None` and writes are dropped.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Key-value backend the token store persists through.
pub trait TokenStorage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage` backend. No-ops outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStorage for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn write(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                report_storage_result("write", storage.set_item(key, value));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                report_storage_result("remove", storage.remove_item(key));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Log a rejected `localStorage` operation; true when it went through.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn report_storage_result<E>(operation: &str, result: Result<(), E>) -> bool {
    if result.is_err() {
        log::warn!("token store: localStorage {operation} rejected");
        return false;
    }
    true
}

/// Process-local backend used for SSR and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Single-slot credential store. Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct TokenStore {
    key: Arc<str>,
    backend: Arc<dyn TokenStorage>,
}

impl TokenStore {
    pub fn new(key: &str, backend: Arc<dyn TokenStorage>) -> Self {
        Self { key: Arc::from(key), backend }
    }

    /// Browser-backed store under `key`.
    pub fn browser(key: &str) -> Self {
        Self::new(key, Arc::new(LocalStorage))
    }

    /// Fresh in-memory store under `key`.
    pub fn in_memory(key: &str) -> Self {
        Self::new(key, Arc::new(MemoryStorage::default()))
    }

    /// Persist `token`, or clear the slot when `token` is `None` or empty.
    pub fn set(&self, token: Option<&str>) {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => self.backend.write(&self.key, token),
            None => self.clear(),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.backend.read(&self.key).filter(|t| !t.is_empty())
    }

    /// Remove the credential. Idempotent.
    pub fn clear(&self) {
        self.backend.remove(&self.key);
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").field("key", &self.key).finish_non_exhaustive()
    }
}
