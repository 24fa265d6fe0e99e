//! Client-side authentication: credential storage, claim decoding, session
//! lifecycle, and route protection.
//!
//! ARCHITECTURE
//! ============
//! `token_store` and `claims` are leaf helpers, `session` is the state
//! record, `controller` owns its lifecycle, and `provider` / `guard` expose
//! it to Leptos.

pub mod claims;
pub mod controller;
pub mod error;
pub mod guard;
pub mod provider;
pub mod session;
pub mod token_store;
