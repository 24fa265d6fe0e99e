//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` is the shared request pipeline, `transport` the fetch seam,
//! `auth_api` and `resources` the typed endpoint wrappers, and `types` the
//! wire schema.

pub mod auth_api;
pub mod client;
pub mod error;
pub mod resources;
pub mod transport;
pub mod types;
