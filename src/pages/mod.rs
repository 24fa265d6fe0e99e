//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `login` is the only public route; every other page is mounted behind
//! `RequireAuth` by the router in `app`.

pub mod alerts;
pub mod dashboard;
pub mod login;
pub mod products;
pub mod settings;
