//! # pricewatch-web
//!
//! Leptos + WASM client for the PriceWatcher dashboard.
//!
//! The crate centres on client-side authentication: the bearer credential in
//! `localStorage`, offline claim decoding, the session lifecycle, the shared
//! REST pipeline that authorizes every call, and the route guard in front of
//! every protected page. Pages are thin consumers of that machinery.

pub mod app;
pub mod auth;
pub mod config;
pub mod net;
pub mod pages;

#[cfg(test)]
mod test_support;

/// Browser entry point for server-rendered deployments.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    init_browser_logging();
    leptos::mount::hydrate_body(app::App);
}

/// Browser entry point for static (client-rendered) deployments.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn mount() {
    init_browser_logging();
    leptos::mount::mount_to_body(app::App);
}

#[cfg(feature = "hydrate")]
fn init_browser_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
