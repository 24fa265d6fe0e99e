//! Authenticated landing page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::provider::use_auth;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let display_name = move || {
        auth.user()
            .map(|u| if u.name.is_empty() { u.email } else { u.name })
            .unwrap_or_default()
    };

    view! {
        <section class="page page--dashboard">
            <header class="page__header">
                <h1>"Dashboard"</h1>
                <span class="page__user">{display_name}</span>
                <button class="page__logout" on:click=move |_| auth.logout(navigate.clone())>
                    "Log out"
                </button>
            </header>
            <nav class="page__nav">
                <a href="/products">"Products"</a>
                <a href="/alerts">"Alerts"</a>
                <a href="/settings">"Settings"</a>
            </nav>
        </section>
    }
}
