//! Account settings: identity summary and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::provider::use_auth;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let email = move || auth.user().map(|u| u.email).unwrap_or_default();
    let name = move || auth.user().map(|u| u.name).unwrap_or_default();
    let role = move || auth.user().map(|u| u.role).unwrap_or_default();

    view! {
        <section class="page page--settings">
            <h1>"Settings"</h1>
            <dl class="settings-identity">
                <dt>"Email"</dt>
                <dd>{email}</dd>
                <dt>"Name"</dt>
                <dd>{name}</dd>
                <dt>"Role"</dt>
                <dd>{role}</dd>
            </dl>
            <button class="page__logout" on:click=move |_| auth.logout(navigate.clone())>
                "Log out"
            </button>
        </section>
    }
}
