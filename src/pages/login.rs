//! Email + password login page.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::provider::use_auth;
use crate::auth::session::SessionState;

const MISSING_FIELDS: &str = "Enter both email and password.";

fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// A login request is in flight. Start-up hydration does not count.
fn login_in_flight(state: &SessionState) -> bool {
    state.loading && state.is_initialized()
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let hint = RwSignal::new(None::<&'static str>);

    let submitted = RwSignal::new(false);

    // Arriving already signed in: go straight to wherever the user was headed.
    // After a submit from this page the login call does its own redirect.
    let signed_in = Memo::new(move |_| auth.state.with(|s| s.is_initialized() && s.user.is_some()));
    let navigate_away = navigate.clone();
    Effect::new(move || {
        if signed_in.get() && !submitted.get_untracked() && auth.is_authenticated() {
            navigate_away(
                &auth.take_intended(),
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    let busy = move || auth.state.with(login_in_flight);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.state.with_untracked(login_in_flight) {
            return;
        }
        match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
            Ok((email_value, password_value)) => {
                hint.set(None);
                submitted.set(true);
                auth.login(email_value, password_value, navigate.clone());
            }
            Err(message) => hint.set(Some(message)),
        }
    };

    let message = move || hint.get().map(str::to_owned).or_else(|| auth.error());

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in to PriceWatcher"</h1>
                <Show when=move || message().is_some()>
                    <p class="login-message login-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        disabled=busy
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        disabled=busy
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
