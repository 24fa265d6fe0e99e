//! Route guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route wraps its page in `RequireAuth`, so unauthenticated
//! navigation is redirected identically everywhere and the requested path is
//! remembered for the post-login redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::provider::use_auth;
use super::session::{LOGIN_PATH, SessionState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not hydrated yet: render neither content nor redirect.
    Pending,
    /// `from` is `None` after an explicit logout, which leaves nothing to
    /// return to.
    Redirect { to: &'static str, from: Option<String> },
    Allow,
}

/// Decide what a protected route shows for `path`.
///
/// `authenticated` is the credential check; the in-memory user must agree
/// with it before content is allowed.
pub fn guard_decision(state: &SessionState, authenticated: bool, path: &str) -> GuardDecision {
    if !state.is_initialized() {
        return GuardDecision::Pending;
    }
    if authenticated && state.user.is_some() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect {
            to: LOGIN_PATH,
            from: (!state.signed_out).then(|| path.to_owned()),
        }
    }
}

/// Render `children` only for an authenticated session.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        let state = auth.state.get();
        guard_decision(&state, auth.is_authenticated(), &location.pathname.get())
    });

    Effect::new(move || {
        if let GuardDecision::Redirect { to, from } = decision.get() {
            if let Some(from) = from {
                auth.record_intended(&from);
            }
            navigate(
                to,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Allow
            fallback=|| view! { <div class="auth-pending" aria-busy="true"></div> }
        >
            {children()}
        </Show>
    }
}
