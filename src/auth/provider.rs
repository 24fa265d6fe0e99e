//! Leptos context around the session controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthProvider` sits inside the router, builds one `SessionController`,
//! hydrates it on mount, and mirrors every session change into a signal that
//! guards and pages read. It is also where invalidation becomes navigation:
//! the HTTP layer only reports a rejected credential, this component sends
//! the user to `/login`.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::claims::UserIdentity;
use super::controller::{SessionController, SessionEvent};
use super::session::{LOGIN_PATH, SessionState};
use crate::config::AppConfig;
use crate::net::client::ApiClient;

/// Auth session context shared through Leptos.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<SessionState>,
    controller: StoredValue<SessionController>,
}

fn replace_history() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..NavigateOptions::default()
    }
}

impl AuthContext {
    fn new(controller: SessionController) -> Self {
        Self {
            state: RwSignal::new(controller.state()),
            controller: StoredValue::new(controller),
        }
    }

    pub fn controller(&self) -> SessionController {
        self.controller.get_value()
    }

    /// Shared request pipeline for feature API wrappers.
    pub fn api(&self) -> ApiClient {
        self.controller.with_value(|c| c.api().clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.controller.with_value(SessionController::is_authenticated)
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.state.with(|s| s.user.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn record_intended(&self, path: &str) {
        self.controller.with_value(|c| c.record_intended(path));
    }

    pub fn take_intended(&self) -> String {
        self.controller.with_value(SessionController::take_intended)
    }

    /// Start a login; on success navigate to the intended destination,
    /// replacing the login entry in history.
    pub fn login<F>(&self, email: String, password: String, navigate: F)
    where
        F: Fn(&str, NavigateOptions) + 'static,
    {
        let controller = self.controller();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Ok(success) = controller.login(&email, &password).await {
                navigate(&success.redirect_to, replace_history());
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (controller, email, password, navigate);
        }
    }

    pub fn logout<F>(&self, navigate: F)
    where
        F: Fn(&str, NavigateOptions),
    {
        self.controller.with_value(SessionController::logout);
        navigate(LOGIN_PATH, NavigateOptions::default());
    }
}

/// Provides auth context and hydrates the session once on mount.
#[component]
pub fn AuthProvider(
    /// Preconfigured controller; defaults to the browser-backed one.
    #[prop(optional)]
    controller: Option<SessionController>,
    children: Children,
) -> impl IntoView {
    let controller =
        controller.unwrap_or_else(|| SessionController::new(ApiClient::from_config(&AppConfig::load())));
    let auth = AuthContext::new(controller.clone());
    provide_context(auth);

    let state = auth.state;
    let invalidations = RwSignal::new(0_u64);
    let subscription = controller.subscribe(Arc::new(move |event, snapshot| {
        state.set(snapshot.clone());
        if event == SessionEvent::Invalidated {
            invalidations.update(|n| *n += 1);
        }
    }));

    // Effects only run in the browser, where the credential lives.
    let init_controller = controller.clone();
    Effect::new(move || init_controller.init());

    let navigate = use_navigate();
    let location = use_location();
    Effect::new(move || {
        if invalidations.get() == 0 {
            return;
        }
        auth.record_intended(&location.pathname.get_untracked());
        navigate(LOGIN_PATH, replace_history());
    });

    on_cleanup(move || {
        drop(subscription);
        controller.shutdown();
    });

    children()
}

/// Returns the auth context installed by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
