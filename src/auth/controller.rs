//! Session owner: hydration, login, logout, and invalidation fan-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! One controller lives for the lifetime of the `AuthProvider`. It owns the
//! shared `SessionState`, writes the credential through `TokenStore`, and is
//! the only party that registers the `ApiClient` unauthorized hook. UI layers
//! observe it through `subscribe` and do their own navigation.
//!
//! DESIGN
//! ======
//! `is_authenticated` is the local check (credential present and not
//! expired). The `401` hook is authoritative for forced logout; the local
//! check only pre-empts credentials that are obviously stale.
//!
//! Every state write that follows an `await` is gated on the liveness flag so
//! a torn-down provider never receives late updates.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::claims::{self, UserIdentity};
use super::error::AuthError;
use super::session::SessionState;
use crate::net::auth_api::AuthApi;
use crate::net::client::ApiClient;

/// What happened to the session, delivered to subscribers with a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Changed,
    /// The API rejected the credential; the user must sign in again.
    Invalidated,
}

pub type SessionListener = Arc<dyn Fn(SessionEvent, &SessionState) + Send + Sync>;

/// Result of a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginSuccess {
    pub user: UserIdentity,
    /// Consumed intended destination, `/` by default.
    pub redirect_to: String,
}

struct Shared {
    state: Mutex<SessionState>,
    listeners: Mutex<Vec<(u64, SessionListener)>>,
    next_listener: AtomicU64,
    alive: AtomicBool,
}

impl Shared {
    fn snapshot(&self) -> SessionState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn apply<R>(&self, event: SessionEvent, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let result = f(&mut state);
            (result, state.clone())
        };
        let listeners: Vec<SessionListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(event, &snapshot);
        }
        result
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Drop to stop receiving session events.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    shared: Weak<Shared>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[derive(Clone)]
pub struct SessionController {
    api: ApiClient,
    shared: Arc<Shared>,
    clock: fn() -> i64,
}

impl SessionController {
    /// Take ownership of `api`'s unauthorized hook.
    pub fn new(api: ApiClient) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(0),
            alive: AtomicBool::new(true),
        });

        let hook_target = Arc::downgrade(&shared);
        api.set_unauthorized_hook(Arc::new(move || {
            let Some(shared) = hook_target.upgrade() else {
                return;
            };
            if shared.is_alive() {
                log::info!("session invalidated by API");
                shared.apply(SessionEvent::Invalidated, SessionState::sign_out);
            }
        }));

        Self {
            api,
            shared,
            clock: claims::now_secs,
        }
    }

    /// Override the time source used for expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> SessionState {
        self.shared.snapshot()
    }

    /// Credential present and not expired.
    pub fn is_authenticated(&self) -> bool {
        let token = self.api.token_store().get();
        !claims::is_expired_at(token.as_deref(), (self.clock)())
    }

    /// Hydrate from the stored credential, discarding it when unusable.
    pub fn init(&self) {
        let store = self.api.token_store();
        let user = store.get().and_then(|token| {
            let user = if claims::is_expired_at(Some(token.as_str()), (self.clock)()) {
                None
            } else {
                claims::decode(&token)
            };
            if user.is_none() {
                log::debug!("discarding stored credential: malformed or expired");
                store.clear();
            }
            user
        });
        self.shared
            .apply(SessionEvent::Changed, |state| state.resolve_init(user));
    }

    /// Exchange credentials, persist the issued token, and consume the
    /// intended destination.
    ///
    /// # Errors
    ///
    /// `Rejected` with the server's message, `Failed` when none was given,
    /// `InvalidToken` when the issued credential is unusable, `Cancelled`
    /// when the controller was shut down mid-flight.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        self.shared.apply(SessionEvent::Changed, SessionState::begin_login);

        let result = self.exchange(email, password).await;
        if !self.shared.is_alive() {
            return Err(AuthError::Cancelled);
        }

        match result {
            Ok((token, user)) => {
                self.api.token_store().set(Some(token.as_str()));
                log::info!("signed in as {}", user.id);
                let redirect_to = self.shared.apply(SessionEvent::Changed, |state| {
                    state.login_succeeded(user.clone());
                    state.take_intended()
                });
                Ok(LoginSuccess { user, redirect_to })
            }
            Err(err) => {
                log::debug!("login failed: {err}");
                self.shared
                    .apply(SessionEvent::Changed, |state| state.login_failed(err.message()));
                Err(err)
            }
        }
    }

    async fn exchange(&self, email: &str, password: &str) -> Result<(String, UserIdentity), AuthError> {
        let response = AuthApi::new(self.api.clone()).login(email, password).await?;
        if claims::is_expired_at(Some(response.token.as_str()), (self.clock)()) {
            return Err(AuthError::InvalidToken);
        }
        let user = response
            .user
            .or_else(|| claims::decode(&response.token))
            .ok_or(AuthError::InvalidToken)?;
        Ok((response.token, user))
    }

    /// Clear the credential, the in-memory user, and any recorded destination.
    pub fn logout(&self) {
        self.api.token_store().clear();
        self.shared.apply(SessionEvent::Changed, SessionState::end_session);
    }

    /// Remember where an unauthenticated navigation was headed.
    pub fn record_intended(&self, path: &str) {
        self.shared
            .apply(SessionEvent::Changed, |state| state.record_intended(path));
    }

    /// Consume the recorded destination, defaulting to `/`.
    pub fn take_intended(&self) -> String {
        self.shared.apply(SessionEvent::Changed, SessionState::take_intended)
    }

    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let id = self.shared.next_listener.fetch_add(1, Ordering::Relaxed);
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        Subscription {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    /// Stop all further state writes and release the API hook.
    pub fn shutdown(&self) {
        self.shared.alive.store(false, Ordering::Release);
        self.api.clear_unauthorized_hook();
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn is_alive(&self) -> bool {
        self.shared.is_alive()
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("api", &self.api)
            .field("state", &self.shared.snapshot())
            .finish_non_exhaustive()
    }
}
