//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. Only `SessionController`
//! mutates it; the UI reads snapshots mirrored into a signal.
//!
//! DESIGN
//! ======
//! `phase` is the state machine: `Uninitialized` until the first hydration
//! resolves, then `Authenticated` or `Anonymous`. `user` is `Some` exactly in
//! `Authenticated`; the transition methods below are the only writers.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::claims::UserIdentity;

/// Public login route; never recorded as a post-login destination.
pub const LOGIN_PATH: &str = "/login";

/// Where a successful login lands when nothing was recorded.
pub const DEFAULT_DESTINATION: &str = "/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Authenticated,
    Anonymous,
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserIdentity>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: SessionPhase,
    /// Path the user tried to reach before being sent to login.
    pub intended: Option<String>,
    /// Set by an explicit logout; guards then redirect without recording.
    pub signed_out: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
            phase: SessionPhase::Uninitialized,
            intended: None,
            signed_out: false,
        }
    }
}

impl SessionState {
    pub fn is_initialized(&self) -> bool {
        self.phase != SessionPhase::Uninitialized
    }

    /// First hydration result. Later calls only clear `loading`.
    pub fn resolve_init(&mut self, user: Option<UserIdentity>) {
        if self.phase == SessionPhase::Uninitialized {
            self.phase = if user.is_some() {
                SessionPhase::Authenticated
            } else {
                SessionPhase::Anonymous
            };
            self.user = user;
        }
        self.loading = false;
    }

    pub fn begin_login(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn login_succeeded(&mut self, user: UserIdentity) {
        self.user = Some(user);
        self.phase = SessionPhase::Authenticated;
        self.error = None;
        self.loading = false;
        self.signed_out = false;
    }

    /// Rejected login. An existing session is left as it was.
    pub fn login_failed(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Expiry or server-side invalidation.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.phase = SessionPhase::Anonymous;
        self.error = None;
        self.loading = false;
    }

    /// User-initiated logout. Forgets any recorded destination and keeps
    /// the page being left from becoming one.
    pub fn end_session(&mut self) {
        self.sign_out();
        self.intended = None;
        self.signed_out = true;
    }

    pub fn record_intended(&mut self, path: &str) {
        if !self.signed_out && is_recordable(path) {
            self.intended = Some(path.to_owned());
        }
    }

    /// Consume the recorded destination, defaulting to `/`.
    pub fn take_intended(&mut self) -> String {
        self.intended
            .take()
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_owned())
    }
}

fn is_recordable(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && path != LOGIN_PATH && !path.starts_with("/login?")
}
