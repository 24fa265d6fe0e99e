use std::sync::Arc;

use futures::executor::block_on;

use super::*;
use crate::auth::claims::UserIdentity;
use crate::auth::controller::SessionController;
use crate::test_support::{MockTransport, mock_client, token_expiring_at};

const NOW: i64 = 1_700_000_000;

fn fixed_clock() -> i64 {
    NOW
}

fn user() -> UserIdentity {
    UserIdentity {
        id: "u1".to_owned(),
        email: "user@example.com".to_owned(),
        name: "User".to_owned(),
        role: "user".to_owned(),
    }
}

#[test]
fn pending_while_uninitialized() {
    let state = SessionState::default();
    assert_eq!(guard_decision(&state, false, "/alerts"), GuardDecision::Pending);
    assert_eq!(guard_decision(&state, true, "/alerts"), GuardDecision::Pending);
}

#[test]
fn redirects_anonymous_with_requested_path() {
    let mut state = SessionState::default();
    state.resolve_init(None);
    assert_eq!(
        guard_decision(&state, false, "/alerts"),
        GuardDecision::Redirect {
            to: "/login",
            from: Some("/alerts".to_owned())
        }
    );
}

#[test]
fn explicit_logout_redirects_without_origin() {
    let mut state = SessionState::default();
    state.login_succeeded(user());
    state.end_session();
    assert_eq!(
        guard_decision(&state, false, "/settings"),
        GuardDecision::Redirect { to: "/login", from: None }
    );
}

#[test]
fn invalidated_session_still_redirects_with_origin() {
    let mut state = SessionState::default();
    state.login_succeeded(user());
    state.sign_out();
    assert_eq!(
        guard_decision(&state, false, "/products"),
        GuardDecision::Redirect {
            to: "/login",
            from: Some("/products".to_owned())
        }
    );
}

#[test]
fn allows_authenticated_user() {
    let mut state = SessionState::default();
    state.resolve_init(Some(user()));
    assert_eq!(guard_decision(&state, true, "/products"), GuardDecision::Allow);
}

#[test]
fn expired_credential_redirects_even_with_user_in_memory() {
    let mut state = SessionState::default();
    state.resolve_init(Some(user()));
    assert!(matches!(
        guard_decision(&state, false, "/settings"),
        GuardDecision::Redirect { .. }
    ));
}

#[test]
fn credential_without_user_redirects() {
    let mut state = SessionState::default();
    state.resolve_init(None);
    assert!(matches!(guard_decision(&state, true, "/"), GuardDecision::Redirect { .. }));
}

// =============================================================
// Redirect -> login round trip
// =============================================================

fn record_redirect(controller: &SessionController, path: &str) {
    if let GuardDecision::Redirect { from: Some(from), .. } =
        guard_decision(&controller.state(), controller.is_authenticated(), path)
    {
        controller.record_intended(&from);
    }
}

#[test]
fn login_after_guard_redirect_returns_to_requested_path() {
    let transport = Arc::new(MockTransport::default());
    let controller = SessionController::new(mock_client(&transport)).with_clock(fixed_clock);
    controller.init();

    record_redirect(&controller, "/alerts");
    assert_eq!(controller.state().intended.as_deref(), Some("/alerts"));

    transport.respond(200, &serde_json::json!({ "token": token_expiring_at("u1", NOW + 3_600) }));
    let success = block_on(controller.login("user@example.com", "correct-pw")).unwrap();

    assert_eq!(success.redirect_to, "/alerts");
}

#[test]
fn page_left_by_logout_is_not_the_next_destination() {
    let transport = Arc::new(MockTransport::default());
    let controller = SessionController::new(mock_client(&transport)).with_clock(fixed_clock);
    transport.respond(200, &serde_json::json!({ "token": token_expiring_at("u1", NOW + 3_600) }));
    block_on(controller.login("first@example.com", "pw")).unwrap();

    controller.logout();
    record_redirect(&controller, "/settings");
    assert_eq!(controller.state().intended, None);

    transport.respond(200, &serde_json::json!({ "token": token_expiring_at("u2", NOW + 3_600) }));
    let success = block_on(controller.login("second@example.com", "pw")).unwrap();

    assert_eq!(success.redirect_to, "/");
}
