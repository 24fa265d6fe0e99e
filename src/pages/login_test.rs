use super::*;

#[test]
fn validate_login_input_trims_email() {
    assert_eq!(
        validate_login_input("  user@example.com ", "pw"),
        Ok(("user@example.com".to_owned(), "pw".to_owned()))
    );
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    assert_eq!(
        validate_login_input("a@b.com", " spaced pw "),
        Ok(("a@b.com".to_owned(), " spaced pw ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "pw"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter both email and password."));
}

#[test]
fn submit_allowed_while_session_is_still_hydrating() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(!login_in_flight(&state));
}

#[test]
fn submit_blocked_only_while_login_is_in_flight() {
    let mut state = SessionState::default();
    state.resolve_init(None);
    assert!(!login_in_flight(&state));
    state.begin_login();
    assert!(login_in_flight(&state));
    state.login_failed("Login failed".to_owned());
    assert!(!login_in_flight(&state));
}
