use super::*;

#[test]
fn should_redirect_unauth_when_token_missing() {
    let state = AuthState::default();

    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_token_present() {
    let state = AuthState {
        token: Some("jwt".to_owned()),
        ..AuthState::default()
    };

    assert!(!should_redirect_unauth(&state));
}
