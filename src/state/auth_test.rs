use super::*;

#[test]
fn default_state_is_unauthenticated() {
    let state = AuthState::default();
    assert!(state.token.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn default_state_points_at_local_backend() {
    let state = AuthState::default();
    assert_eq!(state.server_base, "http://localhost:8080");
}

#[test]
fn state_with_token_is_authenticated() {
    let state = AuthState {
        token: Some("tok-123".to_owned()),
        ..AuthState::default()
    };
    assert!(state.is_authenticated());
}
