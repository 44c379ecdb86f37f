use super::*;

#[test]
fn default_state_has_media_toggles_on() {
    let state = CallState::default();
    assert!(state.mic_on);
    assert!(state.camera_on);
    assert!(!state.connected);
    assert_eq!(state.negotiation, NegotiationState::Stable);
    assert_eq!(state.socket_status, ConnectionStatus::Disconnected);
}

#[test]
fn begin_call_marks_connected() {
    let mut state = CallState::default();
    state.begin_call();
    assert!(state.connected);
}

#[test]
fn end_call_resets_negotiation_and_toggles() {
    let mut state = CallState {
        connected: true,
        negotiation: NegotiationState::HaveLocalOffer,
        mic_on: false,
        camera_on: false,
        ..CallState::default()
    };

    state.end_call();

    assert!(!state.connected);
    assert_eq!(state.negotiation, NegotiationState::Stable);
    assert!(state.mic_on);
    assert!(state.camera_on);
}

#[test]
fn note_user_id_keeps_the_first_id() {
    let mut state = CallState::default();
    state.note_user_id("u-1");
    state.note_user_id("u-2");
    assert_eq!(state.user_id.as_deref(), Some("u-1"));
}
