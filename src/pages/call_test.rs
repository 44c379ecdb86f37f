use super::*;

// ==== channel_heading ====

#[test]
fn heading_prefers_the_label() {
    assert_eq!(
        channel_heading(Some("4123312312312662345"), Some("general")),
        "Channel: general"
    );
}

#[test]
fn heading_falls_back_to_the_id() {
    assert_eq!(
        channel_heading(Some("4123312312312662345"), None),
        "Channel 4123312312312662345"
    );
}

#[test]
fn heading_handles_a_missing_route_param() {
    assert_eq!(channel_heading(None, None), "Channel");
}

// ==== status text ====

#[test]
fn socket_status_line_names_every_state() {
    assert_eq!(
        socket_status_line(ConnectionStatus::Connected),
        "Signaling connected"
    );
    assert_eq!(
        socket_status_line(ConnectionStatus::Connecting),
        "Connecting..."
    );
    assert_eq!(
        socket_status_line(ConnectionStatus::Disconnected),
        "Signaling closed"
    );
}

#[test]
fn on_off_maps_both_states() {
    assert_eq!(on_off(true), "on");
    assert_eq!(on_off(false), "off");
}
