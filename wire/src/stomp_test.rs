use super::*;

fn parse_single(input: &str) -> Frame {
    let mut frames = parse_payload(input).expect("payload should parse");
    assert_eq!(frames.len(), 1, "expected exactly one frame");
    frames.remove(0)
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn connect_frame_serializes_without_escaping() {
    let text = connect("chat.example", (4000, 4000)).serialize();
    assert_eq!(
        text,
        "CONNECT\naccept-version:1.2\nhost:chat.example\nheart-beat:4000,4000\n\n\0"
    );
}

#[test]
fn subscribe_frame_carries_id_destination_and_auto_ack() {
    let text = subscribe("sub-0", "/topic/dm/42").serialize();
    assert_eq!(
        text,
        "SUBSCRIBE\nid:sub-0\ndestination:/topic/dm/42\nack:auto\n\n\0"
    );
}

#[test]
fn send_frame_appends_content_length_for_body() {
    let text = send_json("/app/dm/42", "{\"content\":\"hi\"}").serialize();
    assert_eq!(
        text,
        "SEND\ndestination:/app/dm/42\ncontent-type:application/json\ncontent-length:16\n\n{\"content\":\"hi\"}\0"
    );
}

#[test]
fn serialize_keeps_caller_supplied_content_length() {
    let frame = Frame::new(Command::Send)
        .header("destination", "/app/dm/1")
        .header("content-length", "2")
        .body("hi");
    let text = frame.serialize();
    assert_eq!(text.matches("content-length").count(), 1);
}

#[test]
fn disconnect_frame_is_bare() {
    assert_eq!(disconnect().serialize(), "DISCONNECT\n\n\0");
}

#[test]
fn headers_escape_reserved_characters_outside_connect() {
    let frame = Frame::new(Command::Send).header("destination", "a:b\\c\nd");
    let text = frame.serialize();
    assert!(text.contains("destination:a\\cb\\\\c\\nd\n"));
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn parses_connected_frame_with_version_and_heart_beat() {
    let frame = parse_single("CONNECTED\nversion:1.2\nheart-beat:10000,10000\n\n\0");
    assert_eq!(frame.command, Command::Connected);
    assert_eq!(frame.header_value("version"), Some("1.2"));
    assert_eq!(frame.heart_beat(), (10_000, 10_000));
}

#[test]
fn parses_message_frame_body() {
    let frame = parse_single(
        "MESSAGE\ndestination:/topic/dm/42\nmessage-id:m-1\nsubscription:sub-0\n\n{\"type\":\"SEND\"}\0",
    );
    assert_eq!(frame.command, Command::Message);
    assert_eq!(frame.body, "{\"type\":\"SEND\"}");
}

#[test]
fn accepts_crlf_line_endings() {
    let frame = parse_single("MESSAGE\r\ndestination:/topic/dm/1\r\n\r\nbody\0");
    assert_eq!(frame.header_value("destination"), Some("/topic/dm/1"));
    assert_eq!(frame.body, "body");
}

#[test]
fn heartbeat_only_payload_yields_no_frames() {
    assert_eq!(parse_payload("\n").expect("parse"), vec![]);
    assert_eq!(parse_payload("\r\n\n").expect("parse"), vec![]);
}

#[test]
fn skips_heartbeat_eols_around_frames() {
    let frames =
        parse_payload("\nMESSAGE\ndestination:/topic/dm/1\n\na\0\n\nMESSAGE\ndestination:/topic/dm/1\n\nb\0\n")
            .expect("parse");
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].body, "a");
    assert_eq!(frames[1].body, "b");
}

#[test]
fn content_length_preserves_nul_inside_body() {
    let frame = parse_single("MESSAGE\ncontent-length:3\n\na\0b\0");
    assert_eq!(frame.body, "a\0b");
}

#[test]
fn serialize_parse_round_trips_escaped_headers() {
    let frame = Frame::new(Command::Send)
        .header("destination", "/app/dm/1")
        .header("note", "a:b\nc\\d")
        .body("{}");
    let parsed = parse_single(&frame.serialize());
    assert_eq!(parsed.header_value("note"), Some("a:b\nc\\d"));
    assert_eq!(parsed.body, "{}");
}

#[test]
fn repeated_header_keeps_first_occurrence() {
    let frame = parse_single("MESSAGE\nfoo:first\nfoo:second\n\n\0");
    assert_eq!(frame.header_value("foo"), Some("first"));
}

#[test]
fn rejects_unknown_command() {
    let err = parse_payload("NACK\n\n\0").expect_err("command should fail");
    assert_eq!(err, StompError::UnknownCommand("NACK".to_owned()));
}

#[test]
fn rejects_header_without_colon() {
    let err = parse_payload("MESSAGE\nnocolon\n\n\0").expect_err("header should fail");
    assert_eq!(err, StompError::MalformedHeader("nocolon".to_owned()));
}

#[test]
fn rejects_invalid_escape_sequence() {
    let err = parse_payload("MESSAGE\nfoo:bad\\tescape\n\n\0").expect_err("escape should fail");
    assert!(matches!(err, StompError::MalformedHeader(_)));
}

#[test]
fn connect_headers_are_taken_literally() {
    let frame = parse_single("CONNECTED\nserver:Apache\\ActiveMQ\n\n\0");
    assert_eq!(frame.header_value("server"), Some("Apache\\ActiveMQ"));
}

#[test]
fn rejects_missing_nul_terminator() {
    let err = parse_payload("MESSAGE\n\nbody").expect_err("frame should fail");
    assert_eq!(err, StompError::MissingTerminator);
}

#[test]
fn rejects_non_numeric_content_length() {
    let err = parse_payload("MESSAGE\ncontent-length:abc\n\n\0").expect_err("length should fail");
    assert_eq!(err, StompError::BadContentLength("abc".to_owned()));
}

#[test]
fn rejects_content_length_past_payload_end() {
    let err = parse_payload("MESSAGE\ncontent-length:10\n\nabc\0").expect_err("length should fail");
    assert_eq!(err, StompError::TruncatedBody { expected: 10 });
}

#[test]
fn rejects_body_overrunning_declared_length() {
    let err =
        parse_payload("MESSAGE\ncontent-length:2\n\nabcdef\0").expect_err("terminator should fail");
    assert_eq!(err, StompError::MissingTerminator);
}

// ============================================================================
// Heart-beat negotiation
// ============================================================================

#[test]
fn negotiation_picks_slower_interval_per_direction() {
    let negotiated = negotiate_heart_beat((4000, 4000), (10_000, 5000));
    assert_eq!(negotiated.send_every_ms, 5000);
    assert_eq!(negotiated.expect_every_ms, 10_000);
}

#[test]
fn negotiation_disables_direction_on_zero() {
    let negotiated = negotiate_heart_beat((4000, 4000), (0, 0));
    assert_eq!(negotiated, HeartBeat::default());

    let negotiated = negotiate_heart_beat((0, 4000), (10_000, 10_000));
    assert_eq!(negotiated.send_every_ms, 0);
    assert_eq!(negotiated.expect_every_ms, 10_000);
}

#[test]
fn missing_heart_beat_header_reads_as_disabled() {
    let frame = parse_single("CONNECTED\nversion:1.2\n\n\0");
    assert_eq!(frame.heart_beat(), (0, 0));
}

#[test]
fn malformed_heart_beat_header_reads_as_disabled() {
    let frame = parse_single("CONNECTED\nheart-beat:fast,loose\n\n\0");
    assert_eq!(frame.heart_beat(), (0, 0));
}
