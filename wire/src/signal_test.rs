use super::*;

fn description(kind: &str) -> SessionDescription {
    SessionDescription {
        kind: kind.to_owned(),
        sdp: "v=0\r\no=- 0 0 IN IP4 0.0.0.0\r\n".to_owned(),
    }
}

#[test]
fn join_serializes_type_and_channel_only() {
    let json = serde_json::to_value(SignalMessage::join("4123")).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({"type": "join", "channelId": "4123"})
    );
}

#[test]
fn offer_serializes_envelope_and_description() {
    let message = SignalMessage::offer("4123", Some("user-7"), description("offer"));
    let json = serde_json::to_value(&message).expect("serialize");
    assert_eq!(json["type"], "offer");
    assert_eq!(json["channelId"], "4123");
    assert_eq!(json["from"], "user-7");
    assert_eq!(json["offer"]["type"], "offer");
    assert!(
        json["offer"]["sdp"]
            .as_str()
            .expect("sdp string")
            .starts_with("v=0")
    );
}

#[test]
fn from_is_omitted_until_known() {
    let json = serde_json::to_value(SignalMessage::offer("4123", None, description("offer")))
        .expect("serialize");
    assert!(json.get("from").is_none());
    assert!(json.get("userId").is_none());
}

#[test]
fn answer_parses_from_inbound_json() {
    let message: SignalMessage = serde_json::from_value(serde_json::json!({
        "type": "answer",
        "channelId": "4123",
        "from": "user-9",
        "answer": {"type": "answer", "sdp": "v=0\r\n"}
    }))
    .expect("deserialize");
    assert_eq!(message.from.as_deref(), Some("user-9"));
    let SignalPayload::Answer { answer } = message.payload else {
        panic!("expected answer payload");
    };
    assert_eq!(answer.kind, "answer");
}

#[test]
fn candidate_parses_init_dictionary() {
    let message: SignalMessage = serde_json::from_value(serde_json::json!({
        "type": "candidate",
        "channelId": "4123",
        "candidate": {
            "candidate": "candidate:1 1 udp 2122260223 192.0.2.1 54321 typ host",
            "sdpMid": "0",
            "sdpMLineIndex": 0
        }
    }))
    .expect("deserialize");
    let SignalPayload::Candidate { candidate } = message.payload else {
        panic!("expected candidate payload");
    };
    let candidate = candidate.expect("candidate present");
    assert_eq!(candidate.sdp_mid.as_deref(), Some("0"));
    assert_eq!(candidate.sdp_m_line_index, Some(0));
}

#[test]
fn null_candidate_marks_end_of_trickling() {
    let message: SignalMessage = serde_json::from_value(serde_json::json!({
        "type": "candidate",
        "channelId": "4123",
        "candidate": null
    }))
    .expect("deserialize");
    assert_eq!(message.payload, SignalPayload::Candidate { candidate: None });
}

#[test]
fn candidate_serializes_camel_case_fields() {
    let init = IceCandidateInit {
        candidate: "candidate:1 1 udp 1 192.0.2.1 1 typ host".to_owned(),
        sdp_mid: Some("audio".to_owned()),
        sdp_m_line_index: Some(1),
    };
    let json = serde_json::to_value(SignalMessage::candidate("4123", Some("me"), init))
        .expect("serialize");
    assert_eq!(json["candidate"]["sdpMid"], "audio");
    assert_eq!(json["candidate"]["sdpMLineIndex"], 1);
}

#[test]
fn unknown_kind_still_yields_envelope_fields() {
    let message: SignalMessage = serde_json::from_value(serde_json::json!({
        "type": "peer-left",
        "channelId": "4123",
        "userId": "user-3"
    }))
    .expect("deserialize");
    assert_eq!(message.user_id.as_deref(), Some("user-3"));
    assert_eq!(message.payload, SignalPayload::Other);
}

#[test]
fn join_ack_carries_assigned_user_id() {
    let message: SignalMessage = serde_json::from_value(serde_json::json!({
        "type": "join",
        "channelId": "4123",
        "userId": "user-42"
    }))
    .expect("deserialize");
    assert_eq!(message.user_id.as_deref(), Some("user-42"));
    assert_eq!(message.payload, SignalPayload::Join);
}
