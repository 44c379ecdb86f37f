use super::*;

#[test]
fn chat_message_uses_camel_case_field_names() {
    let message = ChatMessage {
        message_id: "567329414493245440".to_owned(),
        nick_name: "ada".to_owned(),
        content: "hello".to_owned(),
    };
    let json = serde_json::to_value(&message).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "messageId": "567329414493245440",
            "nickName": "ada",
            "content": "hello"
        })
    );
}

#[test]
fn chat_message_accepts_numeric_message_id() {
    let message: ChatMessage = serde_json::from_value(serde_json::json!({
        "messageId": 12345,
        "nickName": "ada",
        "content": "hello"
    }))
    .expect("deserialize");
    assert_eq!(message.message_id, "12345");
}

#[test]
fn chat_message_rejects_non_scalar_message_id() {
    let result = serde_json::from_value::<ChatMessage>(serde_json::json!({
        "messageId": ["nope"],
        "nickName": "ada",
        "content": "hello"
    }));
    assert!(result.is_err());
}

#[test]
fn dm_event_kind_round_trips_uppercase_tags() {
    for (kind, tag) in [
        (DmEventKind::Send, "\"SEND\""),
        (DmEventKind::Update, "\"UPDATE\""),
        (DmEventKind::Delete, "\"DELETE\""),
    ] {
        assert_eq!(serde_json::to_string(&kind).expect("serialize"), tag);
        assert_eq!(
            serde_json::from_str::<DmEventKind>(tag).expect("deserialize"),
            kind
        );
    }
}

#[test]
fn dm_event_parses_topic_payload() {
    let event: DmEvent = serde_json::from_str(
        "{\"type\":\"UPDATE\",\"message\":{\"messageId\":\"9\",\"nickName\":\"ada\",\"content\":\"edited\"}}",
    )
    .expect("deserialize");
    assert_eq!(event.kind, DmEventKind::Update);
    assert_eq!(event.message.message_id, "9");
    assert_eq!(event.message.content, "edited");
}

#[test]
fn dm_event_rejects_lowercase_kind() {
    let result = serde_json::from_str::<DmEvent>(
        "{\"type\":\"send\",\"message\":{\"messageId\":\"9\",\"nickName\":\"a\",\"content\":\"\"}}",
    );
    assert!(result.is_err());
}

#[test]
fn history_envelope_unwraps_rows() {
    let history: DmHistory = serde_json::from_value(serde_json::json!({
        "response": [
            {"messageId": "1", "nickName": "ada", "content": "first"},
            {"messageId": "2", "nickName": "bob", "content": "second"}
        ]
    }))
    .expect("deserialize");
    let messages = history.into_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message_id, "1");
    assert_eq!(messages[1].nick_name, "bob");
}

#[test]
fn history_envelope_defaults_missing_response_to_empty() {
    let history: DmHistory = serde_json::from_value(serde_json::json!({})).expect("deserialize");
    assert!(history.into_messages().is_empty());

    let history: DmHistory =
        serde_json::from_value(serde_json::json!({ "response": null })).expect("deserialize");
    assert!(history.into_messages().is_empty());
}

#[test]
fn content_body_serializes_bare_content_field() {
    let json = serde_json::to_string(&ContentBody::new("hi there")).expect("serialize");
    assert_eq!(json, "{\"content\":\"hi there\"}");
}
