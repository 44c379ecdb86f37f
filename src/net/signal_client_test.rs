use super::*;

fn parsed(json: &str) -> SignalMessage {
    serde_json::from_str(json).unwrap()
}

// ==== plan_inbound ====

#[test]
fn offer_is_answered() {
    let message = parsed(
        r#"{"type":"offer","channelId":"7","from":"11","offer":{"type":"offer","sdp":"v=0 caller"}}"#,
    );

    let SignalAction::AnswerOffer(offer) = plan_inbound(&message) else {
        panic!("expected AnswerOffer");
    };
    assert_eq!(offer.kind, "offer");
    assert_eq!(offer.sdp, "v=0 caller");
}

#[test]
fn answer_is_applied() {
    let message = parsed(
        r#"{"type":"answer","channelId":"7","from":"12","answer":{"type":"answer","sdp":"v=0 callee"}}"#,
    );

    let SignalAction::ApplyAnswer(answer) = plan_inbound(&message) else {
        panic!("expected ApplyAnswer");
    };
    assert_eq!(answer.kind, "answer");
    assert_eq!(answer.sdp, "v=0 callee");
}

#[test]
fn candidate_is_added() {
    let message = parsed(
        r#"{"type":"candidate","channelId":"7","candidate":{"candidate":"candidate:1 1 udp 2 10.0.0.2 50000 typ host","sdpMid":"0","sdpMLineIndex":0}}"#,
    );

    let SignalAction::AddCandidate(candidate) = plan_inbound(&message) else {
        panic!("expected AddCandidate");
    };
    assert_eq!(
        candidate.candidate,
        "candidate:1 1 udp 2 10.0.0.2 50000 typ host"
    );
    assert_eq!(candidate.sdp_mid.as_deref(), Some("0"));
    assert_eq!(candidate.sdp_m_line_index, Some(0));
}

#[test]
fn end_of_candidates_is_ignored() {
    let message = parsed(r#"{"type":"candidate","channelId":"7","candidate":null}"#);

    assert_eq!(plan_inbound(&message), SignalAction::Ignore);
}

#[test]
fn join_ack_is_ignored_but_carries_the_user_id() {
    let message = parsed(r#"{"type":"join","channelId":"7","userId":"42"}"#);

    assert_eq!(plan_inbound(&message), SignalAction::Ignore);
    assert_eq!(message.user_id.as_deref(), Some("42"));
}

#[test]
fn unknown_kinds_are_ignored() {
    let message = parsed(r#"{"type":"peer-left","channelId":"7","userId":"9"}"#);

    assert_eq!(plan_inbound(&message), SignalAction::Ignore);
}
