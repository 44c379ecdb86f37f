//! URL builders for the REST, messaging, and signaling endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three surfaces talk to the same backend: REST message management, the
//! STOMP socket for room traffic, and the signaling socket for calls.
//! Centralizing URL construction keeps scheme mapping and token encoding
//! consistent across them.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

/// Trim whitespace and any trailing slash so path joins never produce `//`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim();
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_owned()
}

/// History endpoint for one room: `GET {base}/dm/{dm_id}`.
pub fn history_url(base: &str, dm_id: &str) -> String {
    format!("{}/dm/{dm_id}", normalize_base(base))
}

/// Single-message endpoint for `PATCH`/`DELETE` calls.
pub fn message_url(base: &str, dm_id: &str, message_id: &str) -> String {
    format!("{}/dm/{dm_id}/message/{message_id}", normalize_base(base))
}

/// STOMP websocket endpoint, bearer token carried as a query parameter.
pub fn chat_socket_url(base: &str, token: &str) -> String {
    format!(
        "{}/ws-chat/websocket?token={}",
        ws_base(base),
        encode_query(token)
    )
}

/// Signaling websocket endpoint for voice channels.
pub fn voice_socket_url(base: &str, token: &str) -> String {
    format!("{}/ws/voice?token={}", ws_base(base), encode_query(token))
}

/// Broker destination a room's broadcasts arrive on.
pub fn topic_destination(dm_id: &str) -> String {
    format!("/topic/dm/{dm_id}")
}

/// Application destination new messages are published to.
pub fn publish_destination(dm_id: &str) -> String {
    format!("/app/dm/{dm_id}")
}

/// Virtual-host name for the STOMP CONNECT frame, derived from the base URL.
pub fn host_of(base: &str) -> String {
    let base = normalize_base(base);
    let without_scheme = base
        .strip_prefix("https://")
        .or_else(|| base.strip_prefix("http://"))
        .or_else(|| base.strip_prefix("wss://"))
        .or_else(|| base.strip_prefix("ws://"))
        .unwrap_or(&base);
    let host_port = without_scheme.split('/').next().unwrap_or(without_scheme);
    let host = host_port.split(':').next().unwrap_or(host_port);
    if host.is_empty() {
        return "localhost".to_owned();
    }
    host.to_owned()
}

/// Map an HTTP base to its websocket counterpart (`http` to `ws`,
/// `https` to `wss`). Bases already carrying a socket scheme pass
/// through, and scheme-less hosts default to plain `ws`.
fn ws_base(base: &str) -> String {
    let base = normalize_base(base);
    if let Some(rest) = base.strip_prefix("https://") {
        return format!("wss://{rest}");
    }
    if let Some(rest) = base.strip_prefix("http://") {
        return format!("ws://{rest}");
    }
    if base.starts_with("ws://") || base.starts_with("wss://") {
        return base;
    }
    format!("ws://{base}")
}

/// Percent-encode a query value. Tokens are usually URL-safe already;
/// this covers the occasional `+`, `/`, or `=` in opaque tokens.
fn encode_query(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(byte));
            }
            _ => {
                out.push('%');
                out.push(char::from(HEX[usize::from(byte >> 4)]));
                out.push(char::from(HEX[usize::from(byte & 0x0f)]));
            }
        }
    }
    out
}
