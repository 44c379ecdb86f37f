//! DM chat payloads exchanged over REST and the messaging topic.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A single direct message as the backend renders it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Snowflake-style message identifier, kept as a string so precision
    /// survives JSON. Some server paths emit it as a bare number.
    #[serde(deserialize_with = "deserialize_string_from_value")]
    pub message_id: String,
    /// Display name of the author.
    pub nick_name: String,
    /// Message text.
    pub content: String,
}

/// Broadcast event kinds on a DM topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DmEventKind {
    /// A new message was posted.
    Send,
    /// An existing message's content changed.
    Update,
    /// An existing message was removed.
    Delete,
}

/// A broadcast event delivered on `/topic/dm/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmEvent {
    /// What happened to the message.
    #[serde(rename = "type")]
    pub kind: DmEventKind,
    /// The message after the event; for deletes only `message_id` matters.
    pub message: ChatMessage,
}

/// Response envelope of the DM history endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct DmHistory {
    /// History rows, oldest first. Absent or null means an empty room.
    #[serde(default)]
    pub response: Option<Vec<ChatMessage>>,
}

impl DmHistory {
    /// Unwrap the envelope into its rows.
    #[must_use]
    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.response.unwrap_or_default()
    }
}

/// Request body for publishing and editing message content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBody {
    /// Message text.
    pub content: String,
}

impl ContentBody {
    /// Wrap `content` for the wire.
    #[must_use]
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_owned(),
        }
    }
}

fn deserialize_string_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected string or number")),
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
