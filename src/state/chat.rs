#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use wire::{ChatMessage, DmEvent, DmEventKind};

/// State for the direct-message room currently on screen.
///
/// `messages` is ordered oldest first, the way the history endpoint
/// returns it and the way the list renders it.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub connection_status: ConnectionStatus,
}

/// Messaging socket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ChatState {
    /// Replace the message list with freshly fetched room history.
    pub fn apply_history(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    /// Apply one broadcast event from the room topic.
    ///
    /// Application is idempotent: a SEND for a message id already on
    /// screen replaces that entry instead of duplicating it, an UPDATE
    /// or DELETE for an id the list no longer holds is a no-op. A REST
    /// edit racing its own UPDATE broadcast therefore settles on the
    /// same content no matter which lands first.
    pub fn apply_event(&mut self, event: &DmEvent) {
        match event.kind {
            DmEventKind::Send => {
                if let Some(existing) = self.find_mut(&event.message.message_id) {
                    *existing = event.message.clone();
                } else {
                    self.messages.push(event.message.clone());
                }
            }
            DmEventKind::Update => {
                if let Some(existing) = self.find_mut(&event.message.message_id) {
                    existing.content = event.message.content.clone();
                }
            }
            DmEventKind::Delete => {
                self.remove_message(&event.message.message_id);
            }
        }
    }

    /// Rewrite one message's content in place after a successful edit.
    pub fn patch_message_content(&mut self, message_id: &str, content: &str) {
        if let Some(existing) = self.find_mut(message_id) {
            existing.content = content.to_owned();
        }
    }

    /// Drop a message locally after a successful delete.
    pub fn remove_message(&mut self, message_id: &str) {
        self.messages.retain(|m| m.message_id != message_id);
    }

    fn find_mut(&mut self, message_id: &str) -> Option<&mut ChatMessage> {
        self.messages
            .iter_mut()
            .find(|m| m.message_id == message_id)
    }
}
