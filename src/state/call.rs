#[cfg(test)]
#[path = "call_test.rs"]
mod call_test;

use crate::state::chat::ConnectionStatus;

/// Offer/answer bookkeeping for the single peer connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NegotiationState {
    /// No offer outstanding in either direction.
    #[default]
    Stable,
    /// We sent an offer and are waiting for the remote answer.
    HaveLocalOffer,
    /// A remote offer arrived and we owe the caller an answer.
    HaveRemoteOffer,
}

/// State for the voice channel page.
///
/// `connected` means the local user is in the call from the UI's point of
/// view. It flips as soon as the user starts or answers a call, before
/// negotiation settles, so the controls switch over immediately.
#[derive(Clone, Debug)]
pub struct CallState {
    pub channel_id: Option<String>,
    /// Display name for the channel, chosen at login. Optional.
    pub channel_label: Option<String>,
    pub user_id: Option<String>,
    pub socket_status: ConnectionStatus,
    pub connected: bool,
    pub negotiation: NegotiationState,
    pub mic_on: bool,
    pub camera_on: bool,
}

impl Default for CallState {
    fn default() -> Self {
        Self {
            channel_id: None,
            channel_label: None,
            user_id: None,
            socket_status: ConnectionStatus::Disconnected,
            connected: false,
            negotiation: NegotiationState::Stable,
            mic_on: true,
            camera_on: true,
        }
    }
}

impl CallState {
    /// Mark the local user as entering the call.
    pub fn begin_call(&mut self) {
        self.connected = true;
    }

    /// Reset after leaving. Media toggles return to their defaults so the
    /// next call starts with mic and camera live.
    pub fn end_call(&mut self) {
        self.connected = false;
        self.negotiation = NegotiationState::Stable;
        self.mic_on = true;
        self.camera_on = true;
    }

    /// Record the user id learned from signaling. The first id wins;
    /// later messages echo it back and must not overwrite it.
    pub fn note_user_id(&mut self, user_id: &str) {
        if self.user_id.is_none() {
            self.user_id = Some(user_id.to_owned());
        }
    }
}
