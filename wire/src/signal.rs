//! JSON signaling envelope for the voice WebSocket.
//!
//! Every message shares one flat envelope: a `type` discriminator plus
//! `channelId`/`from`/`userId` bookkeeping fields, with the SDP or ICE
//! payload keyed by the message kind. The enum carries the kind-specific
//! part; the envelope carries the rest.

use serde::{Deserialize, Serialize};

/// One message on the signaling socket, inbound or outbound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    /// Voice channel this message belongs to.
    #[serde(default)]
    pub channel_id: String,
    /// Sender's user id; absent until the client has learned its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Server-assigned user id, present on the join acknowledgement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Kind-specific payload.
    #[serde(flatten)]
    pub payload: SignalPayload,
}

/// The kind-specific part of a [`SignalMessage`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SignalPayload {
    /// Announce presence in a channel; sent once when the socket opens.
    Join,
    /// A caller's session description.
    Offer {
        /// The offered description.
        offer: SessionDescription,
    },
    /// A callee's session description.
    Answer {
        /// The answering description.
        answer: SessionDescription,
    },
    /// A trickled ICE candidate; `None` marks end-of-candidates.
    Candidate {
        /// The candidate, or null at the end of trickling.
        #[serde(default)]
        candidate: Option<IceCandidateInit>,
    },
    /// Any kind this client does not negotiate with. Parsed rather than
    /// rejected so the envelope's `userId` still comes through.
    #[serde(other)]
    Other,
}

impl SignalMessage {
    /// Presence announcement for `channel_id`.
    #[must_use]
    pub fn join(channel_id: &str) -> Self {
        Self::envelope(channel_id, None, SignalPayload::Join)
    }

    /// Offer message carrying the caller's description.
    #[must_use]
    pub fn offer(channel_id: &str, from: Option<&str>, offer: SessionDescription) -> Self {
        Self::envelope(channel_id, from, SignalPayload::Offer { offer })
    }

    /// Answer message carrying the callee's description.
    #[must_use]
    pub fn answer(channel_id: &str, from: Option<&str>, answer: SessionDescription) -> Self {
        Self::envelope(channel_id, from, SignalPayload::Answer { answer })
    }

    /// Candidate message trickling local ICE to the peer.
    #[must_use]
    pub fn candidate(channel_id: &str, from: Option<&str>, candidate: IceCandidateInit) -> Self {
        Self::envelope(
            channel_id,
            from,
            SignalPayload::Candidate {
                candidate: Some(candidate),
            },
        )
    }

    fn envelope(channel_id: &str, from: Option<&str>, payload: SignalPayload) -> Self {
        Self {
            channel_id: channel_id.to_owned(),
            from: from.map(ToOwned::to_owned),
            user_id: None,
            payload,
        }
    }
}

/// An SDP blob plus its role, as the browser serializes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    /// `"offer"` or `"answer"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The SDP text.
    pub sdp: String,
}

/// An ICE candidate in `RTCIceCandidateInit` dictionary form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateInit {
    /// The candidate attribute line.
    pub candidate: String,
    /// Media description identifier the candidate belongs to.
    #[serde(default)]
    pub sdp_mid: Option<String>,
    /// Media description index the candidate belongs to.
    #[serde(default)]
    pub sdp_m_line_index: Option<u16>,
}

#[cfg(test)]
#[path = "signal_test.rs"]
mod tests;
