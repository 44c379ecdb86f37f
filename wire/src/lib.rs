//! Wire-protocol types and codecs for the chat and voice backend.
//!
//! This crate owns the shapes the client exchanges with the server: the STOMP
//! text framing used on the messaging socket, the DM payloads carried inside
//! it and over REST, and the JSON signaling envelope used on the voice socket.
//! It is UI-framework agnostic so every codec path is testable natively.

pub mod chat;
pub mod signal;
pub mod stomp;

pub use chat::{ChatMessage, ContentBody, DmEvent, DmEventKind, DmHistory};
pub use signal::{IceCandidateInit, SessionDescription, SignalMessage, SignalPayload};
pub use stomp::{Command, Frame, HeartBeat, StompError};
