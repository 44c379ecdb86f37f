//! Networking modules for HTTP and the two websocket surfaces.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST message management, `stomp_client` manages the
//! STOMP-over-websocket room subscription, `signal_client` manages the
//! voice-channel signaling socket, and `endpoints` builds the URLs they
//! all share.

pub mod api;
pub mod endpoints;
pub mod signal_client;
pub mod stomp_client;
