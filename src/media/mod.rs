//! Browser media primitives for voice calls.
//!
//! Thin wrappers over the `web-sys` WebRTC and capture APIs. Everything
//! here needs a browser environment and is gated behind the `hydrate`
//! feature; call orchestration lives in `net::signal_client`.

pub mod devices;
pub mod peer;
