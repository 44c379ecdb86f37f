//! # holler
//!
//! Leptos + WASM front-end for the holler chat and voice backend.
//!
//! This crate contains pages, components, application state, the REST and
//! STOMP messaging clients for direct-message rooms, and the WebRTC
//! signaling client for voice channels. Wire-level frame and payload types
//! live in the `wire` crate so they can be tested natively.

pub mod app;
pub mod components;
pub mod media;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
