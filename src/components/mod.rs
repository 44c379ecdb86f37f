//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render chat and call chrome while reading/writing shared state
//! from Leptos context providers. Socket and media side effects stay in the
//! page-owned client tasks; components only send commands at them.

pub mod call_controls;
pub mod edit_dialog;
pub mod message_composer;
pub mod message_list;
pub mod video_panel;
