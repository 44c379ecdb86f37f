//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, socket clients,
//! cleanup) and delegates rendering details to `components`.

pub mod call;
pub mod dm;
pub mod login;
