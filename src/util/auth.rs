//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The DM and call pages both require a captured token; they share one
//! redirect guard so unauthenticated visits land on the login form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// True when the visitor holds no token and belongs on the login page.
pub fn should_redirect_unauth(auth: &AuthState) -> bool {
    !auth.is_authenticated()
}

/// Redirect to `/` whenever no token is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/", NavigateOptions::default());
        }
    });
}
