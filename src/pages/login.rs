//! Login page capturing the bearer token, server, and destination room.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthState, DEFAULT_SERVER_BASE};
use crate::state::call::CallState;

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

/// Entry page. The token is held in memory for the session only; closing
/// or reloading the tab drops it.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let call = expect_context::<RwSignal<CallState>>();

    let token = RwSignal::new(String::new());
    let server = RwSignal::new(DEFAULT_SERVER_BASE.to_owned());
    let dm_id = RwSignal::new(String::new());
    let channel_id = RwSignal::new(String::new());
    let channel_label = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let capture_auth = move || {
        let Some(token_value) = non_empty(&token.get()) else {
            info.set("Enter a token first.".to_owned());
            return false;
        };
        auth.update(|a| {
            a.token = Some(token_value);
            a.server_base = normalized_server(&server.get());
        });
        true
    };

    let navigate_dm = use_navigate();
    let on_open_dm = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = cleaned_room_id(&dm_id.get()) else {
            info.set("Enter a numeric DM id.".to_owned());
            return;
        };
        if !capture_auth() {
            return;
        }
        navigate_dm(&format!("/dm/{id}"), NavigateOptions::default());
    };

    let navigate_call = use_navigate();
    let on_join_call = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = cleaned_room_id(&channel_id.get()) else {
            info.set("Enter a numeric channel id.".to_owned());
            return;
        };
        if !capture_auth() {
            return;
        }
        call.update(|c| c.channel_label = non_empty(&channel_label.get()));
        navigate_call(&format!("/call/{id}"), NavigateOptions::default());
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Holler"</h1>
                <p class="login-card__subtitle">"Bearer token"</p>
                <input
                    class="login-input"
                    type="password"
                    placeholder="JWT token"
                    prop:value=move || token.get()
                    on:input=move |ev| token.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="text"
                    placeholder=DEFAULT_SERVER_BASE
                    prop:value=move || server.get()
                    on:input=move |ev| server.set(event_target_value(&ev))
                />
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Direct messages"</p>
                <form class="login-form" on:submit=on_open_dm>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="DM id"
                        prop:value=move || dm_id.get()
                        on:input=move |ev| dm_id.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "Open DM"
                    </button>
                </form>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Voice"</p>
                <form class="login-form" on:submit=on_join_call>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Channel id"
                        prop:value=move || channel_id.get()
                        on:input=move |ev| channel_id.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Channel label (optional)"
                        prop:value=move || channel_label.get()
                        on:input=move |ev| channel_label.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "Join voice"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}

/// Trimmed input, or `None` when nothing is left.
fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Room ids are snowflake-style decimal strings; reject anything else
/// before it lands in a URL path.
fn cleaned_room_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.to_owned())
}

/// Server origin to use, falling back to the default when blank.
fn normalized_server(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_SERVER_BASE.to_owned()
    } else {
        trimmed.to_owned()
    }
}
