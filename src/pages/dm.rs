//! Direct-message page: history, live topic subscription, message actions.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::ChatSender;
use crate::components::edit_dialog::EditMessageDialog;
use crate::components::message_composer::MessageComposer;
use crate::components::message_list::MessageList;
use crate::state::auth::AuthState;
use crate::state::chat::{ChatState, ConnectionStatus};
use crate::util::auth::install_unauth_redirect;

#[cfg(test)]
#[path = "dm_test.rs"]
mod dm_test;

/// DM page. Reads the room id from the route, fetches history over REST,
/// and keeps a STOMP client running for the page's lifetime.
#[component]
pub fn DmPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let sender = expect_context::<RwSignal<ChatSender>>();
    let params = use_params_map();

    let dm_id = move || params.read().get("id");

    let last_history_key = RwSignal::new(None::<(String, String)>);
    let last_client_key = RwSignal::new(None::<(String, String)>);
    let notice = RwSignal::new(String::new());

    let edit_target = RwSignal::new(None::<String>);
    let edit_value = RwSignal::new(String::new());

    install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    // Reset room state when the route param changes.
    Effect::new(move || {
        let _ = dm_id();
        chat.set(ChatState::default());
        notice.set(String::new());
        last_history_key.set(None);
        last_client_key.set(None);
    });

    // Fetch history once per (room, token).
    Effect::new(move || {
        let Some(id) = dm_id() else {
            return;
        };
        let auth_state = auth.get();
        let Some(token) = auth_state.token.clone() else {
            return;
        };
        let key = (id.clone(), token.clone());
        if last_history_key.get().as_ref() == Some(&key) {
            return;
        }
        last_history_key.set(Some(key));

        #[cfg(feature = "hydrate")]
        {
            let base = auth_state.server_base.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::fetch_history(&base, &token, &id).await {
                    Ok(messages) => {
                        chat.update(|c| c.apply_history(messages));
                        notice.set(String::new());
                    }
                    Err(e) => {
                        notice.set(format!("Could not load history: {e}"));
                        leptos::logging::warn!("history fetch failed: {e}");
                    }
                }
            });
        }
    });

    // Run one STOMP client per (room, token), replacing any previous one.
    Effect::new(move || {
        let Some(id) = dm_id() else {
            return;
        };
        let auth_state = auth.get();
        let Some(token) = auth_state.token.clone() else {
            return;
        };
        let key = (id.clone(), token.clone());
        if last_client_key.get().as_ref() == Some(&key) {
            return;
        }

        sender.get().shutdown();

        #[cfg(feature = "hydrate")]
        {
            let ws_url = crate::net::endpoints::chat_socket_url(&auth_state.server_base, &token);
            let host = crate::net::endpoints::host_of(&auth_state.server_base);
            let tx = crate::net::stomp_client::spawn_stomp_client(ws_url, host, id, chat);
            sender.set(ChatSender::new(tx));
        }
        last_client_key.set(Some(key));
    });

    on_cleanup(move || {
        sender.get().shutdown();
        sender.set(ChatSender::default());
        chat.set(ChatState::default());
    });

    let close_edit = move || {
        edit_target.set(None);
        edit_value.set(String::new());
    };

    let save_edit = move || {
        if edit_value.get().trim().is_empty() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let Some(message_id) = edit_target.get() else {
                return;
            };
            let Some(id) = dm_id() else {
                return;
            };
            let auth_state = auth.get();
            let Some(token) = auth_state.token.clone() else {
                return;
            };
            let content = edit_value.get();
            leptos::task::spawn_local(async move {
                match crate::net::api::patch_message(
                    &auth_state.server_base,
                    &token,
                    &id,
                    &message_id,
                    &content,
                )
                .await
                {
                    Ok(()) => {
                        chat.update(|c| c.patch_message_content(&message_id, &content));
                        notice.set(String::new());
                        edit_target.set(None);
                        edit_value.set(String::new());
                    }
                    Err(e) => {
                        notice.set(e.clone());
                        leptos::logging::warn!("message edit failed: {e}");
                    }
                }
            });
        }
    };

    let on_edit = Callback::new(move |(message_id, content): (String, String)| {
        edit_target.set(Some(message_id));
        edit_value.set(content);
    });

    let on_delete = Callback::new(move |message_id: String| {
        #[cfg(feature = "hydrate")]
        {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this message?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let Some(id) = dm_id() else {
                return;
            };
            let auth_state = auth.get();
            let Some(token) = auth_state.token.clone() else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::net::api::delete_message(
                    &auth_state.server_base,
                    &token,
                    &id,
                    &message_id,
                )
                .await
                {
                    Ok(()) => {
                        chat.update(|c| c.remove_message(&message_id));
                        notice.set(String::new());
                    }
                    Err(e) => {
                        notice.set(e.clone());
                        leptos::logging::warn!("message delete failed: {e}");
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = message_id;
        }
    });

    let on_edit_cancel = Callback::new(move |()| close_edit());
    let on_edit_save = Callback::new(move |()| save_edit());
    let on_edit_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close_edit();
        }
    });

    view! {
        <div class="dm-page">
            <header class="dm-page__header">
                <h1 class="dm-page__title">{move || format!("DM {}", dm_id().unwrap_or_default())}</h1>
                <span class=move || connection_status_class(chat.get().connection_status)>
                    {move || status_line(chat.get().connection_status)}
                </span>
            </header>
            <Show when=move || !notice.get().is_empty()>
                <p class="dm-page__notice">{move || notice.get()}</p>
            </Show>
            <MessageList on_edit=on_edit on_delete=on_delete/>
            <MessageComposer/>
            <Show when=move || edit_target.get().is_some()>
                <EditMessageDialog
                    value=edit_value
                    on_cancel=on_edit_cancel
                    on_save=on_edit_save
                    on_keydown=on_edit_keydown
                />
            </Show>
        </div>
    }
}

fn status_line(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "Live",
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Disconnected => "Offline",
    }
}

fn connection_status_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "dm-page__status dm-page__status--connected",
        ConnectionStatus::Connecting => "dm-page__status dm-page__status--connecting",
        ConnectionStatus::Disconnected => "dm-page__status dm-page__status--disconnected",
    }
}
