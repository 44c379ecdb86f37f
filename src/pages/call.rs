//! Voice channel page: signaling client, call controls, video tiles.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::CallSender;
use crate::components::call_controls::CallControls;
use crate::components::video_panel::VideoPanel;
use crate::state::auth::AuthState;
use crate::state::call::CallState;
use crate::state::chat::ConnectionStatus;
use crate::util::auth::install_unauth_redirect;

#[cfg(test)]
#[path = "call_test.rs"]
mod call_test;

/// Call page. Joins the signaling channel for the routed id on mount and
/// tears the whole session down when the page is left.
#[component]
pub fn CallPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let call = expect_context::<RwSignal<CallState>>();
    let sender = expect_context::<RwSignal<CallSender>>();
    let params = use_params_map();

    let channel_id = move || params.read().get("id");

    let last_client_key = RwSignal::new(None::<(String, String)>);

    let local_video = NodeRef::<leptos::html::Video>::new();
    let remote_video = NodeRef::<leptos::html::Video>::new();

    install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    // Join the channel once per (channel, token). There is no reconnect;
    // a changed token or channel replaces the session outright.
    Effect::new(move || {
        let Some(id) = channel_id() else {
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

        sender.get().leave();

        #[cfg(feature = "hydrate")]
        {
            let ws_url = crate::net::endpoints::voice_socket_url(&auth_state.server_base, &token);
            let tx = crate::net::signal_client::spawn_signal_client(
                ws_url,
                id,
                call,
                local_video,
                remote_video,
            );
            sender.set(CallSender::new(tx));
        }
        last_client_key.set(Some(key));
    });

    on_cleanup(move || {
        sender.get().leave();
        sender.set(CallSender::default());
        call.set(CallState::default());
    });

    view! {
        <div class="call-page">
            <header class="call-page__header">
                <h1 class="call-page__title">
                    {move || {
                        let id = channel_id();
                        let label = call.get().channel_label;
                        channel_heading(id.as_deref(), label.as_deref())
                    }}
                </h1>
                <span class=move || socket_status_class(call.get().socket_status)>
                    {move || socket_status_line(call.get().socket_status)}
                </span>
            </header>
            <VideoPanel local_video=local_video remote_video=remote_video/>
            <CallControls/>
            <Show when=move || call.get().connected>
                <div class="call-page__readout">
                    <div>{move || format!("Mic: {}", on_off(call.get().mic_on))}</div>
                    <div>{move || format!("Camera: {}", on_off(call.get().camera_on))}</div>
                </div>
            </Show>
        </div>
    }
}

/// Heading for the channel: the login-chosen label wins over the raw id.
fn channel_heading(channel_id: Option<&str>, label: Option<&str>) -> String {
    match (label, channel_id) {
        (Some(label), _) => format!("Channel: {label}"),
        (None, Some(id)) => format!("Channel {id}"),
        (None, None) => "Channel".to_owned(),
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

fn socket_status_line(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "Signaling connected",
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Disconnected => "Signaling closed",
    }
}

fn socket_status_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "call-page__status call-page__status--connected",
        ConnectionStatus::Connecting => "call-page__status call-page__status--connecting",
        ConnectionStatus::Disconnected => "call-page__status call-page__status--disconnected",
    }
}
