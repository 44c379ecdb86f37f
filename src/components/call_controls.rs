//! Start/leave and device toggle buttons for a voice call.

use leptos::prelude::*;

use crate::app::CallSender;
use crate::state::call::CallState;

/// Call control row.
///
/// Mic and camera toggles own the `mic_on`/`camera_on` flags and mirror
/// each flip to the client task, which applies it to the live tracks.
#[component]
pub fn CallControls() -> impl IntoView {
    let call = expect_context::<RwSignal<CallState>>();
    let sender = expect_context::<RwSignal<CallSender>>();

    let connected = move || call.get().connected;

    let on_start = move |_| {
        sender.get().start();
    };

    let on_leave = move |_| {
        sender.get().leave();
    };

    let toggle_mic = move |_| {
        let next = !call.get().mic_on;
        call.update(|c| c.mic_on = next);
        sender.get().set_mic(next);
    };

    let toggle_camera = move |_| {
        let next = !call.get().camera_on;
        call.update(|c| c.camera_on = next);
        sender.get().set_camera(next);
    };

    let mic_label = move || {
        if call.get().mic_on {
            "Mute mic"
        } else {
            "Unmute mic"
        }
    };

    let camera_label = move || {
        if call.get().camera_on {
            "Stop camera"
        } else {
            "Start camera"
        }
    };

    let mic_class = move || {
        if call.get().mic_on {
            "btn call-controls__toggle"
        } else {
            "btn call-controls__toggle call-controls__toggle--off"
        }
    };

    let camera_class = move || {
        if call.get().camera_on {
            "btn call-controls__toggle"
        } else {
            "btn call-controls__toggle call-controls__toggle--off"
        }
    };

    view! {
        <div class="call-controls">
            <Show
                when=connected
                fallback=move || view! {
                    <button class="btn btn--primary" on:click=on_start>
                        "Start call"
                    </button>
                }
            >
                <button class="btn btn--danger" on:click=on_leave>
                    "Leave call"
                </button>
                <button class=mic_class on:click=toggle_mic>
                    {mic_label}
                </button>
                <button class=camera_class on:click=toggle_camera>
                    {camera_label}
                </button>
            </Show>
        </div>
    }
}
