//! Local and remote video tiles for a voice call.

use leptos::prelude::*;

use crate::state::call::CallState;

/// Side-by-side video tiles. The local tile is muted so the user never
/// hears their own microphone; the client task attaches streams through
/// the two node refs.
#[component]
pub fn VideoPanel(
    local_video: NodeRef<leptos::html::Video>,
    remote_video: NodeRef<leptos::html::Video>,
) -> impl IntoView {
    let call = expect_context::<RwSignal<CallState>>();

    let local_label = move || {
        if call.get().mic_on {
            "You"
        } else {
            "You (muted)"
        }
    };

    let local_video_class = move || {
        if call.get().camera_on {
            "video-panel__video"
        } else {
            "video-panel__video video-panel__video--camera-off"
        }
    };

    view! {
        <div class="video-panel">
            <div class="video-panel__tile">
                <video
                    class=local_video_class
                    node_ref=local_video
                    autoplay=true
                    muted=true
                    playsinline=true
                ></video>
                <span class="video-panel__label">{local_label}</span>
            </div>
            <div class="video-panel__tile">
                <video
                    class="video-panel__video"
                    node_ref=remote_video
                    autoplay=true
                    playsinline=true
                ></video>
                <span class="video-panel__label">"Participant"</span>
            </div>
        </div>
    }
}
