//! Input row for publishing new messages to the open DM.

use leptos::prelude::*;

use crate::app::ChatSender;
use crate::state::chat::{ChatState, ConnectionStatus};

/// Composer with a text input and send button.
///
/// Published content is trimmed; the sent message itself arrives back
/// through the topic broadcast rather than being appended locally.
#[component]
pub fn MessageComposer() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let sender = expect_context::<RwSignal<ChatSender>>();

    let input = RwSignal::new(String::new());

    let connected = move || chat.get().connection_status == ConnectionStatus::Connected;

    let do_send = move || {
        let text = input.get().trim().to_owned();
        if text.is_empty() || !connected() {
            return;
        }

        if sender.get().publish(&text) {
            input.set(String::new());
        }
    };

    let on_click = move |_| do_send();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || connected() && !input.get().trim().is_empty();

    view! {
        <div class="composer">
            <input
                class="composer__input"
                type="text"
                placeholder="Type a message..."
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <button class="btn btn--primary composer__send" on:click=on_click disabled=move || !can_send()>
                "Send"
            </button>
        </div>
    }
}
