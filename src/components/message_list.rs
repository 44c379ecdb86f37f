//! Scrolling list of direct messages with per-message actions.

use leptos::prelude::*;

use crate::state::chat::ChatState;

/// Message history for the open DM, pinned to the newest entry.
///
/// `on_edit` receives the message id and its current content; `on_delete`
/// receives the message id. Both fire for any row, mirroring a backend
/// that authorizes edits server-side.
#[component]
pub fn MessageList(
    on_edit: Callback<(String, String)>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();

    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = chat.get().messages.len();

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="message-list" node_ref=messages_ref>
            {move || {
                let messages = chat.get().messages;
                if messages.is_empty() {
                    return view! {
                        <div class="message-list__empty">"No messages yet"</div>
                    }
                        .into_any();
                }

                messages
                    .iter()
                    .map(|msg| {
                        let id = msg.message_id.clone();
                        let name = msg.nick_name.clone();
                        let content = msg.content.clone();
                        let edit_args = (id.clone(), content.clone());
                        let delete_id = id;
                        view! {
                            <div class="message-list__row">
                                <span class="message-list__author">{name}</span>
                                <span class="message-list__text">{content}</span>
                                <button
                                    class="btn btn--ghost message-list__action"
                                    on:click=move |_| on_edit.run(edit_args.clone())
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="btn btn--ghost message-list__action message-list__action--danger"
                                    on:click=move |_| on_delete.run(delete_id.clone())
                                >
                                    "Delete"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </div>
    }
}
