//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::signal_client::CallCommand;
use crate::net::stomp_client::ChatCommand;
use crate::pages::{call::CallPage, dm::DmPage, login::LoginPage};
use crate::state::{auth::AuthState, call::CallState, chat::ChatState};

/// Cloneable handle for publishing onto the room's messaging socket.
///
/// The app provides an empty default at startup; the DM page installs a
/// live handle while its STOMP client is running and clears it on leave.
#[derive(Clone, Default)]
pub struct ChatSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<ChatCommand>>,
}

impl ChatSender {
    #[cfg(feature = "hydrate")]
    pub fn new(tx: futures::channel::mpsc::UnboundedSender<ChatCommand>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Queue message content for publication to the active room.
    ///
    /// Returns `false` when no client is running or the client has stopped.
    pub fn publish(&self, content: &str) -> bool {
        self.send(ChatCommand::Publish(content.to_owned()))
    }

    /// Ask the running client to send DISCONNECT and stop for good.
    pub fn shutdown(&self) {
        self.send(ChatCommand::Shutdown);
    }

    #[cfg(feature = "hydrate")]
    fn send(&self, cmd: ChatCommand) -> bool {
        match &self.tx {
            Some(tx) => tx.unbounded_send(cmd).is_ok(),
            None => false,
        }
    }

    #[cfg(not(feature = "hydrate"))]
    fn send(&self, _cmd: ChatCommand) -> bool {
        false
    }
}

/// Cloneable handle for driving the voice-channel signaling client.
///
/// Installed by the call page while its client task is alive.
#[derive(Clone, Default)]
pub struct CallSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<CallCommand>>,
}

impl CallSender {
    #[cfg(feature = "hydrate")]
    pub fn new(tx: futures::channel::mpsc::UnboundedSender<CallCommand>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn start(&self) -> bool {
        self.send(CallCommand::Start)
    }

    pub fn leave(&self) -> bool {
        self.send(CallCommand::Leave)
    }

    pub fn set_mic(&self, on: bool) -> bool {
        self.send(CallCommand::SetMic(on))
    }

    pub fn set_camera(&self, on: bool) -> bool {
        self.send(CallCommand::SetCamera(on))
    }

    #[cfg(feature = "hydrate")]
    fn send(&self, cmd: CallCommand) -> bool {
        match &self.tx {
            Some(tx) => tx.unbounded_send(cmd).is_ok(),
            None => false,
        }
    }

    #[cfg(not(feature = "hydrate"))]
    fn send(&self, _cmd: CallCommand) -> bool {
        false
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let auth = RwSignal::new(AuthState::default());
    let chat = RwSignal::new(ChatState::default());
    let call = RwSignal::new(CallState::default());
    let chat_sender = RwSignal::new(ChatSender::default());
    let call_sender = RwSignal::new(CallSender::default());

    provide_context(auth);
    provide_context(chat);
    provide_context(call);
    provide_context(chat_sender);
    provide_context(call_sender);

    view! {
        <Stylesheet id="leptos" href="/pkg/holler.css"/>
        <Title text="Holler"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=(StaticSegment("dm"), ParamSegment("id")) view=DmPage/>
                <Route path=(StaticSegment("call"), ParamSegment("id")) view=CallPage/>
            </Routes>
        </Router>
    }
}
