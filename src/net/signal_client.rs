//! WebSocket signaling client for voice channels.
//!
//! One task per call page: it joins the channel on connect, relays SDP
//! offers/answers and ICE candidates between the browser's peer
//! connection and the server, and owns the media session (tracks, peer,
//! video elements). There is no reconnect; when the socket drops, the
//! call is over and the page shows it that way.
//!
//! All WebSocket and WebRTC logic is gated behind
//! `#[cfg(feature = "hydrate")]` since it requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! Signaling failures are logged and rolled back into call state instead
//! of panicking, so a rejected `getUserMedia` prompt or a stale answer
//! leaves the page usable.

#[cfg(test)]
#[path = "signal_client_test.rs"]
mod signal_client_test;

#[cfg(feature = "hydrate")]
use crate::media::{devices, peer};
#[cfg(feature = "hydrate")]
use crate::state::call::{CallState, NegotiationState};
#[cfg(feature = "hydrate")]
use crate::state::chat::ConnectionStatus;
#[cfg(feature = "hydrate")]
use leptos::prelude::{Get, GetUntracked, Update};
#[cfg(any(test, feature = "hydrate"))]
use wire::{IceCandidateInit, SessionDescription, SignalMessage, SignalPayload};

/// Commands the call page can issue to the running client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallCommand {
    /// Acquire media, build the peer connection, and send an offer.
    Start,
    /// Tear down media and the socket; the client stops afterwards.
    Leave,
    /// Enable or disable the local audio tracks.
    SetMic(bool),
    /// Enable or disable the local video tracks.
    SetCamera(bool),
}

/// What the client should do with one inbound signaling message.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SignalAction {
    /// A peer started a call; build the callee side and answer.
    AnswerOffer(SessionDescription),
    /// The callee answered our offer; apply it and settle.
    ApplyAnswer(SessionDescription),
    /// Feed a relayed ICE candidate to the peer connection.
    AddCandidate(IceCandidateInit),
    /// Nothing to do (join acks, null candidates, unknown types).
    Ignore,
}

/// Classify one inbound signaling message. User-id capture happens
/// separately; this only decides the negotiation step.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn plan_inbound(message: &SignalMessage) -> SignalAction {
    match &message.payload {
        SignalPayload::Offer { offer } => SignalAction::AnswerOffer(offer.clone()),
        SignalPayload::Answer { answer } => SignalAction::ApplyAnswer(answer.clone()),
        SignalPayload::Candidate {
            candidate: Some(candidate),
        } => SignalAction::AddCandidate(candidate.clone()),
        SignalPayload::Candidate { candidate: None }
        | SignalPayload::Join
        | SignalPayload::Other => SignalAction::Ignore,
    }
}

/// Spawn the signaling client for one voice channel as a local async task.
///
/// Returns the command channel end held by the page. [`CallCommand::Leave`]
/// (or dropping every sender) tears the session down for good.
#[cfg(feature = "hydrate")]
pub fn spawn_signal_client(
    ws_url: String,
    channel_id: String,
    call: leptos::prelude::RwSignal<CallState>,
    local_video: leptos::prelude::NodeRef<leptos::html::Video>,
    remote_video: leptos::prelude::NodeRef<leptos::html::Video>,
) -> futures::channel::mpsc::UnboundedSender<CallCommand> {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<CallCommand>();

    leptos::task::spawn_local(run_call(
        ws_url,
        channel_id,
        call,
        local_video,
        remote_video,
        rx,
    ));

    tx
}

/// Single-session driver: join, then pump page commands, outbound
/// signals, and inbound messages until the call ends.
#[cfg(feature = "hydrate")]
async fn run_call(
    ws_url: String,
    channel_id: String,
    call: leptos::prelude::RwSignal<CallState>,
    local_video: leptos::prelude::NodeRef<leptos::html::Video>,
    remote_video: leptos::prelude::NodeRef<leptos::html::Video>,
    mut cmd_rx: futures::channel::mpsc::UnboundedReceiver<CallCommand>,
) {
    use futures::channel::mpsc;
    use futures::{FutureExt, SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    call.update(|c| {
        c.channel_id = Some(channel_id.clone());
        c.socket_status = ConnectionStatus::Connecting;
    });

    let ws = match WebSocket::open(&ws_url) {
        Ok(ws) => ws,
        Err(e) => {
            leptos::logging::warn!("voice socket open failed: {e}");
            call.update(|c| c.socket_status = ConnectionStatus::Disconnected);
            return;
        }
    };
    let (mut ws_write, mut ws_read) = ws.split();

    // Announce presence so the server maps this socket to the channel.
    let join_text = match serde_json::to_string(&SignalMessage::join(&channel_id)) {
        Ok(text) => text,
        Err(e) => {
            leptos::logging::warn!("unserializable join: {e}");
            call.update(|c| c.socket_status = ConnectionStatus::Disconnected);
            return;
        }
    };
    if ws_write.send(Message::Text(join_text)).await.is_err() {
        leptos::logging::warn!("voice socket closed before join");
        call.update(|c| c.socket_status = ConnectionStatus::Disconnected);
        return;
    }

    call.update(|c| c.socket_status = ConnectionStatus::Connected);

    let (sig_tx, mut sig_rx) = mpsc::unbounded::<SignalMessage>();
    let mut session = CallSession {
        channel_id,
        call,
        sig_tx,
        local_video,
        remote_video,
        pc: None,
        local_stream: None,
    };

    loop {
        futures::select! {
            cmd = cmd_rx.next() => match cmd {
                Some(CallCommand::Start) => {
                    call.update(|c| c.begin_call());
                    match session.start_call().await {
                        Ok(()) => {
                            call.update(|c| c.negotiation = NegotiationState::HaveLocalOffer);
                        }
                        Err(e) => {
                            leptos::logging::warn!("starting call failed: {e}");
                            call.update(|c| c.end_call());
                        }
                    }
                }
                Some(CallCommand::SetMic(on)) => session.set_mic(on),
                Some(CallCommand::SetCamera(on)) => session.set_camera(on),
                Some(CallCommand::Leave) | None => break,
            },
            sig = sig_rx.next() => {
                let Some(sig) = sig else { break };
                let text = match serde_json::to_string(&sig) {
                    Ok(text) => text,
                    Err(e) => {
                        leptos::logging::warn!("unserializable signal: {e}");
                        continue;
                    }
                };
                if ws_write.send(Message::Text(text)).await.is_err() {
                    leptos::logging::warn!("voice socket closed while sending");
                    break;
                }
            },
            msg = ws_read.next().fuse() => match msg {
                Some(Ok(Message::Text(text))) => handle_inbound(&text, &mut session, call).await,
                Some(Ok(Message::Bytes(_))) => {}
                Some(Err(e)) => {
                    leptos::logging::warn!("voice socket recv error: {e}");
                    break;
                }
                None => {
                    leptos::logging::log!("voice socket closed");
                    break;
                }
            },
        }
    }

    session.teardown();
    call.update(|c| {
        c.socket_status = ConnectionStatus::Disconnected;
        c.end_call();
    });
}

/// Decode and act on one inbound signaling message.
#[cfg(feature = "hydrate")]
async fn handle_inbound(
    text: &str,
    session: &mut CallSession,
    call: leptos::prelude::RwSignal<CallState>,
) {
    let message: SignalMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            leptos::logging::warn!("undecodable signal: {e}");
            return;
        }
    };

    if let Some(id) = &message.user_id {
        call.update(|c| c.note_user_id(id));
    }

    match plan_inbound(&message) {
        SignalAction::AnswerOffer(offer) => {
            call.update(|c| {
                c.begin_call();
                c.negotiation = NegotiationState::HaveRemoteOffer;
            });
            match session.answer_offer(&offer).await {
                Ok(()) => call.update(|c| c.negotiation = NegotiationState::Stable),
                Err(e) => {
                    leptos::logging::warn!("answering offer failed: {e}");
                    call.update(|c| c.end_call());
                }
            }
        }
        SignalAction::ApplyAnswer(answer) => {
            if call.get_untracked().negotiation != NegotiationState::HaveLocalOffer {
                leptos::logging::warn!("dropping answer with no offer outstanding");
                return;
            }
            match session.apply_answer(&answer).await {
                Ok(()) => call.update(|c| c.negotiation = NegotiationState::Stable),
                Err(e) => leptos::logging::warn!("applying answer failed: {e}"),
            }
        }
        SignalAction::AddCandidate(candidate) => {
            if let Err(e) = session.add_candidate(&candidate).await {
                leptos::logging::warn!("adding candidate failed: {e}");
            }
        }
        SignalAction::Ignore => {}
    }
}

/// Media-side state for one call: the peer connection, the captured local
/// stream, and the channels signals leave through.
#[cfg(feature = "hydrate")]
struct CallSession {
    channel_id: String,
    call: leptos::prelude::RwSignal<CallState>,
    sig_tx: futures::channel::mpsc::UnboundedSender<SignalMessage>,
    local_video: leptos::prelude::NodeRef<leptos::html::Video>,
    remote_video: leptos::prelude::NodeRef<leptos::html::Video>,
    pc: Option<web_sys::RtcPeerConnection>,
    local_stream: Option<web_sys::MediaStream>,
}

#[cfg(feature = "hydrate")]
impl CallSession {
    /// Caller path: media, peer, then an offer onto the wire.
    async fn start_call(&mut self) -> Result<(), String> {
        self.ensure_peer().await?;
        let Some(pc) = &self.pc else {
            return Err("peer connection missing".to_owned());
        };

        let offer = peer::create_offer(pc).await?;
        let from = self.call.get_untracked().user_id;
        self.send_signal(SignalMessage::offer(&self.channel_id, from.as_deref(), offer));
        Ok(())
    }

    /// Callee path: media, peer, apply the remote offer, answer it.
    async fn answer_offer(&mut self, offer: &SessionDescription) -> Result<(), String> {
        self.ensure_peer().await?;
        let Some(pc) = &self.pc else {
            return Err("peer connection missing".to_owned());
        };

        peer::apply_remote_description(pc, offer).await?;
        let answer = peer::create_answer(pc).await?;
        let from = self.call.get_untracked().user_id;
        self.send_signal(SignalMessage::answer(&self.channel_id, from.as_deref(), answer));
        Ok(())
    }

    /// Caller completion: the callee's answer arrived.
    async fn apply_answer(&mut self, answer: &SessionDescription) -> Result<(), String> {
        let Some(pc) = &self.pc else {
            return Err("answer arrived before any offer was made".to_owned());
        };
        peer::apply_remote_description(pc, answer).await
    }

    async fn add_candidate(&mut self, candidate: &IceCandidateInit) -> Result<(), String> {
        let Some(pc) = &self.pc else {
            return Err("candidate arrived before the peer existed".to_owned());
        };
        peer::add_remote_candidate(pc, candidate).await
    }

    fn set_mic(&self, on: bool) {
        if let Some(stream) = &self.local_stream {
            devices::set_audio_enabled(stream, on);
        }
    }

    fn set_camera(&self, on: bool) {
        if let Some(stream) = &self.local_stream {
            devices::set_video_enabled(stream, on);
        }
    }

    /// Stop captured tracks, close the peer, and detach both videos.
    fn teardown(&mut self) {
        if let Some(stream) = self.local_stream.take() {
            devices::stop_tracks(&stream);
        }
        if let Some(pc) = self.pc.take() {
            pc.close();
        }
        if let Some(video) = self.local_video.get() {
            video.set_src_object(None);
        }
        if let Some(video) = self.remote_video.get() {
            video.set_src_object(None);
        }
    }

    /// Build the peer connection and local media on first use. Later
    /// calls are no-ops so caller and callee paths can share it.
    async fn ensure_peer(&mut self) -> Result<(), String> {
        if self.pc.is_some() {
            return Ok(());
        }

        let stream = devices::capture_user_media().await?;
        let pc = peer::create_peer_connection()?;

        devices::add_stream_tracks(&pc, &stream);
        peer::hook_ice_candidates(&pc, self.channel_id.clone(), self.call, self.sig_tx.clone());
        peer::hook_remote_track(&pc, self.remote_video);

        if let Some(video) = self.local_video.get() {
            devices::attach_stream(&video, &stream);
        }

        // The user may have flipped a toggle while the permission prompt
        // was still up; bring fresh tracks in line with the state.
        let state = self.call.get_untracked();
        devices::set_audio_enabled(&stream, state.mic_on);
        devices::set_video_enabled(&stream, state.camera_on);

        self.local_stream = Some(stream);
        self.pc = Some(pc);
        Ok(())
    }

    fn send_signal(&self, message: SignalMessage) {
        if self.sig_tx.unbounded_send(message).is_err() {
            leptos::logging::warn!("signal channel closed");
        }
    }
}
