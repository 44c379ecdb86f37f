//! STOMP-over-WebSocket client for live room traffic.
//!
//! The client owns the messaging socket lifecycle: the CONNECT/CONNECTED
//! handshake, the room topic subscription, outgoing heart-beats, broadcast
//! dispatch into `ChatState`, and reconnection with a fixed delay. It is
//! the bridge between the broker and the Leptos UI state.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since
//! it requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! Parse/transport failures are translated into state updates and logging
//! so the room can recover through the reconnect loop.

#[cfg(test)]
#[path = "stomp_client_test.rs"]
mod stomp_client_test;

#[cfg(any(test, feature = "hydrate"))]
use crate::state::chat::ChatState;
#[cfg(feature = "hydrate")]
use crate::state::chat::ConnectionStatus;
#[cfg(feature = "hydrate")]
use leptos::prelude::Update;
#[cfg(any(test, feature = "hydrate"))]
use wire::DmEvent;
#[cfg(any(test, feature = "hydrate"))]
use wire::stomp::{self, Command, Frame};

/// Commands the DM page can issue to the running client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatCommand {
    /// Publish message content to the room's application destination.
    Publish(String),
    /// Send DISCONNECT and stop the client for good.
    Shutdown,
}

/// Fixed delay between reconnect attempts.
#[cfg(feature = "hydrate")]
const RECONNECT_DELAY_MS: u64 = 5000;

/// Heart-beat intervals offered in CONNECT: we can send every 4s and
/// expect broker traffic at least every 4s.
#[cfg(any(test, feature = "hydrate"))]
const HEART_BEAT_OFFER: (u64, u64) = (4000, 4000);

/// Compose the CONNECT frame opening a session against the given vhost.
#[cfg(any(test, feature = "hydrate"))]
fn connect_frame(host: &str) -> Frame {
    stomp::connect(host, HEART_BEAT_OFFER)
}

/// Compose the SUBSCRIBE frame for a room topic.
#[cfg(any(test, feature = "hydrate"))]
fn subscribe_frame(dm_id: &str) -> Frame {
    let id = format!("sub-{}", uuid::Uuid::new_v4());
    stomp::subscribe(&id, &crate::net::endpoints::topic_destination(dm_id))
}

/// Compose the SEND frame publishing one message to a room.
#[cfg(any(test, feature = "hydrate"))]
fn publish_frame(dm_id: &str, content: &str) -> Frame {
    let body = serde_json::json!({ "content": content }).to_string();
    stomp::send_json(&crate::net::endpoints::publish_destination(dm_id), &body)
}

/// Outgoing heart-beat interval settled by the broker's CONNECTED frame.
/// Zero means heart-beats are disabled for this session.
#[cfg(any(test, feature = "hydrate"))]
fn negotiated_send_interval(connected: &Frame) -> u64 {
    stomp::negotiate_heart_beat(HEART_BEAT_OFFER, connected.heart_beat()).send_every_ms
}

/// Broadcast event carried by a MESSAGE frame, if any.
#[cfg(any(test, feature = "hydrate"))]
fn event_from_frame(frame: &Frame) -> Option<DmEvent> {
    if frame.command != Command::Message {
        return None;
    }
    serde_json::from_str(&frame.body).ok()
}

/// Apply one wire payload to chat state. Returns `false` when the broker
/// reported a fatal ERROR frame and the session should end.
#[cfg(any(test, feature = "hydrate"))]
fn apply_payload(payload: &str, chat: &mut ChatState) -> bool {
    let frames = match stomp::parse_payload(payload) {
        Ok(frames) => frames,
        Err(e) => {
            leptos::logging::warn!("unparseable chat payload: {e}");
            return true;
        }
    };

    for frame in &frames {
        match frame.command {
            Command::Error => {
                leptos::logging::warn!(
                    "broker error: {}",
                    frame.header_value("message").unwrap_or(frame.body.as_str())
                );
                return false;
            }
            Command::Message => {
                if let Some(event) = event_from_frame(frame) {
                    chat.apply_event(&event);
                } else {
                    leptos::logging::warn!(
                        "undecodable broadcast on {}",
                        frame.header_value("destination").unwrap_or("?")
                    );
                }
            }
            _ => {}
        }
    }
    true
}

/// Spawn the STOMP client lifecycle for one room as a local async task.
///
/// Returns the command channel end held by the page. Sending
/// [`ChatCommand::Shutdown`] (or dropping every sender) ends the client
/// after a graceful DISCONNECT; until then it reconnects on its own.
#[cfg(feature = "hydrate")]
pub fn spawn_stomp_client(
    ws_url: String,
    host: String,
    dm_id: String,
    chat: leptos::prelude::RwSignal<ChatState>,
) -> futures::channel::mpsc::UnboundedSender<ChatCommand> {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<ChatCommand>();

    leptos::task::spawn_local(stomp_client_loop(ws_url, host, dm_id, chat, rx));

    tx
}

/// How one socket session ended, deciding whether the loop reconnects.
#[cfg(feature = "hydrate")]
enum SessionEnd {
    /// Transport closed or errored; reconnect after the fixed delay.
    Dropped,
    /// The page asked us to stop; do not reconnect.
    Shutdown,
}

/// Main connection loop with fixed-delay reconnect.
#[cfg(feature = "hydrate")]
async fn stomp_client_loop(
    ws_url: String,
    host: String,
    dm_id: String,
    chat: leptos::prelude::RwSignal<ChatState>,
    rx: futures::channel::mpsc::UnboundedReceiver<ChatCommand>,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    let rx = Rc::new(RefCell::new(rx));

    loop {
        // A shutdown queued while we were offline still has to stop the
        // loop before the next dial.
        if drain_offline_commands(&mut rx.borrow_mut()) {
            break;
        }

        chat.update(|c| c.connection_status = ConnectionStatus::Connecting);

        let ended = connect_and_run(&ws_url, &host, &dm_id, chat, &rx).await;

        chat.update(|c| c.connection_status = ConnectionStatus::Disconnected);

        match ended {
            Ok(SessionEnd::Shutdown) => break,
            Ok(SessionEnd::Dropped) => {
                leptos::logging::log!("chat socket closed; reconnecting");
            }
            Err(e) => {
                leptos::logging::warn!("chat socket error: {e}");
            }
        }

        gloo_timers::future::sleep(std::time::Duration::from_millis(RECONNECT_DELAY_MS)).await;
    }
}

/// Drain commands queued while no session is up. Returns `true` when a
/// shutdown was requested or the page dropped its sender. Publishes
/// queued while offline are dropped with a warning, not delivered late.
#[cfg(feature = "hydrate")]
fn drain_offline_commands(rx: &mut futures::channel::mpsc::UnboundedReceiver<ChatCommand>) -> bool {
    loop {
        match rx.try_next() {
            Ok(Some(ChatCommand::Shutdown)) | Ok(None) => return true,
            Ok(Some(ChatCommand::Publish(_))) => {
                leptos::logging::warn!("dropping message published while disconnected");
            }
            Err(_) => return false,
        }
    }
}

/// Dial, complete the STOMP handshake, subscribe to the room topic, then
/// pump page commands and broker broadcasts until the session ends.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    ws_url: &str,
    host: &str,
    dm_id: &str,
    chat: leptos::prelude::RwSignal<ChatState>,
    rx: &std::rc::Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<ChatCommand>>>,
) -> Result<SessionEnd, String> {
    use futures::{FutureExt, SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(ws_url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    ws_write
        .send(Message::Text(connect_frame(host).serialize()))
        .await
        .map_err(|e| e.to_string())?;

    let connected = wait_for_connected(&mut ws_read).await?;
    let send_interval_ms = negotiated_send_interval(&connected);

    ws_write
        .send(Message::Text(subscribe_frame(dm_id).serialize()))
        .await
        .map_err(|e| e.to_string())?;

    chat.update(|c| c.connection_status = ConnectionStatus::Connected);

    let shutdown = std::cell::Cell::new(false);
    let mut rx_borrow = rx.borrow_mut();

    // Forward page commands and due heart-beats onto the socket. The
    // heart-beat timer restarts after every send, so beats only go out
    // when the connection is otherwise idle.
    let send_task = async {
        loop {
            futures::select! {
                cmd = rx_borrow.next() => match cmd {
                    Some(ChatCommand::Publish(content)) => {
                        let frame = publish_frame(dm_id, &content);
                        if ws_write.send(Message::Text(frame.serialize())).await.is_err() {
                            break;
                        }
                    }
                    Some(ChatCommand::Shutdown) | None => {
                        shutdown.set(true);
                        let _ = ws_write
                            .send(Message::Text(stomp::disconnect().serialize()))
                            .await;
                        break;
                    }
                },
                _ = Box::pin(heart_beat_tick(send_interval_ms)).fuse() => {
                    if ws_write
                        .send(Message::Text(stomp::HEART_BEAT_PAYLOAD.to_owned()))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
            }
        }
    };

    // Apply broker broadcasts to chat state.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text,
                Ok(Message::Bytes(bytes)) => match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(_) => continue,
                },
                Err(e) => {
                    leptos::logging::warn!("chat socket recv error: {e}");
                    break;
                }
            };

            let mut keep_going = true;
            chat.update(|c| keep_going = apply_payload(&text, c));
            if !keep_going {
                break;
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    if shutdown.get() {
        return Ok(SessionEnd::Shutdown);
    }
    Ok(SessionEnd::Dropped)
}

/// Read until the broker's CONNECTED frame arrives. An ERROR frame or a
/// socket close during the handshake fails the attempt.
#[cfg(feature = "hydrate")]
async fn wait_for_connected(
    ws_read: &mut futures::stream::SplitStream<gloo_net::websocket::futures::WebSocket>,
) -> Result<Frame, String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;

    while let Some(msg) = ws_read.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Bytes(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => continue,
            },
            Err(e) => return Err(e.to_string()),
        };

        let frames = stomp::parse_payload(&text).map_err(|e| e.to_string())?;
        for frame in frames {
            match frame.command {
                Command::Connected => return Ok(frame),
                Command::Error => {
                    return Err(format!(
                        "broker rejected connection: {}",
                        frame.header_value("message").unwrap_or(frame.body.as_str())
                    ));
                }
                _ => {}
            }
        }
    }
    Err("socket closed during handshake".to_owned())
}

/// Sleeps until the next outgoing heart-beat is due. An interval of zero
/// means heart-beats are disabled and this never resolves.
#[cfg(feature = "hydrate")]
async fn heart_beat_tick(interval_ms: u64) {
    if interval_ms == 0 {
        futures::future::pending::<()>().await;
    } else {
        gloo_timers::future::sleep(std::time::Duration::from_millis(interval_ms)).await;
    }
}
