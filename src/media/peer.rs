//! Peer connection construction and SDP/ICE negotiation primitives.

#[cfg(feature = "hydrate")]
use crate::state::call::CallState;
#[cfg(feature = "hydrate")]
use leptos::prelude::{Get, GetUntracked};
#[cfg(feature = "hydrate")]
use wasm_bindgen::closure::Closure;
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(feature = "hydrate")]
use wasm_bindgen_futures::JsFuture;
#[cfg(feature = "hydrate")]
use web_sys::{
    MediaStream, RtcConfiguration, RtcIceCandidateInit, RtcIceServer, RtcPeerConnection,
    RtcPeerConnectionIceEvent, RtcSdpType, RtcSessionDescriptionInit, RtcTrackEvent,
};
#[cfg(feature = "hydrate")]
use wire::{IceCandidateInit, SessionDescription, SignalMessage};

/// Public STUN endpoint used to gather server-reflexive candidates.
#[cfg(feature = "hydrate")]
const STUN_SERVER: &str = "stun:stun.l.google.com:19302";

/// Build a peer connection configured with the public STUN server.
///
/// # Errors
///
/// Returns an error string when the browser refuses the configuration.
#[cfg(feature = "hydrate")]
pub fn create_peer_connection() -> Result<RtcPeerConnection, String> {
    let ice_server = RtcIceServer::new();
    let urls = js_sys::Array::new();
    urls.push(&JsValue::from_str(STUN_SERVER));
    ice_server.set_urls(&urls);

    let ice_servers = js_sys::Array::new();
    ice_servers.push(&ice_server);

    let config = RtcConfiguration::new();
    config.set_ice_servers(&ice_servers);

    RtcPeerConnection::new_with_configuration(&config)
        .map_err(|e| format!("peer connection rejected: {e:?}"))
}

/// Relay local ICE candidates onto the signaling channel as they gather.
///
/// The closure is leaked via `forget`; it must stay alive as long as the
/// peer connection does.
#[cfg(feature = "hydrate")]
pub fn hook_ice_candidates(
    pc: &RtcPeerConnection,
    channel_id: String,
    call: leptos::prelude::RwSignal<CallState>,
    sig_tx: futures::channel::mpsc::UnboundedSender<SignalMessage>,
) {
    let callback = Closure::wrap(Box::new(move |ev: RtcPeerConnectionIceEvent| {
        // A null candidate is the end-of-gathering marker.
        let Some(candidate) = ev.candidate() else {
            return;
        };

        let init = IceCandidateInit {
            candidate: candidate.candidate(),
            sdp_mid: candidate.sdp_mid(),
            sdp_m_line_index: candidate.sdp_m_line_index(),
        };
        let from = call.get_untracked().user_id;
        let message = SignalMessage::candidate(&channel_id, from.as_deref(), init);
        if sig_tx.unbounded_send(message).is_err() {
            leptos::logging::warn!("dropping ICE candidate; signal channel closed");
        }
    }) as Box<dyn FnMut(RtcPeerConnectionIceEvent)>);

    pc.set_onicecandidate(Some(callback.as_ref().unchecked_ref()));
    callback.forget();
}

/// Attach the first remote stream to the remote video element once
/// tracks start arriving.
#[cfg(feature = "hydrate")]
pub fn hook_remote_track(
    pc: &RtcPeerConnection,
    remote_video: leptos::prelude::NodeRef<leptos::html::Video>,
) {
    let callback = Closure::wrap(Box::new(move |ev: RtcTrackEvent| {
        let Ok(stream) = ev.streams().get(0).dyn_into::<MediaStream>() else {
            return;
        };
        if let Some(video) = remote_video.get() {
            video.set_src_object(Some(&stream));
        }
    }) as Box<dyn FnMut(RtcTrackEvent)>);

    pc.set_ontrack(Some(callback.as_ref().unchecked_ref()));
    callback.forget();
}

/// Create an offer, install it locally, and return it for signaling.
///
/// # Errors
///
/// Returns an error string when offer creation or installation fails.
#[cfg(feature = "hydrate")]
pub async fn create_offer(pc: &RtcPeerConnection) -> Result<SessionDescription, String> {
    let offer = JsFuture::from(pc.create_offer())
        .await
        .map_err(|e| format!("createOffer failed: {e:?}"))?;
    let sdp = sdp_of(&offer)?;

    let init = RtcSessionDescriptionInit::new(RtcSdpType::Offer);
    init.set_sdp(&sdp);
    JsFuture::from(pc.set_local_description(&init))
        .await
        .map_err(|e| format!("setLocalDescription failed: {e:?}"))?;

    Ok(SessionDescription {
        kind: "offer".to_owned(),
        sdp,
    })
}

/// Create an answer for the installed remote offer and install it locally.
///
/// # Errors
///
/// Returns an error string when answer creation or installation fails.
#[cfg(feature = "hydrate")]
pub async fn create_answer(pc: &RtcPeerConnection) -> Result<SessionDescription, String> {
    let answer = JsFuture::from(pc.create_answer())
        .await
        .map_err(|e| format!("createAnswer failed: {e:?}"))?;
    let sdp = sdp_of(&answer)?;

    let init = RtcSessionDescriptionInit::new(RtcSdpType::Answer);
    init.set_sdp(&sdp);
    JsFuture::from(pc.set_local_description(&init))
        .await
        .map_err(|e| format!("setLocalDescription failed: {e:?}"))?;

    Ok(SessionDescription {
        kind: "answer".to_owned(),
        sdp,
    })
}

/// Install a remote offer or answer on the peer connection.
///
/// # Errors
///
/// Returns an error string for unknown description types or when the
/// browser rejects the description.
#[cfg(feature = "hydrate")]
pub async fn apply_remote_description(
    pc: &RtcPeerConnection,
    desc: &SessionDescription,
) -> Result<(), String> {
    let kind = match desc.kind.as_str() {
        "offer" => RtcSdpType::Offer,
        "answer" => RtcSdpType::Answer,
        other => return Err(format!("unsupported description type: {other}")),
    };

    let init = RtcSessionDescriptionInit::new(kind);
    init.set_sdp(&desc.sdp);
    JsFuture::from(pc.set_remote_description(&init))
        .await
        .map_err(|e| format!("setRemoteDescription failed: {e:?}"))?;
    Ok(())
}

/// Feed one relayed ICE candidate to the peer connection.
///
/// # Errors
///
/// Returns an error string when the browser rejects the candidate.
#[cfg(feature = "hydrate")]
pub async fn add_remote_candidate(
    pc: &RtcPeerConnection,
    candidate: &IceCandidateInit,
) -> Result<(), String> {
    let init = RtcIceCandidateInit::new(&candidate.candidate);
    init.set_sdp_mid(candidate.sdp_mid.as_deref());
    init.set_sdp_m_line_index(candidate.sdp_m_line_index);

    JsFuture::from(pc.add_ice_candidate_with_opt_rtc_ice_candidate_init(Some(&init)))
        .await
        .map_err(|e| format!("addIceCandidate failed: {e:?}"))?;
    Ok(())
}

/// Pull the `sdp` string out of a session-description JS object.
#[cfg(feature = "hydrate")]
fn sdp_of(desc: &JsValue) -> Result<String, String> {
    js_sys::Reflect::get(desc, &JsValue::from_str("sdp"))
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| "description missing sdp".to_owned())
}
