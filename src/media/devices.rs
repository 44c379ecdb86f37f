//! Capture-device access and track control.

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(feature = "hydrate")]
use wasm_bindgen_futures::JsFuture;
#[cfg(feature = "hydrate")]
use web_sys::{
    HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack, RtcPeerConnection,
};

/// Request the user's microphone and camera as one stream.
///
/// # Errors
///
/// Returns an error string when the browser environment is missing or the
/// user denies the permission prompt.
#[cfg(feature = "hydrate")]
pub async fn capture_user_media() -> Result<MediaStream, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| format!("media devices unavailable: {e:?}"))?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::TRUE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| format!("getUserMedia rejected: {e:?}"))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| format!("media capture denied: {e:?}"))?;

    stream
        .dyn_into::<MediaStream>()
        .map_err(|_| "getUserMedia returned a non-stream".to_owned())
}

/// Add every track of the local stream to the peer connection.
#[cfg(feature = "hydrate")]
pub fn add_stream_tracks(pc: &RtcPeerConnection, stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        let Ok(track) = track.dyn_into::<MediaStreamTrack>() else {
            continue;
        };
        pc.add_track(&track, stream, &js_sys::Array::new());
    }
}

/// Point a video element at a stream.
#[cfg(feature = "hydrate")]
pub fn attach_stream(video: &HtmlVideoElement, stream: &MediaStream) {
    video.set_src_object(Some(stream));
}

/// Enable or mute every audio track on the stream.
#[cfg(feature = "hydrate")]
pub fn set_audio_enabled(stream: &MediaStream, on: bool) {
    set_tracks_enabled(&stream.get_audio_tracks(), on);
}

/// Enable or hide every video track on the stream.
#[cfg(feature = "hydrate")]
pub fn set_video_enabled(stream: &MediaStream, on: bool) {
    set_tracks_enabled(&stream.get_video_tracks(), on);
}

/// Stop every captured track so the device indicators turn off.
#[cfg(feature = "hydrate")]
pub fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

#[cfg(feature = "hydrate")]
fn set_tracks_enabled(tracks: &js_sys::Array, on: bool) {
    for track in tracks.iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.set_enabled(on);
        }
    }
}
