use std::sync::Arc;

use crate::models::config::DisplayRequest;
use crate::models::error::RecorderError;

/// Kind of media carried by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Video,
    Audio,
}

/// One constituent track of a live stream.
///
/// Stopping a track releases the underlying device (and its "in use"
/// indicator). `stop` is idempotent on the platform side but the session
/// calls it exactly once.
pub trait MediaTrack: Send + Sync {
    fn kind(&self) -> TrackKind;

    fn stop(&self);

    fn is_live(&self) -> bool;
}

/// A live audio/video stream produced by a capture source.
pub trait MediaStream: Send + Sync {
    /// Identifier used to describe the preview binding.
    fn id(&self) -> String;

    /// All tracks making up the stream.
    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>>;
}

/// Shared reference to a live stream. Owned by the session while recording;
/// handed to the preview sink for display.
pub type StreamHandle = Arc<dyn MediaStream>;

/// Interface for the platform display-capture primitive.
///
/// Implemented by host environments (portal/PipeWire, ScreenCaptureKit,
/// browser `getDisplayMedia`, ...). Failures are `PermissionDenied` when the
/// user refused and `DeviceNotAvailable` when nothing can be captured.
pub trait CaptureSource: Send {
    fn acquire_display_stream(
        &mut self,
        request: &DisplayRequest,
    ) -> Result<StreamHandle, RecorderError>;
}

/// Stop every still-live track of `stream`, returning how many were stopped.
///
/// Tracks the platform already ended (e.g. the user hit "stop sharing") are
/// left alone.
pub fn stop_all_tracks(stream: &StreamHandle) -> usize {
    let mut stopped = 0;
    for track in stream.tracks() {
        if !track.is_live() {
            log::debug!("{:?} track of stream {} already ended", track.kind(), stream.id());
            continue;
        }
        track.stop();
        stopped += 1;
    }
    stopped
}
