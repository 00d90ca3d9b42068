use std::sync::Arc;
use std::time::Duration;

use crate::models::error::RecorderError;
use crate::models::fragment::Fragment;
use crate::traits::capture_source::StreamHandle;

/// Lifecycle notification raised by an encoder.
///
/// An encoder delivers every `DataAvailable` for a session before its single
/// `Stopped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderEvent {
    Started,
    Paused,
    Resumed,
    DataAvailable(Fragment),
    Stopped,
    Error(String),
}

/// Callback invoked for each encoder event.
///
/// Events are delivered later than the call that caused them, from the
/// host's event queue, never concurrently with each other.
pub type EncoderEventCallback = Arc<dyn Fn(EncoderEvent) + Send + Sync + 'static>;

/// Incremental encoder over a live stream.
pub trait Encoder: Send {
    /// Register the callback receiving lifecycle events. Replaces any
    /// previously registered callback.
    fn set_event_callback(&mut self, callback: EncoderEventCallback);

    /// Begin encoding, emitting a fragment every `timeslice` if given.
    fn start(&mut self, timeslice: Option<Duration>) -> Result<(), RecorderError>;

    fn pause(&mut self) -> Result<(), RecorderError>;

    fn resume(&mut self) -> Result<(), RecorderError>;

    /// Flush pending fragments, then raise `Stopped`.
    fn stop(&mut self) -> Result<(), RecorderError>;
}

/// Builds an encoder for a freshly acquired stream.
pub trait EncoderFactory: Send {
    fn create(
        &mut self,
        stream: StreamHandle,
        mime_type: &str,
    ) -> Result<Box<dyn Encoder>, RecorderError>;
}
