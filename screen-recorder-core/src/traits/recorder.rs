use crate::models::error::RecorderError;
use crate::models::state::{RecordingStatus, Transition};

/// Caller-facing recording controller interface.
pub trait ScreenRecorder {
    /// Current status.
    fn status(&self) -> RecordingStatus;

    /// Start recording. Transitions: idle → recording.
    fn start(&mut self) -> Result<Transition, RecorderError>;

    /// Pause recording. Transitions: recording → paused.
    fn pause(&mut self) -> Result<Transition, RecorderError>;

    /// Resume recording. Transitions: paused → recording.
    fn resume(&mut self) -> Result<Transition, RecorderError>;

    /// Stop recording and release the capture device.
    /// Transitions: recording/paused → idle.
    fn stop(&mut self) -> Result<Transition, RecorderError>;
}
