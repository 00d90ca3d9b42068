use crate::models::artifact::Artifact;
use crate::models::error::RecorderError;
use crate::models::state::RecordingStatus;

/// Event delegate for recording session notifications.
///
/// Status changes are reported from the caller's thread; artifact and error
/// notifications come from the encoder's event queue.
pub trait SessionDelegate: Send + Sync {
    /// Called after a transition was applied.
    fn on_status_changed(&self, status: RecordingStatus);

    /// Called once the finished recording is available.
    fn on_artifact_ready(&self, artifact: &Artifact);

    /// Called when acquisition, encoding or artifact creation fails.
    fn on_error(&self, error: &RecorderError);
}
