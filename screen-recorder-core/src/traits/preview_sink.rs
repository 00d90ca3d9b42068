use crate::traits::capture_source::StreamHandle;

/// Presentation surface that shows either a live stream or a finished
/// recording.
///
/// Called from the encoder's event queue; implementations should marshal to
/// the UI thread if needed.
pub trait PreviewSink: Send + Sync {
    /// Point the surface at a live stream.
    fn bind_stream(&self, stream: StreamHandle);

    /// Point the surface at a finished recording by its URL handle.
    fn bind_artifact(&self, url: &str);

    /// Detach whatever source is bound.
    fn unbind(&self);

    fn play(&self);

    fn pause(&self);
}
