use thiserror::Error;

/// Errors that can occur while driving a recording session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available")]
    DeviceNotAvailable,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("artifact failed: {0}")]
    ArtifactFailed(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl RecorderError {
    /// Whether this error came from acquiring the capture device.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::DeviceNotAvailable)
    }
}
