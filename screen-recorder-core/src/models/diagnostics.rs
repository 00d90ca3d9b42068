use serde::{Deserialize, Serialize};

use super::error::RecorderError;
use super::state::{PreviewBinding, RecordingStatus};

/// Counters for debugging recording sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionDiagnostics {
    pub sessions_started: u64,
    pub acquisition_failures: u64,
    pub fragments_received: u64,
    pub fragments_dropped: u64,
    pub bytes_buffered: u64,
    pub encoder_errors: u64,
    #[serde(skip)]
    pub last_error: Option<RecorderError>,
}

/// Serializable view of a session for UI layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: RecordingStatus,
    pub preview: PreviewBinding,
    pub buffered_fragments: usize,
    pub buffered_bytes: usize,
    pub artifact_url: String,
    pub artifact_size: Option<usize>,
}
