use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Media type of every finished recording.
pub const ARTIFACT_MIME_TYPE: &str = "video/webm";

/// The finished recording: assembled bytes plus a dereferenceable handle.
///
/// Immutable once built. Cloning shares the underlying bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub bytes: Arc<[u8]>,
    pub url: String,
    pub metadata: ArtifactMetadata,
}

impl Artifact {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Descriptive data about a finished recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub id: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub fragment_count: usize,
    pub checksum: String,
    pub duration_secs: f64,
    pub created_at: String,
}

impl ArtifactMetadata {
    /// Creates metadata for freshly assembled recording bytes.
    pub fn new(bytes: &[u8], fragment_count: usize, duration_secs: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mime_type: ARTIFACT_MIME_TYPE.to_string(),
            size_bytes: bytes.len() as u64,
            fragment_count,
            checksum: sha256_hex(bytes),
            duration_secs,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
