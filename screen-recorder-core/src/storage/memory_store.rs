use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::error::RecorderError;
use crate::traits::artifact_store::ArtifactStore;

const URL_PREFIX: &str = "blob:screen-recorder/";

struct StoredBlob {
    mime_type: String,
    bytes: Arc<[u8]>,
}

/// In-process artifact store handing out `blob:` style URLs.
///
/// Each handle keeps its bytes alive until revoked.
#[derive(Default)]
pub struct MemoryArtifactStore {
    blobs: Mutex<HashMap<String, StoredBlob>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the bytes and media type behind a handle.
    pub fn resolve(&self, url: &str) -> Option<(Arc<[u8]>, String)> {
        self.blobs
            .lock()
            .get(url)
            .map(|blob| (Arc::clone(&blob.bytes), blob.mime_type.clone()))
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.blobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.lock().is_empty()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn create_handle(&self, bytes: &[u8], mime_type: &str) -> Result<String, RecorderError> {
        if mime_type.is_empty() {
            return Err(RecorderError::ArtifactFailed("missing media type".into()));
        }
        let url = format!("{}{}", URL_PREFIX, uuid::Uuid::new_v4());
        self.blobs.lock().insert(
            url.clone(),
            StoredBlob {
                mime_type: mime_type.to_string(),
                bytes: Arc::from(bytes),
            },
        );
        Ok(url)
    }

    fn revoke_handle(&self, url: &str) {
        if self.blobs.lock().remove(url).is_none() {
            log::debug!("revoke of unknown artifact handle {}", url);
        }
    }
}
