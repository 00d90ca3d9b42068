use crate::models::error::RecorderError;

/// Turns finished recording bytes into a dereferenceable URL handle.
pub trait ArtifactStore: Send + Sync {
    /// Register `bytes` and return a handle a preview surface can load.
    fn create_handle(&self, bytes: &[u8], mime_type: &str) -> Result<String, RecorderError>;

    /// Release the resource backing `url`. Unknown handles are ignored.
    fn revoke_handle(&self, url: &str);
}
