pub mod artifact_store;
pub mod capture_source;
pub mod encoder;
pub mod preview_sink;
pub mod recorder;
pub mod session_delegate;
