//! # screen-recorder-core
//!
//! Platform-agnostic screen recording core library.
//!
//! Drives a display capture through its lifecycle
//! (idle → recording ⇄ paused → idle), buffers the encoder's output and
//! assembles the finished recording. Host environments supply the capture
//! primitive, the encoder and the preview surface by implementing
//! `CaptureSource`, `EncoderFactory` and `PreviewSink`, then hand them to the
//! generic `RecordingSession`.
//!
//! ## Architecture
//!
//! ```text
//! screen-recorder-core (this crate)
//! ├── traits/       ← CaptureSource, Encoder, PreviewSink, ArtifactStore, SessionDelegate, ScreenRecorder
//! ├── models/       ← RecorderError, RecordingStatus, SessionConfiguration, Fragment, Artifact, etc.
//! ├── processing/   ← FragmentBuffer
//! ├── session/      ← RecordingSession (state machine + encoder event routing)
//! └── storage/      ← MemoryArtifactStore
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::artifact::{Artifact, ArtifactMetadata, ARTIFACT_MIME_TYPE};
pub use models::config::{DisplayRequest, SessionConfiguration};
pub use models::diagnostics::{SessionDiagnostics, SessionSnapshot};
pub use models::error::RecorderError;
pub use models::fragment::Fragment;
pub use models::state::{PreviewBinding, RecordingStatus, Transition};
pub use processing::fragment_buffer::FragmentBuffer;
pub use session::recording::RecordingSession;
pub use storage::memory_store::MemoryArtifactStore;
pub use traits::artifact_store::ArtifactStore;
pub use traits::capture_source::{stop_all_tracks, CaptureSource, MediaStream, MediaTrack, StreamHandle, TrackKind};
pub use traits::encoder::{Encoder, EncoderEvent, EncoderEventCallback, EncoderFactory};
pub use traits::preview_sink::PreviewSink;
pub use traits::recorder::ScreenRecorder;
pub use traits::session_delegate::SessionDelegate;
