use serde::{Deserialize, Serialize};

/// Recording session state machine.
///
/// State transitions:
/// ```text
///          start           pause
/// idle ──────────→ recording ──────→ paused
///   ↑                  │   ←──────    │
///   │       stop       │    resume    │ stop
///   └──────────────────┴──────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    #[default]
    Idle,
    Recording,
    Paused,
}

impl RecordingStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Recording or paused: the session owns a stream and an encoder.
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }
}

/// Outcome of a transition request.
///
/// Requests whose precondition does not hold are not errors; they report
/// `Ignored` and leave the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// What the preview sink is currently displaying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum PreviewBinding {
    #[default]
    None,
    Live { stream_id: String },
    Artifact { url: String },
}

impl PreviewBinding {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    pub fn is_artifact(&self) -> bool {
        matches!(self, Self::Artifact { .. })
    }
}
