use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to ask the capture device for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRequest {
    /// Capture the display's video (must be true).
    pub video: bool,

    /// Also capture system/tab audio when the device offers it.
    pub audio: bool,
}

impl Default for DisplayRequest {
    fn default() -> Self {
        Self {
            video: true,
            audio: false,
        }
    }
}

/// Configuration for a recording session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfiguration {
    /// Request passed to the capture source on every start.
    pub request: DisplayRequest,

    /// How often the encoder should emit a fragment (None = encoder default,
    /// usually a single fragment when stopped).
    pub timeslice: Option<Duration>,

    /// Release the previous artifact's handle when a new session starts
    /// (default: true).
    pub revoke_superseded_artifacts: bool,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if !self.request.video {
            return Err("display request must include video".into());
        }
        if let Some(timeslice) = self.timeslice {
            if timeslice.is_zero() {
                return Err("timeslice must be positive".into());
            }
        }
        Ok(())
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            request: DisplayRequest::default(),
            timeslice: None,
            revoke_superseded_artifacts: true,
        }
    }
}
