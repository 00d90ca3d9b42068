use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::artifact::{Artifact, ARTIFACT_MIME_TYPE};
use crate::models::config::SessionConfiguration;
use crate::models::diagnostics::{SessionDiagnostics, SessionSnapshot};
use crate::models::error::RecorderError;
use crate::models::state::{PreviewBinding, RecordingStatus, Transition};
use crate::processing::fragment_buffer::FragmentBuffer;
use crate::session::encoder_events::{EncoderContext, SharedState};
use crate::traits::artifact_store::ArtifactStore;
use crate::traits::capture_source::{stop_all_tracks, CaptureSource, StreamHandle};
use crate::traits::encoder::{Encoder, EncoderFactory};
use crate::traits::preview_sink::PreviewSink;
use crate::traits::recorder::ScreenRecorder;
use crate::traits::session_delegate::SessionDelegate;

/// Screen recording session controller.
///
/// Single owner of the status, the live stream, the encoder and the current
/// fragment buffer. The transition methods are the only mutators; encoder
/// events arrive later through the callback registered on start and only
/// touch the buffer, the artifact slot and the preview.
///
/// ```text
/// [CaptureSource] → stream ─┬→ [Encoder] → events → [FragmentBuffer] → Artifact
///                           └→ [PreviewSink] (live, then artifact)
/// ```
///
/// A request whose precondition does not hold returns
/// `Ok(Transition::Ignored)` and changes nothing.
pub struct RecordingSession<C: CaptureSource, F: EncoderFactory> {
    capture: C,
    encoders: F,
    preview: Arc<dyn PreviewSink>,
    store: Arc<dyn ArtifactStore>,
    delegate: Option<Arc<dyn SessionDelegate>>,
    config: SessionConfiguration,

    status: RecordingStatus,
    stream: Option<StreamHandle>,
    encoder: Option<Box<dyn Encoder>>,
    context: Option<Arc<EncoderContext>>,
    fragments: Arc<Mutex<FragmentBuffer>>,

    // Shared with encoder callbacks
    shared: Arc<Mutex<SharedState>>,
}

impl<C: CaptureSource, F: EncoderFactory> RecordingSession<C, F> {
    pub fn new(
        capture: C,
        encoders: F,
        preview: Arc<dyn PreviewSink>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            capture,
            encoders,
            preview,
            store,
            delegate: None,
            config: SessionConfiguration::default(),
            status: RecordingStatus::Idle,
            stream: None,
            encoder: None,
            context: None,
            fragments: Arc::new(Mutex::new(FragmentBuffer::new())),
            shared: Arc::new(Mutex::new(SharedState::new())),
        }
    }

    /// Takes effect from the next start.
    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Apply configuration. Only allowed while idle.
    pub fn configure(&mut self, config: SessionConfiguration) -> Result<(), RecorderError> {
        if !self.status.is_idle() {
            return Err(RecorderError::ConfigurationFailed(
                "can only configure from idle state".into(),
            ));
        }
        config.validate().map_err(RecorderError::ConfigurationFailed)?;
        self.config = config;
        Ok(())
    }

    pub fn configuration(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn status(&self) -> RecordingStatus {
        self.status
    }

    /// The live stream, for hosts that bind their own surface to it.
    pub fn preview_stream(&self) -> Option<StreamHandle> {
        self.stream.clone()
    }

    pub fn has_capture_handle(&self) -> bool {
        self.stream.is_some()
    }

    pub fn has_encoder_handle(&self) -> bool {
        self.encoder.is_some()
    }

    /// What the preview sink currently displays.
    pub fn preview_binding(&self) -> PreviewBinding {
        self.shared.lock().preview.clone()
    }

    /// The finished recording; `None` until the encoder's stop event ran.
    pub fn artifact(&self) -> Option<Artifact> {
        self.shared.lock().artifact.clone()
    }

    pub fn artifact_bytes(&self) -> Option<Arc<[u8]>> {
        self.shared
            .lock()
            .artifact
            .as_ref()
            .map(|a| Arc::clone(&a.bytes))
    }

    /// URL handle of the finished recording, empty until available.
    pub fn artifact_url(&self) -> String {
        self.shared
            .lock()
            .artifact
            .as_ref()
            .map(|a| a.url.clone())
            .unwrap_or_default()
    }

    /// Fragments held for the current session (0 once assembled).
    pub fn buffered_fragments(&self) -> usize {
        self.fragments.lock().len()
    }

    pub fn buffered_bytes(&self) -> usize {
        self.fragments.lock().total_bytes()
    }

    pub fn diagnostics(&self) -> SessionDiagnostics {
        self.shared.lock().diagnostics.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (buffered_fragments, buffered_bytes) = {
            let buffer = self.fragments.lock();
            (buffer.len(), buffer.total_bytes())
        };
        let shared = self.shared.lock();
        SessionSnapshot {
            status: self.status,
            preview: shared.preview.clone(),
            buffered_fragments,
            buffered_bytes,
            artifact_url: shared
                .artifact
                .as_ref()
                .map(|a| a.url.clone())
                .unwrap_or_default(),
            artifact_size: shared.artifact.as_ref().map(Artifact::size),
        }
    }

    /// Start recording. Transitions: idle → recording.
    ///
    /// On acquisition or encoder failure the session stays idle, any acquired
    /// stream is released, and the error is returned and reported.
    pub fn start(&mut self) -> Result<Transition, RecorderError> {
        if !self.status.is_idle() {
            log::debug!("start ignored while {:?}", self.status);
            return Ok(Transition::Ignored);
        }

        let stream = match self.capture.acquire_display_stream(&self.config.request) {
            Ok(stream) => stream,
            Err(e) => {
                log::error!("failed to acquire display stream: {}", e);
                self.shared.lock().diagnostics.acquisition_failures += 1;
                self.report(e.clone());
                return Err(e);
            }
        };

        let (encoder, context, fragments) = match self.launch_encoder(&stream) {
            Ok(launched) => launched,
            Err(e) => {
                let released = stop_all_tracks(&stream);
                log::error!(
                    "failed to start encoder, released {} capture track(s): {}",
                    released,
                    e
                );
                self.report(e.clone());
                return Err(e);
            }
        };

        let superseded = {
            let mut shared = self.shared.lock();
            shared.diagnostics.sessions_started += 1;
            shared.artifact.take()
        };
        if let Some(old) = superseded {
            if self.config.revoke_superseded_artifacts {
                self.store.revoke_handle(&old.url);
            }
        }

        log::info!("recording started on stream {}", stream.id());

        self.stream = Some(stream);
        self.encoder = Some(encoder);
        self.context = Some(context);
        self.fragments = fragments;
        self.set_status(RecordingStatus::Recording);
        Ok(Transition::Applied)
    }

    /// Pause recording. Transitions: recording → paused.
    pub fn pause(&mut self) -> Result<Transition, RecorderError> {
        if !self.status.is_recording() {
            return Ok(Transition::Ignored);
        }
        let Some(encoder) = self.encoder.as_mut() else {
            return Ok(Transition::Ignored);
        };

        encoder.pause()?;
        self.set_status(RecordingStatus::Paused);
        Ok(Transition::Applied)
    }

    /// Resume recording. Transitions: paused → recording.
    pub fn resume(&mut self) -> Result<Transition, RecorderError> {
        if !self.status.is_paused() {
            return Ok(Transition::Ignored);
        }
        let Some(encoder) = self.encoder.as_mut() else {
            return Ok(Transition::Ignored);
        };

        encoder.resume()?;
        self.set_status(RecordingStatus::Recording);
        Ok(Transition::Applied)
    }

    /// Stop recording. Transitions: recording/paused → idle.
    ///
    /// Returns once the device is released and handles are cleared. The
    /// artifact appears later, when the encoder delivers its stop event.
    pub fn stop(&mut self) -> Result<Transition, RecorderError> {
        if self.status.is_idle() {
            return Ok(Transition::Ignored);
        }

        self.release();
        self.set_status(RecordingStatus::Idle);
        Ok(Transition::Applied)
    }

    // --- Internal helpers ---

    /// Build the encoder for `stream`, wire its events and begin encoding.
    fn launch_encoder(
        &mut self,
        stream: &StreamHandle,
    ) -> Result<(Box<dyn Encoder>, Arc<EncoderContext>, Arc<Mutex<FragmentBuffer>>), RecorderError>
    {
        let mut encoder = self
            .encoders
            .create(Arc::clone(stream), ARTIFACT_MIME_TYPE)?;

        let generation = {
            let mut shared = self.shared.lock();
            shared.generation += 1;
            shared.generation
        };

        let fragments = Arc::new(Mutex::new(FragmentBuffer::new()));
        let context = Arc::new(EncoderContext::new(
            generation,
            Arc::downgrade(stream),
            Arc::clone(&fragments),
            Arc::clone(&self.shared),
            Arc::clone(&self.preview),
            Arc::clone(&self.store),
            self.delegate.clone(),
        ));

        encoder.set_event_callback(Arc::clone(&context).into_callback());
        encoder.start(self.config.timeslice)?;
        Ok((encoder, context, fragments))
    }

    /// Stop the encoder and every capture track, dropping both handles.
    fn release(&mut self) {
        if let Some(context) = self.context.take() {
            context.begin_flush();
        }

        if let Some(mut encoder) = self.encoder.take() {
            if let Err(e) = encoder.stop() {
                log::warn!("encoder stop failed: {}", e);
                self.report(e);
            }
        }

        if let Some(stream) = self.stream.take() {
            let released = stop_all_tracks(&stream);
            log::info!("released {} capture track(s) of stream {}", released, stream.id());
        }
    }

    fn set_status(&mut self, status: RecordingStatus) {
        self.status = status;
        if let Some(ref delegate) = self.delegate {
            delegate.on_status_changed(status);
        }
    }

    fn report(&self, error: RecorderError) {
        self.shared.lock().diagnostics.last_error = Some(error.clone());
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&error);
        }
    }
}

impl<C: CaptureSource, F: EncoderFactory> ScreenRecorder for RecordingSession<C, F> {
    fn status(&self) -> RecordingStatus {
        self.status
    }

    fn start(&mut self) -> Result<Transition, RecorderError> {
        RecordingSession::start(self)
    }

    fn pause(&mut self) -> Result<Transition, RecorderError> {
        RecordingSession::pause(self)
    }

    fn resume(&mut self) -> Result<Transition, RecorderError> {
        RecordingSession::resume(self)
    }

    fn stop(&mut self) -> Result<Transition, RecorderError> {
        RecordingSession::stop(self)
    }
}

impl<C: CaptureSource, F: EncoderFactory> Drop for RecordingSession<C, F> {
    fn drop(&mut self) {
        if !self.status.is_idle() {
            log::warn!("recording session dropped while {:?}", self.status);
            self.release();
            self.status = RecordingStatus::Idle;
        }
    }
}
