use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::models::artifact::{Artifact, ArtifactMetadata, ARTIFACT_MIME_TYPE};
use crate::models::diagnostics::SessionDiagnostics;
use crate::models::error::RecorderError;
use crate::models::fragment::Fragment;
use crate::models::state::PreviewBinding;
use crate::processing::fragment_buffer::FragmentBuffer;
use crate::traits::artifact_store::ArtifactStore;
use crate::traits::capture_source::MediaStream;
use crate::traits::encoder::{EncoderEvent, EncoderEventCallback};
use crate::traits::preview_sink::PreviewSink;
use crate::traits::session_delegate::SessionDelegate;

/// State shared between the session and the encoder callbacks of every
/// session it has started.
pub(crate) struct SharedState {
    /// Bumped on every successful start; events tagged with an older value
    /// belong to a superseded session.
    pub generation: u64,
    pub artifact: Option<Artifact>,
    pub preview: PreviewBinding,
    pub diagnostics: SessionDiagnostics,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            generation: 0,
            artifact: None,
            preview: PreviewBinding::None,
            diagnostics: SessionDiagnostics::default(),
        }
    }
}

/// Where the encoder is in its lifecycle, as observed through its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncoderPhase {
    /// Created and started, `Started` not seen yet.
    Pending,
    Running,
    Paused,
    /// The session asked the encoder to stop; pending data is still welcome.
    Flushing,
    Stopped,
}

struct EncoderProgress {
    phase: EncoderPhase,
    capture_start: Option<Instant>,
    paused_duration: Duration,
    last_pause_time: Option<Instant>,
}

impl EncoderProgress {
    fn active_duration(&self) -> f64 {
        let Some(start) = self.capture_start else {
            return 0.0;
        };
        let mut paused = self.paused_duration;
        if let Some(pause_start) = self.last_pause_time {
            paused += pause_start.elapsed();
        }
        start.elapsed().saturating_sub(paused).as_secs_f64()
    }
}

/// Routes the events of one encoder instance.
///
/// Owns that session's fragment buffer. Holds only a weak reference to the
/// live stream: the session is its sole owner.
pub(crate) struct EncoderContext {
    generation: u64,
    stream: Weak<dyn MediaStream>,
    fragments: Arc<Mutex<FragmentBuffer>>,
    progress: Mutex<EncoderProgress>,
    shared: Arc<Mutex<SharedState>>,
    preview: Arc<dyn PreviewSink>,
    store: Arc<dyn ArtifactStore>,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl EncoderContext {
    pub fn new(
        generation: u64,
        stream: Weak<dyn MediaStream>,
        fragments: Arc<Mutex<FragmentBuffer>>,
        shared: Arc<Mutex<SharedState>>,
        preview: Arc<dyn PreviewSink>,
        store: Arc<dyn ArtifactStore>,
        delegate: Option<Arc<dyn SessionDelegate>>,
    ) -> Self {
        Self {
            generation,
            stream,
            fragments,
            progress: Mutex::new(EncoderProgress {
                phase: EncoderPhase::Pending,
                capture_start: None,
                paused_duration: Duration::ZERO,
                last_pause_time: None,
            }),
            shared,
            preview,
            store,
            delegate,
        }
    }

    /// Wrap the context in the callback handed to the encoder.
    pub fn into_callback(self: Arc<Self>) -> EncoderEventCallback {
        Arc::new(move |event: EncoderEvent| self.handle(event))
    }

    /// Called by the session right before it stops the encoder.
    pub fn begin_flush(&self) {
        let mut p = self.progress.lock();
        if p.phase != EncoderPhase::Stopped {
            p.phase = EncoderPhase::Flushing;
        }
    }

    pub fn handle(&self, event: EncoderEvent) {
        match event {
            EncoderEvent::Started => self.on_start(),
            EncoderEvent::Paused => self.on_pause(),
            EncoderEvent::Resumed => self.on_resume(),
            EncoderEvent::DataAvailable(fragment) => self.on_data(fragment),
            EncoderEvent::Stopped => self.on_stop(),
            EncoderEvent::Error(message) => self.on_error(message),
        }
    }

    fn is_current(&self) -> bool {
        self.shared.lock().generation == self.generation
    }

    fn on_start(&self) {
        {
            let mut p = self.progress.lock();
            if p.phase != EncoderPhase::Pending {
                log::debug!("encoder start ignored in phase {:?}", p.phase);
                return;
            }
            p.phase = EncoderPhase::Running;
            p.capture_start = Some(Instant::now());
        }

        if !self.is_current() {
            log::debug!("start event from superseded session {}", self.generation);
            return;
        }
        // Stopped before capture was confirmed live: nothing to preview.
        let Some(stream) = self.stream.upgrade() else {
            return;
        };

        let stream_id = stream.id();
        self.preview.bind_stream(stream);
        self.preview.play();
        self.shared.lock().preview = PreviewBinding::Live { stream_id };
    }

    fn on_pause(&self) {
        {
            let mut p = self.progress.lock();
            if p.phase != EncoderPhase::Running {
                return;
            }
            p.phase = EncoderPhase::Paused;
            p.last_pause_time = Some(Instant::now());
        }
        if self.is_current() {
            self.preview.pause();
        }
    }

    fn on_resume(&self) {
        {
            let mut p = self.progress.lock();
            if p.phase != EncoderPhase::Paused {
                return;
            }
            p.phase = EncoderPhase::Running;
            if let Some(pause_start) = p.last_pause_time.take() {
                p.paused_duration += pause_start.elapsed();
            }
        }
        if self.is_current() && self.shared.lock().preview.is_live() {
            self.preview.play();
        }
    }

    fn on_data(&self, fragment: Fragment) {
        let phase = self.progress.lock().phase;
        let size = fragment.len();
        // Fragments flushed around a pause still hold recorded content.
        let accepted = if phase == EncoderPhase::Stopped {
            if size > 0 {
                log::warn!("dropping {} byte fragment delivered after stop", size);
            }
            false
        } else {
            self.fragments.lock().push(fragment)
        };

        let mut shared = self.shared.lock();
        shared.diagnostics.fragments_received += 1;
        if accepted {
            shared.diagnostics.bytes_buffered += size as u64;
        } else {
            shared.diagnostics.fragments_dropped += 1;
        }
    }

    fn on_stop(&self) {
        let duration = {
            let mut p = self.progress.lock();
            if p.phase == EncoderPhase::Stopped {
                log::warn!("duplicate stop event for session {}", self.generation);
                return;
            }
            p.phase = EncoderPhase::Stopped;
            p.active_duration()
        };

        let (bytes, fragment_count) = {
            let mut buffer = self.fragments.lock();
            let count = buffer.len();
            match buffer.assemble() {
                Some(bytes) => (bytes, count),
                None => return,
            }
        };

        if !self.is_current() {
            self.finalize_superseded(bytes, fragment_count, duration);
            return;
        }

        let url = match self.store.create_handle(&bytes, ARTIFACT_MIME_TYPE) {
            Ok(url) => url,
            Err(e) => {
                log::error!("failed to create artifact handle: {}", e);
                self.preview.unbind();
                self.shared.lock().preview = PreviewBinding::None;
                self.report(e);
                return;
            }
        };

        let metadata = ArtifactMetadata::new(&bytes, fragment_count, duration);
        let artifact = Artifact {
            bytes: Arc::from(bytes),
            url: url.clone(),
            metadata,
        };

        self.preview.unbind();
        self.preview.bind_artifact(&url);
        self.preview.play();

        {
            let mut shared = self.shared.lock();
            shared.artifact = Some(artifact.clone());
            shared.preview = PreviewBinding::Artifact { url };
        }

        log::info!(
            "recording finalized: {} bytes from {} fragments ({:.1}s)",
            artifact.size(),
            fragment_count,
            duration
        );

        if let Some(ref delegate) = self.delegate {
            delegate.on_artifact_ready(&artifact);
        }
    }

    /// Publish the recording of a session a newer start already replaced.
    ///
    /// The handle goes to the delegate only; the preview and the current
    /// artifact slot belong to the newer session.
    fn finalize_superseded(&self, bytes: Vec<u8>, fragment_count: usize, duration: f64) {
        let url = match self.store.create_handle(&bytes, ARTIFACT_MIME_TYPE) {
            Ok(url) => url,
            Err(e) => {
                log::error!(
                    "failed to create artifact handle for superseded session {}: {}",
                    self.generation,
                    e
                );
                self.report(e);
                return;
            }
        };

        let metadata = ArtifactMetadata::new(&bytes, fragment_count, duration);
        let artifact = Artifact {
            bytes: Arc::from(bytes),
            url,
            metadata,
        };

        log::info!(
            "recording from superseded session {} finalized: {} bytes",
            self.generation,
            artifact.size()
        );

        if let Some(ref delegate) = self.delegate {
            delegate.on_artifact_ready(&artifact);
        }
    }

    fn on_error(&self, message: String) {
        log::error!("encoder error: {}", message);
        self.shared.lock().diagnostics.encoder_errors += 1;
        self.report(RecorderError::EncodingFailed(message));
    }

    fn report(&self, error: RecorderError) {
        self.shared.lock().diagnostics.last_error = Some(error.clone());
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&error);
        }
    }
}
