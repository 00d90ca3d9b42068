//! Scripted stand-ins for the host capabilities.
//!
//! Encoder events are fired by hand through [`FakeEncoderHandle::emit`],
//! which models the host event queue delivering them after the call that
//! caused them.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::models::artifact::Artifact;
use crate::models::config::DisplayRequest;
use crate::models::error::RecorderError;
use crate::models::fragment::Fragment;
use crate::models::state::RecordingStatus;
use crate::storage::memory_store::MemoryArtifactStore;
use crate::traits::artifact_store::ArtifactStore;
use crate::traits::capture_source::{CaptureSource, MediaStream, MediaTrack, StreamHandle, TrackKind};
use crate::traits::encoder::{Encoder, EncoderEvent, EncoderEventCallback, EncoderFactory};
use crate::traits::preview_sink::PreviewSink;
use crate::traits::session_delegate::SessionDelegate;

use super::recording::RecordingSession;

// --- Capture ---

pub struct FakeTrack {
    kind: TrackKind,
    stop_calls: AtomicUsize,
    ended: AtomicBool,
}

impl FakeTrack {
    fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            stop_calls: AtomicUsize::new(0),
            ended: AtomicBool::new(false),
        }
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    /// The platform ended the track on its own.
    pub fn end(&self) {
        self.ended.store(true, Ordering::SeqCst);
    }

    pub fn kind_of(&self) -> TrackKind {
        self.kind
    }
}

impl MediaTrack for FakeTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        !self.ended.load(Ordering::SeqCst) && self.stop_calls() == 0
    }
}

pub struct FakeStream {
    id: String,
    tracks: Vec<Arc<FakeTrack>>,
}

impl FakeStream {
    pub fn fake_tracks(&self) -> &[Arc<FakeTrack>] {
        &self.tracks
    }

    /// Every track stopped exactly once.
    pub fn fully_released(&self) -> bool {
        self.tracks.iter().all(|t| t.stop_calls() == 1)
    }
}

impl MediaStream for FakeStream {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>> {
        self.tracks
            .iter()
            .map(|t| Arc::clone(t) as Arc<dyn MediaTrack>)
            .collect()
    }
}

#[derive(Default)]
struct CaptureLog {
    requests: Vec<DisplayRequest>,
    streams: Vec<Arc<FakeStream>>,
    failures: VecDeque<RecorderError>,
}

/// Hands out a video + audio stream per request unless told to fail.
#[derive(Clone, Default)]
pub struct FakeCaptureSource {
    log: Arc<Mutex<CaptureLog>>,
}

impl FakeCaptureSource {
    pub fn fail_next(&self, error: RecorderError) {
        self.log.lock().failures.push_back(error);
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().requests.len()
    }

    pub fn last_request(&self) -> Option<DisplayRequest> {
        self.log.lock().requests.last().copied()
    }

    pub fn stream(&self, index: usize) -> Arc<FakeStream> {
        Arc::clone(&self.log.lock().streams[index])
    }

    pub fn stream_count(&self) -> usize {
        self.log.lock().streams.len()
    }
}

impl CaptureSource for FakeCaptureSource {
    fn acquire_display_stream(
        &mut self,
        request: &DisplayRequest,
    ) -> Result<StreamHandle, RecorderError> {
        let mut log = self.log.lock();
        log.requests.push(*request);
        if let Some(error) = log.failures.pop_front() {
            return Err(error);
        }

        let stream = Arc::new(FakeStream {
            id: format!("display-{}", log.streams.len()),
            tracks: vec![
                Arc::new(FakeTrack::new(TrackKind::Video)),
                Arc::new(FakeTrack::new(TrackKind::Audio)),
            ],
        });
        log.streams.push(Arc::clone(&stream));
        Ok(stream)
    }
}

// --- Encoder ---

#[derive(Default)]
pub struct EncoderLog {
    pub calls: Vec<&'static str>,
    pub mime_type: String,
    pub timeslice: Option<Duration>,
    callback: Option<EncoderEventCallback>,
    fail_start: Option<RecorderError>,
    fail_stop: Option<RecorderError>,
}

/// Test-side view of one encoder created by the factory.
#[derive(Clone, Default)]
pub struct FakeEncoderHandle {
    log: Arc<Mutex<EncoderLog>>,
}

impl FakeEncoderHandle {
    /// Deliver an event as the host event queue would.
    pub fn emit(&self, event: EncoderEvent) {
        let callback = self.log.lock().callback.clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    pub fn emit_data(&self, bytes: &[u8]) {
        self.emit(EncoderEvent::DataAvailable(Fragment::from(bytes)));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().calls.clone()
    }

    pub fn timeslice(&self) -> Option<Duration> {
        self.log.lock().timeslice
    }

    pub fn mime_type(&self) -> String {
        self.log.lock().mime_type.clone()
    }
}

struct FakeEncoder {
    handle: FakeEncoderHandle,
}

impl FakeEncoder {
    fn record(&self, call: &'static str) {
        self.handle.log.lock().calls.push(call);
    }
}

impl Encoder for FakeEncoder {
    fn set_event_callback(&mut self, callback: EncoderEventCallback) {
        self.handle.log.lock().callback = Some(callback);
    }

    fn start(&mut self, timeslice: Option<Duration>) -> Result<(), RecorderError> {
        self.record("start");
        let mut log = self.handle.log.lock();
        log.timeslice = timeslice;
        match log.fail_start.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn pause(&mut self) -> Result<(), RecorderError> {
        self.record("pause");
        Ok(())
    }

    fn resume(&mut self) -> Result<(), RecorderError> {
        self.record("resume");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        self.record("stop");
        match self.handle.log.lock().fail_stop.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct FactoryLog {
    encoders: Vec<FakeEncoderHandle>,
    fail_create: Option<RecorderError>,
    fail_start: Option<RecorderError>,
    fail_stop: Option<RecorderError>,
}

#[derive(Clone, Default)]
pub struct FakeEncoderFactory {
    log: Arc<Mutex<FactoryLog>>,
}

impl FakeEncoderFactory {
    pub fn encoder(&self, index: usize) -> FakeEncoderHandle {
        self.log.lock().encoders[index].clone()
    }

    pub fn latest(&self) -> FakeEncoderHandle {
        let log = self.log.lock();
        log.encoders[log.encoders.len() - 1].clone()
    }

    pub fn created(&self) -> usize {
        self.log.lock().encoders.len()
    }

    pub fn fail_next_create(&self, error: RecorderError) {
        self.log.lock().fail_create = Some(error);
    }

    pub fn fail_next_start(&self, error: RecorderError) {
        self.log.lock().fail_start = Some(error);
    }

    pub fn fail_next_stop(&self, error: RecorderError) {
        self.log.lock().fail_stop = Some(error);
    }
}

impl EncoderFactory for FakeEncoderFactory {
    fn create(
        &mut self,
        _stream: StreamHandle,
        mime_type: &str,
    ) -> Result<Box<dyn Encoder>, RecorderError> {
        let mut log = self.log.lock();
        if let Some(error) = log.fail_create.take() {
            return Err(error);
        }

        let handle = FakeEncoderHandle::default();
        {
            let mut enc = handle.log.lock();
            enc.mime_type = mime_type.to_string();
            enc.fail_start = log.fail_start.take();
            enc.fail_stop = log.fail_stop.take();
        }
        log.encoders.push(handle.clone());
        Ok(Box::new(FakeEncoder { handle }))
    }
}

// --- Preview ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewCall {
    BindStream(String),
    BindArtifact(String),
    Unbind,
    Play,
    Pause,
}

#[derive(Default)]
pub struct RecordingPreview {
    calls: Mutex<Vec<PreviewCall>>,
}

impl RecordingPreview {
    pub fn calls(&self) -> Vec<PreviewCall> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<PreviewCall> {
        self.calls.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl PreviewSink for RecordingPreview {
    fn bind_stream(&self, stream: StreamHandle) {
        self.calls.lock().push(PreviewCall::BindStream(stream.id()));
    }

    fn bind_artifact(&self, url: &str) {
        self.calls.lock().push(PreviewCall::BindArtifact(url.to_string()));
    }

    fn unbind(&self) {
        self.calls.lock().push(PreviewCall::Unbind);
    }

    fn play(&self) {
        self.calls.lock().push(PreviewCall::Play);
    }

    fn pause(&self) {
        self.calls.lock().push(PreviewCall::Pause);
    }
}

// --- Delegate / store ---

#[derive(Default)]
pub struct RecordingDelegate {
    pub statuses: Mutex<Vec<RecordingStatus>>,
    pub artifacts: Mutex<Vec<Artifact>>,
    pub errors: Mutex<Vec<RecorderError>>,
}

impl SessionDelegate for RecordingDelegate {
    fn on_status_changed(&self, status: RecordingStatus) {
        self.statuses.lock().push(status);
    }

    fn on_artifact_ready(&self, artifact: &Artifact) {
        self.artifacts.lock().push(artifact.clone());
    }

    fn on_error(&self, error: &RecorderError) {
        self.errors.lock().push(error.clone());
    }
}

pub struct FailingStore;

impl ArtifactStore for FailingStore {
    fn create_handle(&self, _bytes: &[u8], _mime_type: &str) -> Result<String, RecorderError> {
        Err(RecorderError::ArtifactFailed("out of memory".into()))
    }

    fn revoke_handle(&self, _url: &str) {}
}

// --- Harness ---

pub type TestSession = RecordingSession<FakeCaptureSource, FakeEncoderFactory>;

pub struct Harness {
    pub capture: FakeCaptureSource,
    pub encoders: FakeEncoderFactory,
    pub preview: Arc<RecordingPreview>,
    pub store: Arc<MemoryArtifactStore>,
    pub delegate: Arc<RecordingDelegate>,
}

pub fn harness() -> (TestSession, Harness) {
    let h = Harness {
        capture: FakeCaptureSource::default(),
        encoders: FakeEncoderFactory::default(),
        preview: Arc::new(RecordingPreview::default()),
        store: Arc::new(MemoryArtifactStore::new()),
        delegate: Arc::new(RecordingDelegate::default()),
    };
    let mut session = RecordingSession::new(
        h.capture.clone(),
        h.encoders.clone(),
        h.preview.clone(),
        h.store.clone(),
    );
    session.set_delegate(h.delegate.clone());
    (session, h)
}

/// Handle invariant: stream and encoder present iff not idle.
pub fn assert_handles_match_status(session: &TestSession) {
    let active = session.status().is_active();
    assert_eq!(session.has_capture_handle(), active);
    assert_eq!(session.has_encoder_handle(), active);
}
