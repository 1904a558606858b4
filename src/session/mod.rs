//! Stream Session Controller
//!
//! Owns the connection lifecycle for one glove stream: calibration state
//! reset on disconnect, manual re-centering, and start/stop recording
//! signaling to the storage collaborator.
//!
//! # State machine
//!
//! ```text
//! Disconnected ──(valid record)──> Calibrating ──(first valid sample)──> Active
//!      ^                                  ^                                  │
//!      │                                  └────────(recalibrate)─────────────┤
//!      └──────────────────────(disconnect, offset cleared)───────────────────┘
//! ```
//!
//! Disconnect always clears the calibration reference before a new
//! connection's first sample is processed; stale offsets never leak across
//! connections. Recalibration clears only the reference angle, never the
//! cursor position.

use crate::pipeline::{decode_line, CursorPosition, PipelineUpdate, SensorPipeline};
use crate::recording::RecordingSink;
use serde::Serialize;
use tracing::{info, warn};

/// Lifecycle state of the glove stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No stream traffic; calibration is cleared
    Disconnected,
    /// Stream is up, waiting for the first sample to define "center"
    Calibrating,
    /// Calibrated and producing cursor motion
    Active,
}

/// Session controller wrapping one [`SensorPipeline`] and a recording sink.
pub struct SessionController<R: RecordingSink> {
    state: SessionState,
    pipeline: SensorPipeline,
    recorder: R,
    recording: bool,
}

impl<R: RecordingSink> SessionController<R> {
    /// Create a controller in the `Disconnected` state.
    pub fn new(recorder: R) -> Self {
        Self {
            state: SessionState::Disconnected,
            pipeline: SensorPipeline::new(),
            recorder,
            recording: false,
        }
    }

    /// Stream traffic has (re)appeared.
    pub fn on_connected(&mut self) {
        if self.state == SessionState::Disconnected {
            info!("Glove stream connected, calibrating");
            self.pipeline.recalibrate();
            self.state = SessionState::Calibrating;
        }
    }

    /// Stream traffic has stopped.
    ///
    /// Clears the calibration reference so the next connection's first sample
    /// re-centers. Recording, if active, keeps running: the capture file
    /// belongs to the consumer, not to the glove link.
    pub fn on_disconnected(&mut self) {
        if self.state != SessionState::Disconnected {
            info!("Glove stream disconnected, calibration cleared");
            self.pipeline.recalibrate();
            self.state = SessionState::Disconnected;
        }
    }

    /// Process one raw record from the stream.
    ///
    /// Malformed records are dropped without any state change, the connect
    /// transition included: only a record that decodes counts as glove
    /// traffic. Every valid frame, the calibration sample included, is
    /// appended to the active recording, so captures contain everything the
    /// glove sent.
    pub fn handle_line(&mut self, line: &str) -> Option<PipelineUpdate> {
        let sample = decode_line(line)?;

        // A valid record arriving while nominally disconnected is the
        // connect event
        if self.state == SessionState::Disconnected {
            self.on_connected();
        }

        let update = self.pipeline.process_sample(sample);

        if self.recording {
            if let Err(e) = self.recorder.append(&update.sample) {
                warn!("Recording append failed, stopping capture: {}", e);
                self.recording = false;
                let _ = self.recorder.finish();
            }
        }

        if self.state == SessionState::Calibrating && self.pipeline.is_calibrated() {
            info!("Calibration reference set, session active");
            self.state = SessionState::Active;
        }

        Some(update)
    }

    /// Manual re-center request from a consumer.
    pub fn recalibrate(&mut self) {
        info!("Re-centering: calibration reference cleared");
        self.pipeline.recalibrate();
        if self.state == SessionState::Active {
            self.state = SessionState::Calibrating;
        }
    }

    /// Tell the storage collaborator to begin persisting frames.
    pub fn start_recording(&mut self) {
        match self.recorder.begin() {
            Ok(()) => {
                info!("Recording started");
                self.recording = true;
            }
            Err(e) => {
                warn!("Failed to start recording: {}", e);
                self.recording = false;
            }
        }
    }

    /// Tell the storage collaborator to stop persisting frames.
    pub fn stop_recording(&mut self) {
        if self.recording {
            self.recording = false;
            if let Err(e) = self.recorder.finish() {
                warn!("Failed to finalize recording: {}", e);
            } else {
                info!("Recording stopped");
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether frames are being persisted.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Current cursor position.
    pub fn cursor(&self) -> CursorPosition {
        self.pipeline.cursor()
    }

    /// Current click state.
    pub fn click(&self) -> bool {
        self.pipeline.click()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SensorSample;
    use crate::recording::{RecordingError, RecordingSink};

    /// In-memory sink for session tests.
    #[derive(Default)]
    struct MemorySink {
        active: bool,
        frames: Vec<SensorSample>,
        begins: usize,
    }

    impl RecordingSink for MemorySink {
        fn begin(&mut self) -> crate::recording::Result<()> {
            self.active = true;
            self.begins += 1;
            self.frames.clear();
            Ok(())
        }

        fn append(&mut self, sample: &SensorSample) -> crate::recording::Result<()> {
            if !self.active {
                return Err(RecordingError::NotRecording);
            }
            self.frames.push(*sample);
            Ok(())
        }

        fn finish(&mut self) -> crate::recording::Result<()> {
            self.active = false;
            Ok(())
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    const REST: &str = "0,0,0,0,0,0,0,0,0,0,0,0";
    const PITCH: &str = "0,0,0,0,0,0,0,0,0,0,5,0";

    fn controller() -> SessionController<MemorySink> {
        SessionController::new(MemorySink::default())
    }

    #[test]
    fn test_first_sample_transitions_to_active() {
        let mut session = controller();
        assert_eq!(session.state(), SessionState::Disconnected);

        session.on_connected();
        assert_eq!(session.state(), SessionState::Calibrating);

        session.handle_line(REST);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_sample_while_disconnected_acts_as_connect() {
        let mut session = controller();
        // Defensive path: no explicit connect event
        let update = session.handle_line(REST).unwrap();
        assert_eq!(session.state(), SessionState::Active);
        // The sample was consumed as calibration, not motion
        assert_eq!(update.cursor, CursorPosition::default());
    }

    #[test]
    fn test_malformed_line_never_transitions_state() {
        let mut session = controller();
        session.on_connected();
        assert!(session.handle_line("not,a,record").is_none());
        assert_eq!(session.state(), SessionState::Calibrating);
    }

    #[test]
    fn test_garbage_traffic_never_connects() {
        let mut session = controller();
        session.handle_line("not,a,record");
        session.handle_line("");
        session.handle_line("0,0,NaN,0,0,0,0,0,0,0,0,0");
        assert_eq!(session.state(), SessionState::Disconnected);

        // The first record that decodes is the connect event
        session.handle_line(REST);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_disconnect_clears_calibration() {
        let mut session = controller();
        session.handle_line(REST);
        session.handle_line(PITCH);
        let position = session.cursor();
        assert!(position.y > 0.0);

        session.on_disconnected();
        assert_eq!(session.state(), SessionState::Disconnected);

        // Reconnect: first sample re-centers, regardless of prior offset
        session.on_connected();
        session.handle_line(PITCH);
        assert_eq!(session.cursor(), position);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_recalibrate_returns_to_calibrating_and_keeps_cursor() {
        let mut session = controller();
        session.handle_line(REST);
        session.handle_line(PITCH);
        let position = session.cursor();

        session.recalibrate();
        assert_eq!(session.state(), SessionState::Calibrating);
        assert_eq!(session.cursor(), position);

        session.handle_line(PITCH);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.cursor(), position);
    }

    #[test]
    fn test_recording_captures_every_valid_frame() {
        let mut session = controller();
        session.start_recording();
        assert!(session.is_recording());

        session.handle_line(REST); // calibration frame is still captured
        session.handle_line(PITCH);
        session.handle_line("bad line");
        session.handle_line(PITCH);

        session.stop_recording();
        assert!(!session.is_recording());
        assert_eq!(session.recorder.frames.len(), 3);
    }

    #[test]
    fn test_recording_survives_stream_disconnect() {
        let mut session = controller();
        session.start_recording();
        session.handle_line(REST);
        session.on_disconnected();
        assert!(session.is_recording());

        session.handle_line(PITCH);
        session.stop_recording();
        assert_eq!(session.recorder.frames.len(), 2);
    }

    #[test]
    fn test_restart_recording_begins_fresh_capture() {
        let mut session = controller();
        session.start_recording();
        session.handle_line(REST);
        session.start_recording();
        session.handle_line(PITCH);
        session.stop_recording();

        assert_eq!(session.recorder.begins, 2);
        assert_eq!(session.recorder.frames.len(), 1);
    }
}
