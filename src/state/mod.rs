//! Published state
//!
//! The one point of cross-boundary sharing: the ingest task updates cursor
//! state once per processed sample, while consumer push loops read it at
//! their own cadence. The whole snapshot sits behind a single
//! `parking_lot::RwLock`, so a reader can never observe a torn update mixing
//! an old x with a new y.

use crate::pipeline::{CursorPosition, PipelineUpdate, SensorSample};
use crate::session::SessionState;
use parking_lot::RwLock;

/// Consistent snapshot of everything a consumer may read.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    /// Current cursor position
    pub cursor: CursorPosition,
    /// Current click state
    pub click: bool,
    /// Last decoded sample, if any record has been accepted yet
    pub last_sample: Option<SensorSample>,
    /// Raw text of the last accepted record
    pub last_raw: Option<String>,
    /// Stream lifecycle state
    pub session: SessionState,
    /// Whether frames are being persisted
    pub recording: bool,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            cursor: CursorPosition::default(),
            click: false,
            last_sample: None,
            last_raw: None,
            session: SessionState::Disconnected,
            recording: false,
        }
    }
}

/// Shared state published by the pipeline and polled by consumers.
#[derive(Debug, Default)]
pub struct SharedState {
    inner: RwLock<StateSnapshot>,
}

impl SharedState {
    /// Create state at the origin, disconnected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the result of one processed record.
    pub fn apply_update(&self, raw: &str, update: &PipelineUpdate) {
        let mut inner = self.inner.write();
        inner.cursor = update.cursor;
        inner.click = update.click;
        inner.last_sample = Some(update.sample);
        inner.last_raw = Some(raw.to_string());
    }

    /// Publish a session lifecycle change.
    pub fn set_session(&self, session: SessionState) {
        self.inner.write().session = session;
    }

    /// Publish the recording flag.
    pub fn set_recording(&self, recording: bool) {
        self.inner.write().recording = recording;
    }

    /// Read a consistent snapshot. Side-effect free, callable at any time.
    pub fn snapshot(&self) -> StateSnapshot {
        self.inner.read().clone()
    }

    /// Read just the cursor triple (x, y, click).
    pub fn cursor(&self) -> (f64, f64, bool) {
        let inner = self.inner.read();
        (inner.cursor.x, inner.cursor.y, inner.click)
    }
}
