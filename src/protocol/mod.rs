//! Consumer wire protocol
//!
//! Newline-delimited JSON between the bridge and its consumers (renderer,
//! recording UI). Inbound control messages are fire-and-forget signals with
//! no acknowledgment; outbound state frames carry the latest raw record plus
//! the processed cursor state.
//!
//! Malformed inbound messages (non-JSON, unknown shape) are logged and
//! dropped. They never transition session state.

use crate::state::StateSnapshot;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Control messages accepted from consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Re-center: clear the calibration reference
    #[serde(rename = "RECALIBRATE")]
    Recalibrate,

    /// Begin persisting frames to storage
    #[serde(rename = "START_REC")]
    StartRec,

    /// Stop persisting frames
    #[serde(rename = "STOP_REC")]
    StopRec,
}

/// Parse one inbound control line. Returns `None` for anything malformed.
pub fn parse_control(line: &str) -> Option<ControlMessage> {
    match serde_json::from_str(line) {
        Ok(msg) => Some(msg),
        Err(e) => {
            warn!("Dropping malformed control message: {}", e);
            None
        }
    }
}

/// Cursor triple as serialized to consumers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CursorFrame {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Click state
    pub click: bool,
}

/// One outbound state frame.
#[derive(Debug, Clone, Serialize)]
pub struct StateFrame<'a> {
    /// Raw text of the last accepted record
    pub raw: &'a str,
    /// Processed cursor state
    pub cursor: CursorFrame,
    /// Session lifecycle state
    pub session: crate::session::SessionState,
    /// Whether frames are being persisted
    pub recording: bool,
}

impl<'a> StateFrame<'a> {
    /// Build a frame from a snapshot, if any record has been accepted yet.
    pub fn from_snapshot(snapshot: &'a StateSnapshot) -> Option<Self> {
        let raw = snapshot.last_raw.as_deref()?;
        Some(Self {
            raw,
            cursor: CursorFrame {
                x: snapshot.cursor.x,
                y: snapshot.cursor.y,
                click: snapshot.click,
            },
            session: snapshot.session,
            recording: snapshot.recording,
        })
    }

    /// Serialize to one wire line (no trailing newline).
    pub fn to_line(&self) -> String {
        // StateFrame has no map keys that can fail to serialize
        serde_json::to_string(self).expect("state frame serialization cannot fail")
    }
}
