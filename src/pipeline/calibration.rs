//! Calibration Stage
//!
//! Captures the first sample after a (re)start as the zero reference for the
//! wrist gyro. Whatever orientation the hand holds when the stream comes up
//! becomes "center"; downstream stages subtract the offset to get deltas.
//!
//! The offset is either fully set or fully unset. `reset()` clears it, and the
//! next observed sample becomes the new reference without producing motion.

use crate::pipeline::sample::SensorSample;
use tracing::debug;

/// Angular-rate reading that defines "center" for the wrist gyro.
///
/// `gx` is captured for completeness but the roll axis does not drive the
/// cursor, so it is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationOffset {
    /// Roll-rate offset (unused by motion, kept at 0)
    pub gx: f64,
    /// Pitch-rate offset (from gyro 2 Y)
    pub gy: f64,
    /// Yaw-rate offset (from gyro 2 Z)
    pub gz: f64,
}

/// A sample cleared for motion processing, paired with the active offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionInput {
    /// The sample itself, unchanged
    pub sample: SensorSample,
    /// Offset in effect when the sample was observed
    pub offset: CalibrationOffset,
}

/// Calibration stage state.
#[derive(Debug, Default)]
pub struct Calibration {
    offset: Option<CalibrationOffset>,
}

impl Calibration {
    /// Create an uncalibrated stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe one sample.
    ///
    /// If no offset is set, this sample becomes the zero reference and no
    /// motion input is produced this cycle. Otherwise the sample passes
    /// through paired with the current offset.
    pub fn observe(&mut self, sample: SensorSample) -> Option<MotionInput> {
        match self.offset {
            Some(offset) => Some(MotionInput { sample, offset }),
            None => {
                let offset = CalibrationOffset {
                    gx: 0.0,
                    gy: sample.gy2,
                    gz: sample.gz2,
                };
                debug!(gy = offset.gy, gz = offset.gz, "Calibration reference captured");
                self.offset = Some(offset);
                None
            }
        }
    }

    /// Clear the offset unconditionally.
    ///
    /// Idempotent; safe to call mid-stream. The next observed sample becomes
    /// the new reference.
    pub fn reset(&mut self) {
        self.offset = None;
    }

    /// Whether a zero reference has been captured.
    pub fn is_calibrated(&self) -> bool {
        self.offset.is_some()
    }

    /// Current offset, if set.
    pub fn offset(&self) -> Option<CalibrationOffset> {
        self.offset
    }
}
