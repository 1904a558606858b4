//! Sensor Stream Processor
//!
//! Stateful single-producer/single-consumer pipeline turning raw glove
//! records into calibrated, smoothed cursor state plus a click flag.
//!
//! # Data Flow
//!
//! ```text
//! raw line
//!   └─> decoder      (12-field CSV -> SensorSample, lossy)
//!         └─> calibration  (first sample becomes the zero reference)
//!               └─> conditioner  (deadzone -> exponential smoothing)
//!                     ├─> integrator  (gain, accumulate, clamp)
//!                     └─> click       (|az1| threshold, stateless)
//! ```
//!
//! Each record is processed to completion before the next is accepted.
//! Calibration and click detection are stateless per sample; smoothing and
//! integration are the only genuinely stateful stages, and their state is
//! threaded through pure update functions.

pub mod calibration;
pub mod click;
pub mod conditioner;
pub mod decoder;
pub mod integrator;
pub mod sample;

pub use calibration::{Calibration, CalibrationOffset, MotionInput};
pub use conditioner::{FilteredDelta, SmoothingState};
pub use decoder::{decode_line, encode_line};
pub use integrator::CursorPosition;
pub use sample::SensorSample;

/// Result of processing one accepted record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineUpdate {
    /// The decoded sample
    pub sample: SensorSample,
    /// Cursor position after this cycle (unchanged for a calibration sample)
    pub cursor: CursorPosition,
    /// Click state after this cycle (unchanged for a calibration sample)
    pub click: bool,
}

/// The full processing pipeline for one glove stream.
#[derive(Debug, Default)]
pub struct SensorPipeline {
    calibration: Calibration,
    smoothing: SmoothingState,
    cursor: CursorPosition,
    click: bool,
}

impl SensorPipeline {
    /// Create a fresh pipeline: uncalibrated, cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw text record.
    ///
    /// Returns `None` when the record is malformed (silently dropped, no
    /// state change). A calibration sample yields an update carrying the
    /// previous cursor/click values; motion samples advance them.
    pub fn process_line(&mut self, line: &str) -> Option<PipelineUpdate> {
        let sample = decoder::decode_line(line)?;
        Some(self.process_sample(sample))
    }

    /// Process one already-decoded sample.
    pub fn process_sample(&mut self, sample: SensorSample) -> PipelineUpdate {
        if let Some(motion) = self.calibration.observe(sample) {
            let (delta, smoothing) = conditioner::condition(&motion, self.smoothing);
            self.smoothing = smoothing;
            self.cursor = integrator::integrate(self.cursor, &delta);
            self.click = click::detect(&sample);
        }

        PipelineUpdate {
            sample,
            cursor: self.cursor,
            click: self.click,
        }
    }

    /// Clear the calibration reference; the next sample re-centers.
    ///
    /// The cursor position is deliberately left alone: re-centering changes
    /// the neutral hand angle, not where the cursor sits.
    pub fn recalibrate(&mut self) {
        self.calibration.reset();
    }

    /// Whether a zero reference has been captured.
    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_calibrated()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// Current click state.
    pub fn click(&self) -> bool {
        self.click
    }
}
