//! Signal Conditioner
//!
//! Deadzone rejection followed by single-pole exponential smoothing of the
//! two angular-rate axes. Order matters: the deadzone is applied to the raw
//! delta *before* smoothing, so a momentary rest still pulls the smoothed
//! value toward zero instead of being smoothed away.

use crate::pipeline::calibration::MotionInput;

/// Raw angular-rate deltas below this magnitude are zeroed (deg/s).
pub const DEADZONE: f64 = 2.0;

/// Exponential smoothing factor: weight on the previous filtered value.
/// 0.85 keeps heavy history, a single-pole low-pass.
pub const SMOOTHING: f64 = 0.85;

/// Previous cycle's filtered per-axis deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothingState {
    /// Filtered X-axis (yaw) delta from the last cycle
    pub x: f64,
    /// Filtered Y-axis (pitch) delta from the last cycle
    pub y: f64,
}

/// Filtered per-axis cursor delta for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredDelta {
    /// Filtered yaw-rate delta
    pub dx: f64,
    /// Filtered pitch-rate delta
    pub dy: f64,
}

/// Condition one motion input against the previous smoothing state.
///
/// Returns the filtered delta for this cycle and the new smoothing state,
/// which becomes `prev` for the next call.
pub fn condition(input: &MotionInput, prev: SmoothingState) -> (FilteredDelta, SmoothingState) {
    // Yaw drives X, pitch drives Y
    let raw_x = apply_deadzone(input.sample.gz2 - input.offset.gz);
    let raw_y = apply_deadzone(input.sample.gy2 - input.offset.gy);

    let next = SmoothingState {
        x: prev.x * SMOOTHING + raw_x * (1.0 - SMOOTHING),
        y: prev.y * SMOOTHING + raw_y * (1.0 - SMOOTHING),
    };

    (FilteredDelta { dx: next.x, dy: next.y }, next)
}

/// Zero a raw delta whose magnitude is below [`DEADZONE`].
fn apply_deadzone(raw: f64) -> f64 {
    if raw.abs() < DEADZONE {
        0.0
    } else {
        raw
    }
}
