//! Motion Integrator
//!
//! Accumulates gain-scaled filtered deltas into the persistent 2D cursor
//! position, clamped to the working area. Integration is cumulative; there is
//! no decay or return-to-center beyond what the deadzone and smoothing impart.

use crate::pipeline::conditioner::FilteredDelta;

/// Per-axis gain converting filtered angular-rate delta into screen units.
pub const GAIN_X: f64 = 4.0;
/// Per-axis gain converting filtered angular-rate delta into screen units.
pub const GAIN_Y: f64 = 4.0;

/// Horizontal working-area bound: x is clamped to [-X_BOUND, X_BOUND].
pub const X_BOUND: f64 = 400.0;
/// Vertical working-area bound: y is clamped to [-Y_BOUND, Y_BOUND].
pub const Y_BOUND: f64 = 250.0;

/// Persistent cursor position in working-area units, origin at center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorPosition {
    /// Horizontal position, always within [-X_BOUND, X_BOUND]
    pub x: f64,
    /// Vertical position, always within [-Y_BOUND, Y_BOUND]
    pub y: f64,
}

/// Integrate one filtered delta into the cursor position.
///
/// Saturating clamp: positions cap at the bounds, they never wrap.
pub fn integrate(cursor: CursorPosition, delta: &FilteredDelta) -> CursorPosition {
    CursorPosition {
        x: (cursor.x + delta.dx * GAIN_X).clamp(-X_BOUND, X_BOUND),
        y: (cursor.y + delta.dy * GAIN_Y).clamp(-Y_BOUND, Y_BOUND),
    }
}
