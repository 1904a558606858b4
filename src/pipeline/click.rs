//! Click Detector
//!
//! Threshold comparison on sensor 1's vertical acceleration axis. Stateless
//! and per-sample: no hysteresis or debounce, so flicker near the threshold
//! is expected behavior for a hand hovering at exactly tap strength.

use crate::pipeline::sample::SensorSample;

/// Acceleration magnitude (g) above which the sample reads as a press.
/// The comparison is strict: a reading of exactly 1.8 is not a press.
pub const CLICK_THRESHOLD: f64 = 1.8;

/// Whether this sample reads as a press.
pub fn detect(sample: &SensorSample) -> bool {
    sample.az1.abs() > CLICK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_with_az1(az1: f64) -> SensorSample {
        SensorSample::from_fields([0.0, 0.0, az1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_above_threshold_is_press() {
        assert!(detect(&sample_with_az1(1.81)));
        assert!(detect(&sample_with_az1(-1.81)));
        assert!(detect(&sample_with_az1(5.0)));
    }

    #[test]
    fn test_below_threshold_is_not_press() {
        assert!(!detect(&sample_with_az1(1.79)));
        assert!(!detect(&sample_with_az1(-1.79)));
        assert!(!detect(&sample_with_az1(0.0)));
    }

    #[test]
    fn test_threshold_itself_is_exclusive() {
        assert!(!detect(&sample_with_az1(CLICK_THRESHOLD)));
        assert!(!detect(&sample_with_az1(-CLICK_THRESHOLD)));
    }

    #[test]
    fn test_detection_depends_only_on_latest_sample() {
        // Same sample always yields the same answer regardless of history
        let pressed = sample_with_az1(2.0);
        let released = sample_with_az1(0.5);
        assert!(detect(&pressed));
        assert!(!detect(&released));
        assert!(detect(&pressed));
    }
}
