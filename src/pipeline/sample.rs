//! Sensor sample type
//!
//! One decoded record from the glove: two 6-axis IMUs, each reporting 3-axis
//! acceleration and 3-axis angular rate.

use serde::{Deserialize, Serialize};

/// One decoded 12-field sensor record.
///
/// Field order matches the wire format exactly: accel-1 xyz, gyro-1 xyz,
/// accel-2 xyz, gyro-2 xyz. Sensor 1 sits on the back of the hand (click
/// detection uses its vertical accel axis); sensor 2 sits on the wrist
/// (cursor motion uses its pitch/yaw rates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Sensor 1 acceleration, X axis (g)
    pub ax1: f64,
    /// Sensor 1 acceleration, Y axis (g)
    pub ay1: f64,
    /// Sensor 1 acceleration, Z axis (g) - click detection axis
    pub az1: f64,
    /// Sensor 1 angular rate, X axis (deg/s)
    pub gx1: f64,
    /// Sensor 1 angular rate, Y axis (deg/s)
    pub gy1: f64,
    /// Sensor 1 angular rate, Z axis (deg/s)
    pub gz1: f64,
    /// Sensor 2 acceleration, X axis (g)
    pub ax2: f64,
    /// Sensor 2 acceleration, Y axis (g)
    pub ay2: f64,
    /// Sensor 2 acceleration, Z axis (g)
    pub az2: f64,
    /// Sensor 2 angular rate, X axis (deg/s)
    pub gx2: f64,
    /// Sensor 2 angular rate, Y axis (deg/s) - pitch, drives cursor Y
    pub gy2: f64,
    /// Sensor 2 angular rate, Z axis (deg/s) - yaw, drives cursor X
    pub gz2: f64,
}

impl SensorSample {
    /// Number of numeric fields in one wire record
    pub const FIELD_COUNT: usize = 12;

    /// Build a sample from fields in wire order.
    pub fn from_fields(fields: [f64; Self::FIELD_COUNT]) -> Self {
        let [ax1, ay1, az1, gx1, gy1, gz1, ax2, ay2, az2, gx2, gy2, gz2] = fields;
        Self {
            ax1,
            ay1,
            az1,
            gx1,
            gy1,
            gz1,
            ax2,
            ay2,
            az2,
            gx2,
            gy2,
            gz2,
        }
    }

    /// Fields in wire order, the inverse of [`SensorSample::from_fields`].
    pub fn to_fields(&self) -> [f64; Self::FIELD_COUNT] {
        [
            self.ax1, self.ay1, self.az1, self.gx1, self.gy1, self.gz1, self.ax2, self.ay2,
            self.az2, self.gx2, self.gy2, self.gz2,
        ]
    }
}
