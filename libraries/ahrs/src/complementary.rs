//! Complementary attitude filter
//!
//! Blends the integrated gyroscope rate (smooth, drifts) with the tilt implied
//! by the gravity vector (noisy under motion, drift-free) using a fixed weight.

use nalgebra::Vector3;
use num_traits::Float;

use crate::attitude::Attitude;
use crate::error::{helpers, AhrsResult};

/// Gyro weight of the complementary blend
pub const DEFAULT_ALPHA: f32 = 0.98;

/// Counts per deg/s at the ±2000 dps full-scale range
pub const GYRO_SENSITIVITY_2000DPS: f32 = 16.4;

/// Radians to degrees, to the precision the firmware has always used
pub const RAD_TO_DEG: f32 = 57.3;

/// Tuning of the complementary filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplementaryConfig {
    /// Weight of the gyro-propagated angle, in `[0, 1]`
    pub alpha: f32,
    /// Gyro counts per degree/second
    pub gyro_sensitivity: f32,
    /// Scale applied to accelerometer tilt angles
    pub rad_to_deg: f32,
}

impl Default for ComplementaryConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            gyro_sensitivity: GYRO_SENSITIVITY_2000DPS,
            rad_to_deg: RAD_TO_DEG,
        }
    }
}

impl ComplementaryConfig {
    /// Create a validated configuration
    ///
    /// # Arguments
    ///
    /// * `alpha` - Gyro weight, must lie in `[0, 1]`
    /// * `gyro_sensitivity` - Counts per deg/s, must be positive
    pub fn new(alpha: f32, gyro_sensitivity: f32) -> AhrsResult<Self> {
        let alpha = helpers::check_range("alpha", alpha, 0.0, 1.0)?;
        let gyro_sensitivity =
            helpers::check_range("gyro_sensitivity", gyro_sensitivity, f32::MIN_POSITIVE, f32::MAX)?;
        Ok(Self {
            alpha,
            gyro_sensitivity,
            ..Self::default()
        })
    }
}

/// A sample with calibration offsets removed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedSample {
    /// Accelerometer, still in counts
    pub accel: Vector3<f32>,
    /// Angular rate in degrees/second
    pub gyro_rate: Vector3<f32>,
}

/// Stateless complementary filter; the caller owns the attitude.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComplementaryFilter {
    config: ComplementaryConfig,
}

impl ComplementaryFilter {
    pub fn new(config: ComplementaryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComplementaryConfig {
        &self.config
    }

    /// Subtract offsets and scale the gyro to degrees/second
    pub fn correct(
        &self,
        raw_gyro: Vector3<f32>,
        raw_accel: Vector3<f32>,
        gyro_offset: &Vector3<f32>,
        accel_offset: &Vector3<f32>,
    ) -> CorrectedSample {
        CorrectedSample {
            accel: raw_accel - accel_offset,
            gyro_rate: (raw_gyro - gyro_offset) / self.config.gyro_sensitivity,
        }
    }

    /// Pitch and roll implied by the gravity vector, in degrees
    pub fn accel_tilt(&self, accel: &Vector3<f32>) -> (f32, f32) {
        let (ax, ay, az) = (accel.x, accel.y, accel.z);
        let pitch = self.config.rad_to_deg * ay.atan2(az);
        let roll = -self.config.rad_to_deg * (-ax).atan2((ay * ay + az * az).sqrt());
        (pitch, roll)
    }

    /// One fusion step over `dt` seconds
    pub fn fuse(&self, previous: Attitude, sample: &CorrectedSample, dt: f32) -> Attitude {
        let alpha = self.config.alpha;
        let rate = &sample.gyro_rate;
        let (pitch_acc, roll_acc) = self.accel_tilt(&sample.accel);

        Attitude {
            pitch: alpha * (previous.pitch + rate.y * dt) + (1.0 - alpha) * pitch_acc,
            roll: alpha * (previous.roll + rate.x * dt) + (1.0 - alpha) * roll_acc,
            // No magnetometer: pure integration, deliberately unwrapped
            yaw: previous.yaw + rate.z * dt,
        }
    }
}
