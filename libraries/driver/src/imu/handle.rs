use ahrs::Attitude;
use hal::{RawMotion, Vector3d};

use super::calibration::Offsets;

/// Driver state for one sensor, owned by the control loop.
///
/// `attitude` means something only once `is_initialized` is set, and the
/// offsets only once `is_calibrated` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceHandle {
    pub raw_accel: [i16; 3],
    pub raw_gyro: [i16; 3],
    /// Celsius
    pub temperature: f32,
    /// Gyro bias in counts
    pub gyro_offset: Vector3d,
    /// Accelerometer bias in counts, Z relative to level
    pub accel_offset: Vector3d,
    pub attitude: Attitude,
    pub is_initialized: bool,
    pub is_calibrated: bool,
}

impl Default for DeviceHandle {
    fn default() -> Self {
        Self {
            raw_accel: [0; 3],
            raw_gyro: [0; 3],
            temperature: 0.0,
            gyro_offset: Vector3d::zeros(),
            accel_offset: Vector3d::zeros(),
            attitude: Attitude::default(),
            is_initialized: false,
            is_calibrated: false,
        }
    }
}

impl DeviceHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last sample written into the handle, whatever its origin
    pub fn raw_motion(&self) -> RawMotion {
        RawMotion {
            gyro: self.raw_gyro,
            accel: self.raw_accel,
            temperature: self.temperature,
        }
    }

    pub(crate) fn store_raw(&mut self, sample: &RawMotion) {
        self.raw_gyro = sample.gyro;
        self.raw_accel = sample.accel;
        self.temperature = sample.temperature;
    }

    pub fn offsets(&self) -> Offsets {
        Offsets {
            gyro: self.gyro_offset,
            accel: self.accel_offset,
        }
    }

    pub(crate) fn apply_offsets(&mut self, offsets: &Offsets) {
        self.gyro_offset = offsets.gyro;
        self.accel_offset = offsets.accel;
        self.is_calibrated = true;
    }
}
