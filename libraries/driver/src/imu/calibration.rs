//! Static bias calibration
//!
//! The sensor is assumed level and still while a handful of samples are
//! averaged. Offsets are stored so that subtracting them leaves zero rotation
//! and exactly one gravity on Z.

use hal::{RawMotion, Vector3d};

/// Per-axis biases in raw counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offsets {
    pub gyro: Vector3d,
    pub accel: Vector3d,
}

impl Offsets {
    /// Offsets used when no real data is available: no gyro bias and
    /// accelerometer Z shifted by one negative gravity.
    pub fn level(one_g_counts: i16) -> Self {
        Self {
            gyro: Vector3d::zeros(),
            accel: Vector3d::new(0.0, 0.0, -f32::from(one_g_counts)),
        }
    }
}

/// Running sums over one calibration pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationAccumulator {
    gyro_sum: [i32; 3],
    accel_sum: [i32; 3],
    samples: u32,
}

impl CalibrationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sample: &RawMotion) {
        for axis in 0..3 {
            self.gyro_sum[axis] += i32::from(sample.gyro[axis]);
            self.accel_sum[axis] += i32::from(sample.accel[axis]);
        }
        self.samples += 1;
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Per-axis means, or `None` if nothing was accumulated
    pub fn offsets(&self, one_g_counts: i16) -> Option<Offsets> {
        if self.samples == 0 {
            return None;
        }
        let n = self.samples as f32;
        let mean = |sums: &[i32; 3]| {
            Vector3d::new(sums[0] as f32 / n, sums[1] as f32 / n, sums[2] as f32 / n)
        };

        let mut accel = mean(&self.accel_sum);
        accel.z -= f32::from(one_g_counts);
        Some(Offsets {
            gyro: mean(&self.gyro_sum),
            accel,
        })
    }
}

/// Why calibration fell back to [`Offsets::level`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultReason {
    /// The link was already degraded; no sampling was attempted
    SimulationGate,
    /// Sampling ran but no genuine sample arrived
    NoValidSamples,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationSource {
    FromSamples { samples: u32 },
    Defaults(DefaultReason),
}

/// Result of a calibration pass. Always a success from the caller's point of
/// view; `source` tells real offsets from defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationOutcome {
    pub source: CalibrationSource,
    pub offsets: Offsets,
}

impl CalibrationOutcome {
    pub fn is_from_data(&self) -> bool {
        matches!(self.source, CalibrationSource::FromSamples { .. })
    }
}
