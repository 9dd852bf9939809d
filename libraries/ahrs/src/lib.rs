//! # AHRS - Attitude and Heading Reference System
//!
//! Attitude estimation for a 6-axis IMU without a magnetometer. Pitch and
//! roll come from a complementary filter over gyro rate and accelerometer
//! tilt; yaw is gyro integration only.
//!
//! ## Platform Support
//!
//! The crate is `no_std`; float math goes through `num-traits` with `libm`.

#![no_std]

mod attitude;
mod complementary;
pub mod error;

pub use attitude::Attitude;
pub use complementary::{
    ComplementaryConfig, ComplementaryFilter, CorrectedSample, DEFAULT_ALPHA,
    GYRO_SENSITIVITY_2000DPS, RAD_TO_DEG,
};
pub use error::{AhrsError, AhrsResult};
