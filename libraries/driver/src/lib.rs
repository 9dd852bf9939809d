//! Fault-tolerant IMU acquisition
//!
//! Turns raw gyroscope and accelerometer counts into a calibrated attitude
//! while the sensor bus is flaky or the sensor is missing altogether.

#![no_std]

mod error;
pub mod imu;
mod irq;
mod link;
pub mod reader;
pub mod retry;
mod rng;

pub use error::{DriverError, DriverResult};
pub use imu::*;
pub use irq::IrqGuard;
pub use link::{CommunicationState, LinkHealth};
pub use reader::{FaultAwareReader, FaultPolicy, MotionRead, RegisterFault, ONE_G_COUNTS};
pub use retry::{retry_with_budget, RetryBudget, RetryOutcome};
pub use rng::Lcg;
