// IMU driver module
//
// The chip driver never talks to the display and never fails hard: every
// lifecycle step reports what it did and leaves the device handle usable.

mod calibration;
mod handle;
pub mod icm42688;

pub use self::calibration::{
    CalibrationAccumulator, CalibrationOutcome, CalibrationSource, DefaultReason, Offsets,
};
pub use self::handle::DeviceHandle;
pub use self::icm42688::{
    Icm42688, Icm42688Config, InitPath, ProbeReport, UpdateOutcome, ICM42688_I2C_ADDR,
    ICM42688_WHO_AM_I_REG, ICM42688_WHO_AM_I_VALUE,
};
