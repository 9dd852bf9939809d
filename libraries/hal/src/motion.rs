/// Raw 6-axis motion source interface
use crate::types::RawMotion;

/// Register-level access to a 6-axis gyroscope + accelerometer.
///
/// Implementations configure the chip and burst-read its data registers.
/// Neither call reports transport failures; callers infer them from the data.
pub trait MotionSource {
    /// Run the chip's power-up and range configuration sequence
    ///
    /// Returns true if the chip acknowledged the configuration
    fn initialize(&mut self) -> bool;

    /// Burst-read gyroscope, accelerometer and temperature
    fn read_motion(&mut self) -> RawMotion;
}

impl<M: MotionSource + ?Sized> MotionSource for &mut M {
    fn initialize(&mut self) -> bool {
        (**self).initialize()
    }

    fn read_motion(&mut self) -> RawMotion {
        (**self).read_motion()
    }
}
