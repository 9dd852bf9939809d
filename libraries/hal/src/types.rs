/// Common data types for hardware abstraction interfaces
pub use nalgebra::Vector3;

/// 3D vector representation using nalgebra
pub type Vector3d = Vector3<f32>;

/// One raw sample as delivered by the motion sensor, in sensor counts.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RawMotion {
    /// Gyroscope counts (x, y, z)
    pub gyro: [i16; 3],
    /// Accelerometer counts (x, y, z)
    pub accel: [i16; 3],
    /// Die temperature in Celsius
    pub temperature: f32,
}

impl RawMotion {
    /// A reading with every gyro and accel count at zero.
    ///
    /// A floating or unpowered bus reads back as all zeroes, so this is the
    /// shape of a transaction that never happened.
    pub fn is_all_zero(&self) -> bool {
        self.gyro.iter().chain(self.accel.iter()).all(|&c| c == 0)
    }

    pub fn gyro_vector(&self) -> Vector3d {
        Vector3d::new(
            f32::from(self.gyro[0]),
            f32::from(self.gyro[1]),
            f32::from(self.gyro[2]),
        )
    }

    pub fn accel_vector(&self) -> Vector3d {
        Vector3d::new(
            f32::from(self.accel[0]),
            f32::from(self.accel[1]),
            f32::from(self.accel[2]),
        )
    }
}
