/// Euler attitude estimate in degrees.
///
/// Yaw has no absolute reference and is never wrapped: it is the running
/// integral of the yaw rate and drifts without bound.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

impl Attitude {
    pub const fn new(pitch: f32, roll: f32, yaw: f32) -> Self {
        Attitude { pitch, roll, yaw }
    }
}
