use ahrs::Attitude;
use num_traits::Float;

const PHASE_STEP: f32 = 0.1;
const YAW_STEP: f32 = 0.1;
const NOMINAL_TEMPERATURE: f32 = 25.0;

/// One frame of the simulated readout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedFrame {
    pub counter: u32,
    pub temperature: f32,
    pub attitude: Attitude,
}

/// Animated stand-in for a missing sensor.
///
/// Never touches the driver; the motion is a pure function of the frame
/// count.
#[derive(Debug, Default, Clone)]
pub struct SimulationRenderer {
    phase: f32,
    yaw: f32,
    frames: u32,
}

impl SimulationRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn advance(&mut self) -> SimulatedFrame {
        self.phase += PHASE_STEP;

        self.yaw += YAW_STEP;
        if self.yaw > 180.0 {
            self.yaw -= 360.0;
        }

        let frame = SimulatedFrame {
            counter: self.frames,
            temperature: NOMINAL_TEMPERATURE + 3.0 * (self.phase * 0.1).sin(),
            attitude: Attitude::new(
                10.0 * (self.phase * 0.5).sin(),
                8.0 * (self.phase * 0.7).cos(),
                self.yaw,
            ),
        };
        self.frames = self.frames.wrapping_add(1);
        frame
    }
}
