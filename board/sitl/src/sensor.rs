use std::f32::consts::PI;

use clap::ValueEnum;
use driver::{ICM42688_I2C_ADDR, ICM42688_WHO_AM_I_REG, ICM42688_WHO_AM_I_VALUE};
use hal::{MotionSource, RawMotion, RegisterBus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ONE_G: f32 = 16384.0;
const COUNTS_PER_DPS: f32 = 16.4;
const GYRO_BIAS: [i16; 3] = [12, -7, 3];
const ROCK_AMPLITUDE_DEG: f32 = 20.0;
const ROCK_PERIOD_S: f32 = 8.0;
// Fraction of transactions a flaky sensor drops
const FLAKY_DROP_RATE: f64 = 0.3;
// Idle bus line
const FLOATING: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Sensor present and answering every transaction
    Healthy,
    /// Nothing on the bus
    Absent,
    /// Sensor present but dropping a share of transactions
    Flaky,
    /// Sensor works, then stops answering after `--fail-after` samples
    DeadAfter,
}

/// Register side of the simulated sensor
pub struct SimBus {
    scenario: Scenario,
    rng: StdRng,
}

impl SimBus {
    pub fn new(scenario: Scenario, seed: u64) -> Self {
        Self {
            scenario,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RegisterBus for SimBus {
    fn write(&mut self, address: u8, register: u8, value: u8) {
        log::trace!("bus write {:#04x}:{:#04x} <- {:#04x}", address, register, value);
    }

    fn read(&mut self, address: u8, register: u8) -> u8 {
        let answers = match self.scenario {
            Scenario::Absent => false,
            Scenario::Flaky => !self.rng.gen_bool(FLAKY_DROP_RATE),
            Scenario::Healthy | Scenario::DeadAfter => true,
        };
        if !answers || address != ICM42688_I2C_ADDR {
            return FLOATING;
        }
        match register {
            ICM42688_WHO_AM_I_REG => ICM42688_WHO_AM_I_VALUE,
            _ => 0,
        }
    }
}

/// Motion side of the simulated sensor: the board rocks about the pitch axis
pub struct SimImu {
    scenario: Scenario,
    rng: StdRng,
    fail_after: u32,
    sample_period: f32,
    samples: u32,
}

impl SimImu {
    pub fn new(scenario: Scenario, seed: u64, fail_after: u32, sample_period: f32) -> Self {
        Self {
            scenario,
            rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
            fail_after,
            sample_period,
            samples: 0,
        }
    }

    fn answers(&mut self) -> bool {
        match self.scenario {
            Scenario::Healthy => true,
            Scenario::Absent => false,
            Scenario::Flaky => !self.rng.gen_bool(FLAKY_DROP_RATE),
            Scenario::DeadAfter => self.samples < self.fail_after,
        }
    }

    fn noise(&mut self, span: i16) -> i16 {
        self.rng.gen_range(-span..=span)
    }

    fn sample(&mut self) -> RawMotion {
        let t = self.samples as f32 * self.sample_period;
        let omega = 2.0 * PI / ROCK_PERIOD_S;
        let pitch = (ROCK_AMPLITUDE_DEG * (omega * t).sin()).to_radians();
        let pitch_rate = ROCK_AMPLITUDE_DEG * omega * (omega * t).cos();

        let mut gyro = GYRO_BIAS;
        gyro[1] = gyro[1].saturating_add((pitch_rate * COUNTS_PER_DPS) as i16);
        for axis in gyro.iter_mut() {
            *axis = axis.saturating_add(self.noise(4));
        }

        let accel = [
            self.noise(40),
            (ONE_G * pitch.sin()) as i16 + self.noise(40),
            (ONE_G * pitch.cos()) as i16 + self.noise(40),
        ];

        RawMotion {
            gyro,
            accel,
            temperature: 27.5 + self.rng.gen_range(-0.2..0.2),
        }
    }
}

impl MotionSource for SimImu {
    fn initialize(&mut self) -> bool {
        self.answers()
    }

    fn read_motion(&mut self) -> RawMotion {
        if !self.answers() {
            return RawMotion::default();
        }
        let sample = self.sample();
        self.samples += 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_bus_floats() {
        let mut bus = SimBus::new(Scenario::Absent, 1);
        assert_eq!(bus.read(ICM42688_I2C_ADDR, ICM42688_WHO_AM_I_REG), FLOATING);
    }

    #[test]
    fn test_healthy_bus_identifies() {
        let mut bus = SimBus::new(Scenario::Healthy, 1);
        assert_eq!(
            bus.read(ICM42688_I2C_ADDR, ICM42688_WHO_AM_I_REG),
            ICM42688_WHO_AM_I_VALUE
        );
        assert_eq!(bus.read(0x69, ICM42688_WHO_AM_I_REG), FLOATING);
    }

    #[test]
    fn test_healthy_imu_starts_level_with_bias() {
        let mut imu = SimImu::new(Scenario::Healthy, 7, 0, 0.01);
        assert!(imu.initialize());
        let sample = imu.read_motion();
        assert!(!sample.is_all_zero());
        assert!((sample.accel[2] - 16384).abs() <= 40);
        assert!((sample.gyro[0] - 12).abs() <= 4);
    }

    #[test]
    fn test_dead_after_stops_answering() {
        let mut imu = SimImu::new(Scenario::DeadAfter, 7, 3, 0.01);
        for _ in 0..3 {
            assert!(!imu.read_motion().is_all_zero());
        }
        assert!(imu.read_motion().is_all_zero());
        assert!(!imu.initialize());
    }

    #[test]
    fn test_seed_makes_runs_repeatable() {
        let mut a = SimImu::new(Scenario::Flaky, 42, 0, 0.01);
        let mut b = SimImu::new(Scenario::Flaky, 42, 0, 0.01);
        for _ in 0..50 {
            assert_eq!(a.read_motion(), b.read_motion());
        }
    }
}
