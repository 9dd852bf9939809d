//! ICM-42688 6-axis IMU driver
//!
//! Owns the driver lifecycle: identity probe, hardware initialization,
//! static calibration and the per-cycle attitude update. Every step keeps
//! going when the bus misbehaves; it degrades to simulated or default data
//! instead of failing, so the control loop runs the same way with or without
//! a working sensor.

use ahrs::{ComplementaryConfig, ComplementaryFilter};
use hal::{InterruptMask, MotionSource, RegisterBus};

use super::calibration::{
    CalibrationAccumulator, CalibrationOutcome, CalibrationSource, DefaultReason, Offsets,
};
use super::handle::DeviceHandle;
use crate::error::{DriverError, DriverResult};
use crate::link::CommunicationState;
use crate::reader::{FaultAwareReader, FaultPolicy, RegisterFault};
use crate::retry::{RetryBudget, RetryOutcome};

// I2C address with AP_AD0 tied low
pub const ICM42688_I2C_ADDR: u8 = 0x68;

// Identity register and its expected content
pub const ICM42688_WHO_AM_I_REG: u8 = 0x75;
pub const ICM42688_WHO_AM_I_VALUE: u8 = 0x47;

/// Configuration for the ICM-42688 driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icm42688Config {
    /// I2C address of the device
    pub i2c_addr: u8,

    /// Read retry budgets and degradation thresholds
    pub fault: FaultPolicy,

    /// Retry budget for the hardware init sequence
    pub init_retry: RetryBudget,

    /// Init and calibration skip the hardware above this many consecutive errors
    pub simulation_gate: u32,

    /// Consecutive-error count pinned after a failed hardware init
    pub init_failure_errors: u32,

    /// Samples averaged per calibration pass
    pub calibration_samples: u32,

    /// Calibration stops early above this many consecutive errors
    pub calibration_abort_after: u32,

    /// Busy-spin iterations between calibration samples
    pub sample_spacing_spins: u32,

    /// Attitude filter tuning
    pub filter: ComplementaryConfig,
}

impl Default for Icm42688Config {
    fn default() -> Self {
        Self {
            i2c_addr: ICM42688_I2C_ADDR,
            fault: FaultPolicy::default(),
            init_retry: RetryBudget::new(1000, 200),
            simulation_gate: 3,
            init_failure_errors: 10,
            calibration_samples: 5,
            calibration_abort_after: 2,
            sample_spacing_spins: 5000,
            filter: ComplementaryConfig::default(),
        }
    }
}

/// Result of the identity probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub found: bool,
    /// Byte read from the identity register, or the failure sentinel
    pub device_id: u8,
}

/// Which initialization path was taken. Every path leaves the handle
/// initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPath {
    /// The chip acknowledged its configuration
    Hardware { attempts: u32 },
    /// The link was already degraded; hardware was not touched
    SkippedSimulation,
    /// The chip never acknowledged; simulation is now forced
    FallbackToSimulation { attempts: u32, aborted_early: bool },
}

/// What one update cycle did to the attitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// A genuine sample was fused
    Fused(ahrs::Attitude),
    /// No genuine sample; the last attitude is kept
    Held,
    /// The handle was never initialized; nothing happened
    NotInitialized,
}

/// ICM-42688 driver over a register bus, a motion source and an
/// interrupt mask.
pub struct Icm42688<B, M, I> {
    bus: B,
    motion: M,
    mask: I,
    link: CommunicationState,
    reader: FaultAwareReader,
    filter: ComplementaryFilter,
    config: Icm42688Config,
}

impl<B, M, I> Icm42688<B, M, I>
where
    B: RegisterBus,
    M: MotionSource,
    I: InterruptMask,
{
    /// Create a driver with the default configuration
    pub fn new(bus: B, motion: M, mask: I) -> Self {
        Self::new_with_config(bus, motion, mask, Icm42688Config::default())
    }

    /// Create a driver with custom configuration
    pub fn new_with_config(bus: B, motion: M, mask: I, config: Icm42688Config) -> Self {
        Self {
            bus,
            motion,
            mask,
            link: CommunicationState::new(),
            reader: FaultAwareReader::new(config.fault),
            filter: ComplementaryFilter::new(config.filter),
            config,
        }
    }

    pub fn config(&self) -> &Icm42688Config {
        &self.config
    }

    /// Current link health
    pub fn link(&self) -> &CommunicationState {
        &self.link
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    pub fn mask(&self) -> &I {
        &self.mask
    }

    /// Give the peripherals back
    pub fn release(self) -> (B, M, I) {
        (self.bus, self.motion, self.mask)
    }

    /// Check the identity register.
    ///
    /// A match clears every error counter and leaves forced simulation; this
    /// is the only way out of it. A mismatch forces simulation.
    pub fn probe(&mut self) -> ProbeReport {
        let device_id = self
            .reader
            .probe_register(
                &mut self.link,
                &mut self.bus,
                self.config.i2c_addr,
                ICM42688_WHO_AM_I_REG,
            )
            .unwrap_or(RegisterFault::SENTINEL);

        if device_id == ICM42688_WHO_AM_I_VALUE {
            log::info!("ICM-42688 detected (WHO_AM_I: {:#x})", device_id);
            self.link.reset_after_probe();
            ProbeReport {
                found: true,
                device_id,
            }
        } else {
            log::warn!(
                "ICM-42688 WHO_AM_I mismatch: expected {:#x}, got {:#x}",
                ICM42688_WHO_AM_I_VALUE,
                device_id
            );
            self.link.mark_absent();
            ProbeReport {
                found: false,
                device_id,
            }
        }
    }

    /// Zero the handle and bring the chip up.
    ///
    /// Always leaves the handle initialized, in hardware or simulation mode.
    pub fn initialize(&mut self, handle: &mut DeviceHandle) -> InitPath {
        *handle = DeviceHandle::default();

        let path = if self.simulation_gated() {
            log::info!("Skipping hardware init, sensor is simulated");
            InitPath::SkippedSimulation
        } else {
            let motion = &mut self.motion;
            match self.config.init_retry.run(|_| motion.initialize().then_some(())) {
                RetryOutcome::Succeeded { attempts, .. } => {
                    log::info!("ICM-42688 initialized after {} attempt(s)", attempts);
                    InitPath::Hardware { attempts }
                }
                RetryOutcome::Exhausted {
                    attempts,
                    aborted_early,
                } => {
                    log::warn!("ICM-42688 init failed after {} attempts, simulating", attempts);
                    self.link.fail_hardware(self.config.init_failure_errors);
                    InitPath::FallbackToSimulation {
                        attempts,
                        aborted_early,
                    }
                }
            }
        };

        handle.is_initialized = true;
        path
    }

    /// Average a few stationary samples into gyro and accelerometer offsets.
    ///
    /// `progress` is called after every sample with the percentage done.
    /// Fails only for an uninitialized handle; without usable data the level
    /// defaults are applied and reported through the outcome.
    pub fn calibrate(
        &mut self,
        handle: &mut DeviceHandle,
        mut progress: Option<&mut dyn FnMut(u8)>,
    ) -> DriverResult<CalibrationOutcome> {
        if !handle.is_initialized {
            return Err(DriverError::NotInitialized);
        }

        let one_g = self.config.fault.one_g_counts;
        if self.simulation_gated() {
            return Ok(self.apply_defaults(handle, DefaultReason::SimulationGate));
        }

        let total = self.config.calibration_samples;
        let mut accumulator = CalibrationAccumulator::new();
        for i in 0..total {
            let read = self
                .reader
                .read_motion(&mut self.link, &mut self.motion, &mut self.mask);
            let sample = read.sample();
            handle.store_raw(&sample);
            if read.is_genuine() {
                accumulator.add(&sample);
            }

            if let Some(callback) = progress.as_deref_mut() {
                callback(((i + 1) * 100 / total) as u8);
            }

            for _ in 0..self.config.sample_spacing_spins {
                core::hint::spin_loop();
            }

            if self.link.consecutive_errors > self.config.calibration_abort_after {
                log::debug!("Calibration stopped after {} samples", i + 1);
                break;
            }
        }

        match accumulator.offsets(one_g) {
            Some(offsets) => {
                let samples = accumulator.samples();
                log::info!("Calibration complete from {} samples", samples);
                handle.apply_offsets(&offsets);
                Ok(CalibrationOutcome {
                    source: CalibrationSource::FromSamples { samples },
                    offsets,
                })
            }
            None => Ok(self.apply_defaults(handle, DefaultReason::NoValidSamples)),
        }
    }

    /// Read one sample and, if it is genuine, fuse it into the attitude.
    pub fn update(&mut self, handle: &mut DeviceHandle, dt: f32) -> UpdateOutcome {
        if !handle.is_initialized {
            return UpdateOutcome::NotInitialized;
        }

        let read = self
            .reader
            .read_motion(&mut self.link, &mut self.motion, &mut self.mask);
        let sample = read.sample();
        handle.store_raw(&sample);
        if !read.is_genuine() {
            return UpdateOutcome::Held;
        }

        let corrected = self.filter.correct(
            sample.gyro_vector(),
            sample.accel_vector(),
            &handle.gyro_offset,
            &handle.accel_offset,
        );
        handle.attitude = self.filter.fuse(handle.attitude, &corrected, dt);
        UpdateOutcome::Fused(handle.attitude)
    }

    /// True when init and calibration will skip the hardware
    pub fn simulation_gated(&self) -> bool {
        self.link.force_simulation || self.link.consecutive_errors > self.config.simulation_gate
    }

    fn apply_defaults(&self, handle: &mut DeviceHandle, reason: DefaultReason) -> CalibrationOutcome {
        log::info!("Using default calibration ({:?})", reason);
        let offsets = Offsets::level(self.config.fault.one_g_counts);
        handle.apply_offsets(&offsets);
        CalibrationOutcome {
            source: CalibrationSource::Defaults(reason),
            offsets,
        }
    }
}
