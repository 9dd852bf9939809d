//! Fault-aware sensor access
//!
//! Wraps the raw bus and motion source with bounded retries and decides,
//! from the shared [`CommunicationState`], whether a read goes to hardware,
//! returns a safe hold-still sample, or is synthesized locally.

use hal::{InterruptMask, MotionSource, RawMotion, RegisterBus};

use crate::irq::IrqGuard;
use crate::link::CommunicationState;
use crate::retry::{RetryBudget, RetryOutcome};
use crate::rng::Lcg;

/// Byte returned by a bus with nothing driving it high
pub const FLOATING_HIGH: u8 = 0xFF;
/// Byte returned by a bus held low
pub const FLOATING_LOW: u8 = 0x00;

/// Raw accelerometer count for 1 g at the ±2 g range
pub const ONE_G_COUNTS: i16 = 16384;

/// Thresholds and budgets for the degraded-mode ladder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultPolicy {
    /// Retry budget for a single register read; see
    /// [`RetryBudget::worst_case_attempts`] for the real cap
    pub register_retry: RetryBudget,
    /// Retry budget for one motion burst read; see
    /// [`RetryBudget::worst_case_attempts`] for the real cap
    pub motion_retry: RetryBudget,
    /// Register reads stop touching the bus above this many consecutive errors
    pub register_short_circuit_after: u32,
    /// Motion reads are synthesized above this many consecutive errors
    pub simulate_after: u32,
    /// A down link serves the neutral sample above this many cumulative errors
    pub neutral_after_errors: u32,
    /// Accelerometer Z count for a level, stationary sensor
    pub one_g_counts: i16,
    /// Temperature reported by degraded reads
    pub nominal_temperature: f32,
    /// Seed of the synthetic data generator
    pub seed: u32,
}

impl Default for FaultPolicy {
    fn default() -> Self {
        Self {
            register_retry: RetryBudget::new(1000, 100),
            motion_retry: RetryBudget::new(500, 100),
            register_short_circuit_after: 3,
            simulate_after: 5,
            neutral_after_errors: 3,
            one_g_counts: ONE_G_COUNTS,
            nominal_temperature: 25.0,
            seed: 1,
        }
    }
}

/// Why a register read produced no data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFault {
    /// Too many consecutive errors; the bus was not touched
    ShortCircuited,
    /// Every attempt returned a floating-bus byte
    Exhausted { attempts: u32 },
}

impl RegisterFault {
    /// The byte the firmware has always handed back on failure
    pub const SENTINEL: u8 = FLOATING_HIGH;
}

/// Where a motion sample came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionRead {
    /// A real transaction returned non-zero data
    Genuine(RawMotion),
    /// Locally generated noise around level; hardware is considered gone
    Synthetic(RawMotion),
    /// Fixed level, stationary reading while the link is suspect
    Neutral(RawMotion),
    /// Hardware was tried and only ever returned zeroes
    Lost(RawMotion),
}

impl MotionRead {
    pub fn sample(&self) -> RawMotion {
        match *self {
            MotionRead::Genuine(s)
            | MotionRead::Synthetic(s)
            | MotionRead::Neutral(s)
            | MotionRead::Lost(s) => s,
        }
    }

    /// Only genuine samples may feed the attitude estimate
    pub fn is_genuine(&self) -> bool {
        matches!(self, MotionRead::Genuine(_))
    }
}

/// Bounded, degradation-aware reads over the raw bus and motion source
#[derive(Debug, Clone)]
pub struct FaultAwareReader {
    policy: FaultPolicy,
    rng: Lcg,
}

impl Default for FaultAwareReader {
    fn default() -> Self {
        Self::new(FaultPolicy::default())
    }
}

impl FaultAwareReader {
    pub fn new(policy: FaultPolicy) -> Self {
        Self {
            rng: Lcg::new(policy.seed),
            policy,
        }
    }

    pub fn policy(&self) -> &FaultPolicy {
        &self.policy
    }

    /// Read one register, giving up without bus traffic once the link has
    /// failed too many times in a row.
    ///
    /// On failure callers that need a byte should use [`RegisterFault::SENTINEL`].
    pub fn read_register<B: RegisterBus>(
        &self,
        link: &mut CommunicationState,
        bus: &mut B,
        address: u8,
        register: u8,
    ) -> Result<u8, RegisterFault> {
        if link.consecutive_errors > self.policy.register_short_circuit_after {
            link.engage_simulation();
            return Err(RegisterFault::ShortCircuited);
        }
        self.probe_register(link, bus, address, register)
    }

    /// Read one register regardless of the error history.
    ///
    /// Used for the identity probe, the one read allowed to bring a
    /// short-circuited link back.
    pub fn probe_register<B: RegisterBus>(
        &self,
        link: &mut CommunicationState,
        bus: &mut B,
        address: u8,
        register: u8,
    ) -> Result<u8, RegisterFault> {
        let outcome = self.policy.register_retry.run(|_| {
            let value = bus.read(address, register);
            (value != FLOATING_HIGH && value != FLOATING_LOW).then_some(value)
        });

        match outcome {
            RetryOutcome::Succeeded { value, .. } => {
                link.record_success();
                Ok(value)
            }
            RetryOutcome::Exhausted { attempts, .. } => {
                log::trace!(
                    "Register {:#04x}@{:#04x} floating after {} attempts",
                    register,
                    address,
                    attempts
                );
                link.record_register_failure();
                Err(RegisterFault::Exhausted { attempts })
            }
        }
    }

    /// Read one motion sample, degrading to neutral or synthetic data as the
    /// link gets worse. The hardware path runs with interrupts masked.
    pub fn read_motion<M: MotionSource, I: InterruptMask>(
        &mut self,
        link: &mut CommunicationState,
        source: &mut M,
        mask: &mut I,
    ) -> MotionRead {
        if link.force_simulation || link.consecutive_errors > self.policy.simulate_after {
            link.engage_simulation();
            return MotionRead::Synthetic(self.synthesize());
        }

        if !link.communication_ok && link.error_count > self.policy.neutral_after_errors {
            link.record_degraded_read();
            return MotionRead::Neutral(self.neutral());
        }

        let mut last = RawMotion::default();
        let outcome = {
            let _irq = IrqGuard::new(mask);
            self.policy.motion_retry.run(|_| {
                last = source.read_motion();
                (!last.is_all_zero()).then_some(last)
            })
        };

        match outcome {
            RetryOutcome::Succeeded { value, .. } => {
                link.record_motion_success();
                MotionRead::Genuine(value)
            }
            RetryOutcome::Exhausted { attempts, .. } => {
                log::trace!("Motion read returned zeroes for {} attempts", attempts);
                link.record_motion_failure();
                MotionRead::Lost(last)
            }
        }
    }

    /// Level and still: no rotation, gravity on Z
    pub fn neutral(&self) -> RawMotion {
        RawMotion {
            gyro: [0; 3],
            accel: [0, 0, self.policy.one_g_counts],
            temperature: self.policy.nominal_temperature,
        }
    }

    /// Small random rotation and tilt around level, with jittered temperature
    pub fn synthesize(&mut self) -> RawMotion {
        let mut sample = RawMotion::default();
        for axis in 0..3 {
            sample.gyro[axis] = self.rng.centered(200, 100) as i16;
            sample.accel[axis] = if axis == 2 {
                self.policy.one_g_counts
            } else {
                self.rng.centered(1000, 500) as i16
            };
        }
        sample.temperature = self.policy.nominal_temperature + self.rng.centered(10, 5) as f32;
        sample
    }
}
