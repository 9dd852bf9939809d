/// Platform primitives: interrupt masking and busy-wait delays

/// Global interrupt masking.
///
/// `disable` returns whatever is needed to put the interrupt state back the
/// way it was, which lets masked regions nest.
pub trait InterruptMask {
    type State: Copy;

    /// Mask interrupts and return the previous state
    fn disable(&mut self) -> Self::State;

    /// Restore a state previously returned by `disable`
    fn restore(&mut self, state: Self::State);
}

/// Interrupt masking backed by the `critical-section` implementation linked
/// into the final binary (cortex-m, riscv, or the host `std` mutex).
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticalSectionMask;

impl InterruptMask for CriticalSectionMask {
    type State = critical_section::RestoreState;

    fn disable(&mut self) -> Self::State {
        // SAFETY: every acquire is paired with a release by the driver's guard
        unsafe { critical_section::acquire() }
    }

    fn restore(&mut self, state: Self::State) {
        // SAFETY: `state` came from the matching `acquire` above
        unsafe { critical_section::release(state) }
    }
}

/// Cycle-counted busy-wait delay
pub trait Delay {
    /// Core clock frequency in Hz
    fn cpu_clock_hz(&self) -> u32;

    /// Spin for roughly `cycles` core clock cycles
    fn delay_cycles(&mut self, cycles: u32);

    /// Spin for `ms` milliseconds
    fn delay_ms(&mut self, ms: u16) {
        let per_ms = self.cpu_clock_hz() / 1000;
        for _ in 0..ms {
            self.delay_cycles(per_ms);
        }
    }
}
