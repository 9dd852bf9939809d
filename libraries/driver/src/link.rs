//! Bus communication health
//!
//! One `CommunicationState` is owned by the control loop and lent to every
//! reader and controller call. It is the only state that survives between
//! calls, so all degradation decisions are made from it.

/// Error counters and degradation flags for the sensor link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunicationState {
    pub(crate) communication_ok: bool,
    pub(crate) error_count: u32,
    pub(crate) consecutive_errors: u32,
    pub(crate) force_simulation: bool,
}

/// What the display shows about the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkHealth {
    pub communication_ok: bool,
    pub error_count: u32,
}

impl Default for CommunicationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunicationState {
    /// Healthy link, no errors recorded
    pub const fn new() -> Self {
        Self {
            communication_ok: true,
            error_count: 0,
            consecutive_errors: 0,
            force_simulation: false,
        }
    }

    pub fn communication_ok(&self) -> bool {
        self.communication_ok
    }

    /// Failed register transactions since start or the last good probe
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    pub fn force_simulation(&self) -> bool {
        self.force_simulation
    }

    pub fn health(&self) -> LinkHealth {
        LinkHealth {
            communication_ok: self.communication_ok,
            error_count: self.error_count,
        }
    }

    /// A transaction returned real data
    pub(crate) fn record_success(&mut self) {
        if !self.communication_ok {
            log::info!("Sensor link recovered after {} errors", self.consecutive_errors);
        }
        self.communication_ok = true;
        self.consecutive_errors = 0;
    }

    /// A motion burst returned real data. Only a register read marks the
    /// link up again.
    pub(crate) fn record_motion_success(&mut self) {
        self.consecutive_errors = 0;
    }

    /// A motion read produced nothing but keeps the cumulative count as is
    pub(crate) fn record_motion_failure(&mut self) {
        self.mark_down();
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }

    /// A register read exhausted its retry budget
    pub(crate) fn record_register_failure(&mut self) {
        self.mark_down();
        self.error_count = self.error_count.saturating_add(1);
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }

    /// A degraded read was served instead of a real one
    pub(crate) fn record_degraded_read(&mut self) {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }

    /// Stop talking to the bus until a probe succeeds
    pub(crate) fn engage_simulation(&mut self) {
        if !self.force_simulation {
            log::warn!(
                "Forcing simulated sensor data ({} consecutive errors)",
                self.consecutive_errors
            );
        }
        self.force_simulation = true;
    }

    /// Hardware init gave up: simulate and pin the counter high
    pub(crate) fn fail_hardware(&mut self, consecutive_errors: u32) {
        self.engage_simulation();
        self.consecutive_errors = consecutive_errors;
    }

    /// The identity check did not match
    pub(crate) fn mark_absent(&mut self) {
        self.communication_ok = false;
        self.engage_simulation();
    }

    /// The identity check matched: forget every past failure
    pub(crate) fn reset_after_probe(&mut self) {
        if self.force_simulation {
            log::info!("Sensor confirmed present, leaving simulation");
        }
        *self = Self::new();
    }

    fn mark_down(&mut self) {
        if self.communication_ok {
            log::warn!("Sensor link lost");
        }
        self.communication_ok = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_clears_consecutive_only() {
        let mut link = CommunicationState::new();
        link.record_register_failure();
        link.record_register_failure();
        link.record_success();
        assert!(link.communication_ok());
        assert_eq!(link.consecutive_errors(), 0);
        assert_eq!(link.error_count(), 2);
    }

    #[test]
    fn test_motion_success_keeps_link_down() {
        let mut link = CommunicationState::new();
        link.record_motion_failure();
        link.record_motion_success();
        assert!(!link.communication_ok());
        assert_eq!(link.consecutive_errors(), 0);
    }

    #[test]
    fn test_motion_failure_leaves_cumulative_count() {
        let mut link = CommunicationState::new();
        link.record_motion_failure();
        assert!(!link.communication_ok());
        assert_eq!(link.consecutive_errors(), 1);
        assert_eq!(link.error_count(), 0);
    }

    #[test]
    fn test_simulation_survives_success() {
        let mut link = CommunicationState::new();
        link.engage_simulation();
        link.record_success();
        assert!(link.force_simulation());
        link.reset_after_probe();
        assert_eq!(link, CommunicationState::new());
    }

    #[test]
    fn test_health_snapshot() {
        let mut link = CommunicationState::new();
        link.record_register_failure();
        assert_eq!(
            link.health(),
            LinkHealth {
                communication_ok: false,
                error_count: 1
            }
        );
    }
}
