use hal::CriticalSectionMask;
use monitor::{Board, Resources};

use crate::sensor::{Scenario, SimBus, SimImu};
use crate::terminal::{HostDelay, TerminalDisplay};

pub struct SitlBoard {
    scenario: Scenario,
    seed: u64,
    fail_after: u32,
    sample_period: f32,
    realtime: bool,
}

impl SitlBoard {
    pub fn new(
        scenario: Scenario,
        seed: u64,
        fail_after: u32,
        sample_period: f32,
        realtime: bool,
    ) -> Self {
        SitlBoard {
            scenario,
            seed,
            fail_after,
            sample_period,
            realtime,
        }
    }
}

impl Board for SitlBoard {
    type Bus = SimBus;
    type Motion = SimImu;
    type Mask = CriticalSectionMask;
    type Display = TerminalDisplay;
    type Delay = HostDelay;

    fn name(&self) -> &str {
        "SITL"
    }

    fn split_resources(self) -> Resources<Self> {
        Resources {
            bus: SimBus::new(self.scenario, self.seed),
            motion: SimImu::new(self.scenario, self.seed, self.fail_after, self.sample_period),
            mask: CriticalSectionMask,
            display: TerminalDisplay::default(),
            delay: HostDelay::new(self.realtime),
        }
    }
}
