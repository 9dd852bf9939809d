use driver::{
    CalibrationOutcome, DeviceHandle, DriverResult, Icm42688, Icm42688Config, InitPath,
    ProbeReport, UpdateOutcome,
};
use hal::Delay;

use crate::simulation::{SimulatedFrame, SimulationRenderer};
use crate::{screen, Board, Resources};

// Cycles a status screen stays up before the next one
const SCREEN_PAUSE_CYCLES: u32 = 800_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorConfig {
    pub driver: Icm42688Config,
    /// Busy-wait after a full status screen; the shorter pauses derive from it
    pub screen_pause_cycles: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            driver: Icm42688Config::default(),
            screen_pause_cycles: SCREEN_PAUSE_CYCLES,
        }
    }
}

impl MonitorConfig {
    fn full(&self) -> u32 {
        self.screen_pause_cycles
    }

    fn half(&self) -> u32 {
        self.screen_pause_cycles / 2
    }

    fn quarter(&self) -> u32 {
        self.screen_pause_cycles / 4
    }

    fn frame(&self) -> u32 {
        self.screen_pause_cycles / 5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `start` has not run yet
    Idle,
    /// Sensor found; each tick runs the driver
    Live,
    /// Sensor missing at probe time; each tick draws an animation
    Simulation,
}

/// What `start` went through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Startup {
    pub probe: ProbeReport,
    /// `None` when the probe failed and the monitor went straight to simulation
    pub init: Option<InitPath>,
    pub calibration: Option<CalibrationOutcome>,
}

/// Result of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    NotStarted,
    Live(UpdateOutcome),
    Simulated(SimulatedFrame),
}

pub struct Monitor<B: Board> {
    driver: Icm42688<B::Bus, B::Motion, B::Mask>,
    handle: DeviceHandle,
    display: B::Display,
    delay: B::Delay,
    config: MonitorConfig,
    mode: Mode,
    counter: u32,
    renderer: SimulationRenderer,
}

impl<B: Board> Monitor<B> {
    pub fn new(board: B) -> Self {
        Self::new_with_config(board, MonitorConfig::default())
    }

    pub fn new_with_config(board: B, config: MonitorConfig) -> Self {
        log::info!("Monitor running on {}", board.name());
        let Resources {
            bus,
            motion,
            mask,
            display,
            delay,
        } = board.split_resources();

        Monitor {
            driver: Icm42688::new_with_config(bus, motion, mask, config.driver),
            handle: DeviceHandle::new(),
            display,
            delay,
            config,
            mode: Mode::Idle,
            counter: 0,
            renderer: SimulationRenderer::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn handle(&self) -> &DeviceHandle {
        &self.handle
    }

    pub fn driver(&self) -> &Icm42688<B::Bus, B::Motion, B::Mask> {
        &self.driver
    }

    pub fn display(&self) -> &B::Display {
        &self.display
    }

    pub fn delay(&self) -> &B::Delay {
        &self.delay
    }

    /// Probe, initialize and calibrate, drawing each step.
    ///
    /// A failed probe skips the rest and leaves the monitor in simulation
    /// mode for good.
    pub fn start(&mut self) -> DriverResult<Startup> {
        let probe = self.probe();
        if !probe.found {
            screen::simulation_banner(&mut self.display);
            self.pause(self.config.full());
            self.mode = Mode::Simulation;
            log::warn!("No sensor, running the simulated display");
            return Ok(Startup {
                probe,
                init: None,
                calibration: None,
            });
        }

        let init = self.initialize();
        let calibration = self.calibrate()?;
        self.mode = Mode::Live;
        Ok(Startup {
            probe,
            init: Some(init),
            calibration: Some(calibration),
        })
    }

    /// Run one loop iteration. `dt` is the time since the previous tick in
    /// seconds; simulation ignores it.
    pub fn tick(&mut self, dt: f32) -> Tick {
        match self.mode {
            Mode::Idle => Tick::NotStarted,
            Mode::Live => {
                let outcome = self.driver.update(&mut self.handle, dt);
                screen::live(
                    &mut self.display,
                    self.counter,
                    self.driver.link().health(),
                    self.handle.temperature,
                    &self.handle.attitude,
                );
                self.counter = self.counter.wrapping_add(1);
                Tick::Live(outcome)
            }
            Mode::Simulation => {
                let frame = self.renderer.advance();
                screen::simulated(
                    &mut self.display,
                    frame.counter,
                    frame.temperature,
                    &frame.attitude,
                );
                self.pause(self.config.frame());
                Tick::Simulated(frame)
            }
        }
    }

    fn probe(&mut self) -> ProbeReport {
        screen::probe_banner(&mut self.display);
        self.pause(self.config.half());

        let report = self.driver.probe();
        screen::probe_result(&mut self.display, &report);
        if report.found {
            self.pause(self.config.half());
        } else {
            self.pause(self.config.full());
        }
        report
    }

    fn initialize(&mut self) -> InitPath {
        screen::init_banner(&mut self.display);
        self.pause(self.config.half());

        let path = self.driver.initialize(&mut self.handle);
        screen::init_result(&mut self.display, &path);
        if !matches!(path, InitPath::Hardware { .. }) {
            self.pause(self.config.half());
        }
        path
    }

    fn calibrate(&mut self) -> DriverResult<CalibrationOutcome> {
        screen::calibration_banner(&mut self.display);

        let outcome = if self.driver.simulation_gated() {
            self.driver.calibrate(&mut self.handle, None)?
        } else {
            screen::calibration_notice(&mut self.display);
            self.pause(self.config.quarter());
            screen::sampling(&mut self.display);

            let display = &mut self.display;
            let mut progress = |percent: u8| screen::calibration_progress(display, percent);
            self.driver.calibrate(&mut self.handle, Some(&mut progress))?
        };

        screen::calibration_result(&mut self.display, &outcome);
        self.pause(self.config.half());
        Ok(outcome)
    }

    fn pause(&mut self, cycles: u32) {
        self.delay.delay_cycles(cycles);
    }
}
