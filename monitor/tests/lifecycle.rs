use driver::UpdateOutcome;
use hal::mock::{MockBus, MockMotion, NoDelay, RecordingDisplay, SpyMask};
use hal::RawMotion;
use monitor::{Board, Mode, Monitor, MonitorConfig, Resources, Tick};

struct BenchBoard {
    bus: MockBus,
    motion: MockMotion,
}

impl Board for BenchBoard {
    type Bus = MockBus;
    type Motion = MockMotion;
    type Mask = SpyMask;
    type Display = RecordingDisplay;
    type Delay = NoDelay;

    fn name(&self) -> &str {
        "bench"
    }

    fn split_resources(self) -> Resources<Self> {
        Resources {
            bus: self.bus,
            motion: self.motion,
            mask: SpyMask::default(),
            display: RecordingDisplay::default(),
            delay: NoDelay::default(),
        }
    }
}

fn start(bus: MockBus, motion: MockMotion) -> Monitor<BenchBoard> {
    let mut config = MonitorConfig::default();
    config.driver.sample_spacing_spins = 0;
    let mut monitor = Monitor::new_with_config(BenchBoard { bus, motion }, config);
    monitor.start().unwrap();
    monitor
}

fn tilted() -> RawMotion {
    // 30 degrees of pitch: ay = sin(30) g, az = cos(30) g
    RawMotion {
        gyro: [3, -2, 1],
        accel: [0, 8192, 14189],
        temperature: 31.0,
    }
}

#[test]
fn sensor_dropout_degrades_to_synthetic_without_stopping_the_loop() {
    let motion = MockMotion::constant(RawMotion::default()).with_samples(&[tilted(); 8]);
    let mut monitor = start(MockBus::constant(0x47), motion);
    assert_eq!(monitor.mode(), Mode::Live);

    for _ in 0..3 {
        assert!(matches!(
            monitor.tick(0.01),
            Tick::Live(UpdateOutcome::Fused(_))
        ));
    }
    assert_eq!(monitor.display().text_at(60, 0), Some("ICM-OK"));

    // The sensor now returns zeroes: six lost reads, each with a full retry budget
    for _ in 0..6 {
        assert_eq!(monitor.tick(0.01), Tick::Live(UpdateOutcome::Held));
    }
    assert_eq!(monitor.display().text_at(60, 0), Some("ICM-ERR"));
    assert_eq!(monitor.display().number_at(100, 0), Some(0.0));
    let reads = monitor.driver().motion().reads();
    assert_eq!(reads, 5 + 3 + 6 * 101);

    // From here on the data is synthetic and the sensor is left alone
    let held = monitor.handle().attitude;
    for _ in 0..10 {
        assert_eq!(monitor.tick(0.01), Tick::Live(UpdateOutcome::Held));
    }
    assert_eq!(monitor.driver().motion().reads(), reads);
    assert!(monitor.driver().link().force_simulation());
    assert_eq!(monitor.handle().attitude, held);
    assert_eq!(monitor.display().number_at(0, 0), Some(18.0));
}

#[test]
fn link_stays_in_error_after_a_single_lost_read() {
    let mut script = vec![tilted(); 8];
    script.extend(std::iter::repeat(RawMotion::default()).take(101));
    let motion = MockMotion::constant(tilted()).with_samples(&script);
    let mut monitor = start(MockBus::constant(0x47), motion);

    for _ in 0..3 {
        assert!(matches!(monitor.tick(0.01), Tick::Live(UpdateOutcome::Fused(_))));
    }
    assert_eq!(monitor.tick(0.01), Tick::Live(UpdateOutcome::Held));
    assert_eq!(monitor.display().text_at(60, 0), Some("ICM-ERR"));

    // Real data flows again but nothing has re-read a register yet
    assert!(matches!(monitor.tick(0.01), Tick::Live(UpdateOutcome::Fused(_))));
    assert_eq!(monitor.display().text_at(60, 0), Some("ICM-ERR"));
    assert_eq!(monitor.driver().link().consecutive_errors(), 0);
}

#[test]
fn missing_sensor_animates_forever() {
    let mut monitor = start(MockBus::constant(0x00), MockMotion::dead());
    assert_eq!(monitor.mode(), Mode::Simulation);
    assert_eq!(monitor.driver().motion().inits(), 0);

    let mut last_counter = None;
    for _ in 0..50 {
        match monitor.tick(0.01) {
            Tick::Simulated(frame) => {
                assert_eq!(frame.counter, last_counter.map_or(0, |c| c + 1));
                last_counter = Some(frame.counter);
            }
            other => panic!("expected a simulated frame, got {:?}", other),
        }
    }
    assert_eq!(monitor.display().text_at(60, 0), Some("SIM MODE"));
    assert_eq!(monitor.driver().motion().reads(), 0);
}

#[test]
fn startup_screens_appear_in_order() {
    let motion = MockMotion::constant(tilted());
    let monitor = start(MockBus::constant(0x47), motion);
    let display = monitor.display();

    let order = [
        "Hardware Test",
        "Device ID:",
        "Quick Init...",
        "Fast Calibration",
        "Sampling...",
        "Cal Complete!",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|text| {
            display
                .calls()
                .iter()
                .position(|call| {
                    matches!(call, hal::mock::DrawCall::Text { text: t, .. } if t == text)
                })
                .unwrap_or_else(|| panic!("{} never drawn", text))
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}
