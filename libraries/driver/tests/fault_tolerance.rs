//! End-to-end driver scenarios against mock hardware

use driver::{
    CalibrationSource, CommunicationState, DefaultReason, DeviceHandle, FaultAwareReader,
    Icm42688, Icm42688Config, InitPath, MotionRead, RegisterFault, UpdateOutcome,
    ICM42688_WHO_AM_I_VALUE,
};
use hal::mock::{MockBus, MockMotion, SpyMask};
use hal::RawMotion;

fn fast_config() -> Icm42688Config {
    Icm42688Config {
        sample_spacing_spins: 0,
        ..Icm42688Config::default()
    }
}

fn tilted_sample(pitch_deg: f32) -> RawMotion {
    let rad = pitch_deg.to_radians();
    RawMotion {
        gyro: [3, -2, 1],
        accel: [0, (16384.0 * rad.sin()) as i16, (16384.0 * rad.cos()) as i16],
        temperature: 28.5,
    }
}

#[test]
fn healthy_sensor_full_lifecycle() {
    let level = RawMotion {
        gyro: [3, -2, 1],
        accel: [0, 0, 16384],
        temperature: 28.5,
    };
    let mut driver = Icm42688::new_with_config(
        MockBus::constant(ICM42688_WHO_AM_I_VALUE),
        MockMotion::constant(level),
        SpyMask::default(),
        fast_config(),
    );
    let mut handle = DeviceHandle::new();

    assert!(driver.probe().found);
    assert_eq!(driver.initialize(&mut handle), InitPath::Hardware { attempts: 1 });
    let outcome = driver.calibrate(&mut handle, None).unwrap();
    assert_eq!(outcome.source, CalibrationSource::FromSamples { samples: 5 });

    driver.motion_mut().set_fallback(tilted_sample(30.0));
    for _ in 0..500 {
        assert!(matches!(driver.update(&mut handle, 0.01), UpdateOutcome::Fused(_)));
    }
    assert!(
        (handle.attitude.pitch - 30.0).abs() < 0.5,
        "Expected pitch to converge near 30, got {}",
        handle.attitude.pitch
    );
    assert!(handle.attitude.roll.abs() < 0.5);
    // Gyro bias fully removed: no yaw drift
    assert!(handle.attitude.yaw.abs() < 1e-3);
    assert!(driver.link().communication_ok());
    assert!(!driver.mask().is_masked());
}

#[test]
fn six_failed_reads_engage_simulation_until_probe() {
    let mut driver = Icm42688::new_with_config(
        MockBus::constant(ICM42688_WHO_AM_I_VALUE),
        MockMotion::constant(tilted_sample(10.0)),
        SpyMask::default(),
        fast_config(),
    );
    let mut handle = DeviceHandle::new();
    driver.initialize(&mut handle);
    driver.calibrate(&mut handle, None).unwrap();
    let attitude_before = handle.attitude;

    driver.motion_mut().set_fallback(RawMotion::default());
    for _ in 0..6 {
        assert_eq!(driver.update(&mut handle, 0.01), UpdateOutcome::Held);
    }
    assert_eq!(driver.link().consecutive_errors(), 6);

    let reads = driver.motion().reads();
    let bus_reads = driver.bus().reads();
    for _ in 0..20 {
        assert_eq!(driver.update(&mut handle, 0.01), UpdateOutcome::Held);
        assert_eq!(handle.raw_accel[2], 16384, "synthetic data sits at one gravity");
    }
    assert_eq!(driver.motion().reads(), reads, "motion source touched while simulating");
    assert_eq!(driver.bus().reads(), bus_reads);
    assert!(driver.link().force_simulation());
    assert_eq!(handle.attitude, attitude_before);

    assert!(driver.probe().found);
    assert_eq!(*driver.link(), CommunicationState::new());
    driver.motion_mut().set_fallback(tilted_sample(10.0));
    assert!(matches!(driver.update(&mut handle, 0.01), UpdateOutcome::Fused(_)));
}

#[test]
fn absent_sensor_runs_on_synthetic_data() {
    let mut driver = Icm42688::new_with_config(
        MockBus::floating(),
        MockMotion::dead(),
        SpyMask::default(),
        fast_config(),
    );
    let mut handle = DeviceHandle::new();

    let report = driver.probe();
    assert!(!report.found);
    assert_eq!(report.device_id, RegisterFault::SENTINEL);
    assert_eq!(driver.initialize(&mut handle), InitPath::SkippedSimulation);

    let outcome = driver.calibrate(&mut handle, None).unwrap();
    assert_eq!(outcome.source, CalibrationSource::Defaults(DefaultReason::SimulationGate));

    for _ in 0..50 {
        assert_eq!(driver.update(&mut handle, 0.02), UpdateOutcome::Held);
        assert!((20.0..30.0).contains(&handle.temperature));
    }
    assert_eq!(driver.motion().reads(), 0);
    assert_eq!(driver.motion().inits(), 0);
    assert_eq!(driver.bus().reads(), 101, "only the probe may touch the bus");
    assert!(handle.is_initialized && handle.is_calibrated);
}

#[test]
fn failed_init_still_initializes_handle() {
    let mut driver = Icm42688::new_with_config(
        MockBus::constant(ICM42688_WHO_AM_I_VALUE),
        MockMotion::dead(),
        SpyMask::default(),
        fast_config(),
    );
    let mut handle = DeviceHandle::new();
    assert!(driver.probe().found);
    assert!(matches!(
        driver.initialize(&mut handle),
        InitPath::FallbackToSimulation { .. }
    ));
    assert!(handle.is_initialized);
    let outcome = driver.calibrate(&mut handle, None).unwrap();
    assert!(!outcome.is_from_data());
    assert_eq!(driver.update(&mut handle, 0.01), UpdateOutcome::Held);
}

#[test]
fn register_reads_short_circuit_after_four_failures() {
    let reader = FaultAwareReader::default();
    let mut link = CommunicationState::new();
    let mut bus = MockBus::floating();

    for n in 1..=4 {
        assert!(matches!(
            reader.read_register(&mut link, &mut bus, 0x68, 0x75),
            Err(RegisterFault::Exhausted { .. })
        ));
        assert_eq!(link.consecutive_errors(), n);
    }
    let reads = bus.reads();

    bus.set_fallback(ICM42688_WHO_AM_I_VALUE);
    for _ in 0..10 {
        assert_eq!(
            reader.read_register(&mut link, &mut bus, 0x68, 0x75),
            Err(RegisterFault::ShortCircuited)
        );
    }
    assert_eq!(bus.reads(), reads);
    assert!(link.force_simulation());
    assert_eq!(link.error_count(), 4);
}

#[test]
fn neutral_reads_escalate_to_simulation() {
    let mut reader = FaultAwareReader::default();
    let mut link = CommunicationState::new();
    let mut bus = MockBus::floating();
    let mut motion = MockMotion::constant(tilted_sample(5.0));
    let mut mask = SpyMask::default();

    // Four exhausted register reads: link down, cumulative count above 3
    for _ in 0..4 {
        assert!(reader.read_register(&mut link, &mut bus, 0x68, 0x75).is_err());
    }
    assert!(!link.force_simulation());

    for expected in [5, 6] {
        let read = reader.read_motion(&mut link, &mut motion, &mut mask);
        assert!(matches!(read, MotionRead::Neutral(_)));
        assert_eq!(read.sample().accel, [0, 0, 16384]);
        assert_eq!(read.sample().gyro, [0, 0, 0]);
        assert_eq!(link.consecutive_errors(), expected);
    }

    let read = reader.read_motion(&mut link, &mut motion, &mut mask);
    assert!(matches!(read, MotionRead::Synthetic(_)));
    assert_eq!(motion.reads(), 0);
    assert_eq!(mask.disables(), 0);
}
