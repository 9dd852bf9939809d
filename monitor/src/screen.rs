//! Screen layouts for a 128x64 panel addressed as 8 text rows
//!
//! Every function only draws. Pauses between screens belong to the caller.

use ahrs::Attitude;
use driver::{CalibrationOutcome, CalibrationSource, DefaultReason, InitPath, LinkHealth, ProbeReport};
use hal::Display;

const VALUE_X: u8 = 40;
const STATUS_X: u8 = 60;
const ERROR_COUNT_X: u8 = 100;
const TEMP_UNIT_X: u8 = 80;
const ANGLE_UNIT_X: u8 = 90;

pub fn probe_banner<D: Display>(display: &mut D) {
    display.clear();
    display.write_str(0, 0, "Hardware Test");
    display.write_str(0, 1, "Quick Test...");
}

pub fn probe_result<D: Display>(display: &mut D, report: &ProbeReport) {
    display.clear();
    display.write_str(0, 0, "Device ID:");
    display.write_number(STATUS_X, 0, f32::from(report.device_id));
    if report.found {
        display.write_str(0, 1, "ICM42688 Found!");
        display.write_str(0, 2, "Hardware OK");
    } else {
        display.write_str(0, 1, "Hardware Failed!");
        display.write_str(0, 2, "Force Simulation");
    }
}

pub fn init_banner<D: Display>(display: &mut D) {
    display.clear();
    display.write_str(0, 0, "Quick Init...");
}

/// Draws below the init banner. A hardware init adds nothing.
pub fn init_result<D: Display>(display: &mut D, path: &InitPath) {
    match *path {
        InitPath::Hardware { .. } => {}
        InitPath::SkippedSimulation => {
            display.write_str(0, 1, "Skip Init");
            display.write_str(0, 2, "Simulation Mode");
        }
        InitPath::FallbackToSimulation { aborted_early, .. } => {
            if aborted_early {
                display.write_str(0, 1, "Quick retry...");
            }
            display.write_str(0, 1, "Init Failed!");
            display.write_str(0, 2, "Use Simulation");
        }
    }
}

pub fn calibration_banner<D: Display>(display: &mut D) {
    display.clear();
    display.write_str(0, 0, "Fast Calibration");
}

pub fn calibration_notice<D: Display>(display: &mut D) {
    display.write_str(0, 1, "Quick Sample");
}

pub fn sampling<D: Display>(display: &mut D) {
    display.clear();
    display.write_str(0, 0, "Sampling...");
}

pub fn calibration_progress<D: Display>(display: &mut D, percent: u8) {
    display.clear_line(1);
    display.write_number(0, 1, f32::from(percent));
    display.write_str(VALUE_X, 1, "%");
}

pub fn calibration_result<D: Display>(display: &mut D, outcome: &CalibrationOutcome) {
    match outcome.source {
        CalibrationSource::Defaults(DefaultReason::SimulationGate) => {
            display.write_str(0, 1, "Default Values");
        }
        CalibrationSource::Defaults(DefaultReason::NoValidSamples) => {
            display.clear();
            display.write_str(0, 0, "Use Defaults");
            display.write_str(0, 1, "No I2C Data");
        }
        CalibrationSource::FromSamples { samples } => {
            display.clear();
            display.write_str(0, 0, "Cal Complete!");
            display.write_str(0, 1, "Samples:");
            display.write_number(STATUS_X, 1, samples as f32);
        }
    }
}

pub fn simulation_banner<D: Display>(display: &mut D) {
    display.clear();
    display.write_str(0, 0, "Hardware Failed");
    display.write_str(0, 1, "Simulation Mode");
}

/// Live readout: frame counter and link status on row 0, then the readings
pub fn live<D: Display>(
    display: &mut D,
    counter: u32,
    health: LinkHealth,
    temperature: f32,
    attitude: &Attitude,
) {
    display.clear_line(0);
    display.write_number(0, 0, counter as f32);
    if health.communication_ok {
        display.write_str(STATUS_X, 0, "ICM-OK");
    } else {
        display.write_str(STATUS_X, 0, "ICM-ERR");
        display.write_number(ERROR_COUNT_X, 0, health.error_count as f32);
    }
    readings(display, temperature, attitude);
}

/// Same layout as [`live`] with a fixed status
pub fn simulated<D: Display>(display: &mut D, counter: u32, temperature: f32, attitude: &Attitude) {
    display.clear_line(0);
    display.write_number(0, 0, counter as f32);
    display.write_str(STATUS_X, 0, "SIM MODE");
    readings(display, temperature, attitude);
}

// Rows 1 through 7
fn readings<D: Display>(display: &mut D, temperature: f32, attitude: &Attitude) {
    display.clear_line(1);
    display.write_str(0, 1, "Temp:");
    display.write_number(VALUE_X, 1, temperature);
    display.write_str(TEMP_UNIT_X, 1, "C");

    display.clear_line(2);

    angle_row(display, 3, "Pitch:", attitude.pitch);
    angle_row(display, 4, "Roll: ", attitude.roll);
    angle_row(display, 5, "Yaw:  ", attitude.yaw);

    display.clear_line(6);
    display.clear_line(7);
}

fn angle_row<D: Display>(display: &mut D, y: u8, label: &str, degrees: f32) {
    display.clear_line(y);
    display.write_str(0, y, label);
    display.write_number(VALUE_X, y, degrees);
    display.write_str(ANGLE_UNIT_X, y, "deg");
}
