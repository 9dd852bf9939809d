//! IMU attitude monitor
//!
//! Brings the sensor up through the fault-tolerant driver and renders the
//! estimated attitude on a small text display, falling back to a synthetic
//! animation when no sensor answers.

#![no_std]

mod board;
mod monitor;
pub mod screen;
mod simulation;

pub use board::{Board, Resources};
pub use monitor::{Mode, Monitor, MonitorConfig, Startup, Tick};
pub use simulation::{SimulatedFrame, SimulationRenderer};
