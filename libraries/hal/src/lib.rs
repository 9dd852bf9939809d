#![no_std]

#[cfg(feature = "mock")]
extern crate std;

mod bus;
mod display;
mod motion;
mod platform;
mod types;

#[cfg(feature = "mock")]
pub mod mock;

pub use bus::*;
pub use display::*;
pub use motion::*;
pub use platform::*;
pub use types::*;
