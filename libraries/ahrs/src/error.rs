use thiserror::Error;

/// Primary error type for the AHRS crate
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AhrsError {
    /// A filter parameter is outside the range it is defined on
    #[error("Configuration error: {parameter} = {value} is out of range")]
    ConfigurationError {
        /// Parameter that caused the error
        parameter: &'static str,
        /// Rejected value
        value: f32,
    },
}

/// Type alias for Result with AhrsError
pub type AhrsResult<T> = Result<T, AhrsError>;

/// Helper functions for creating common errors
pub mod helpers {
    use super::*;

    /// Create a configuration error
    pub fn config_error(parameter: &'static str, value: f32) -> AhrsError {
        AhrsError::ConfigurationError { parameter, value }
    }

    /// Check that `value` is finite and inside `[min, max]`
    pub fn check_range(parameter: &'static str, value: f32, min: f32, max: f32) -> AhrsResult<f32> {
        if value.is_finite() && value >= min && value <= max {
            Ok(value)
        } else {
            Err(config_error(parameter, value))
        }
    }
}
