use thiserror::Error;

/// Errors surfaced by the IMU driver.
///
/// Bus trouble is never an error here: it degrades data quality and is
/// reported through [`crate::CommunicationState`] and the read outcomes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("device handle is not initialized")]
    NotInitialized,
}

pub type DriverResult<T> = Result<T, DriverError>;
