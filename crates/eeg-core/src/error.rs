//! Error handling for the EEG simulator
//!
//! Every fallible operation reports one of these kinds and leaves the
//! simulation state untouched when it does.

use core::fmt;

/// Result type alias for simulator operations
pub type EegResult<T> = Result<T, EegError>;

/// Error type for all simulator operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EegError {
    /// Band id is unknown or not present in the active catalog
    InvalidBand {
        /// The offending identifier as given by the caller
        id: String,
    },

    /// Numeric parameter outside its accepted range
    OutOfRange {
        /// Parameter name
        parameter: &'static str,
        /// Provided value
        value: f32,
        /// Human readable constraint
        constraint: &'static str,
    },

    /// Configuration failed validation
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// JSON serialization or deserialization failed
    Serialization {
        /// Underlying serializer message
        reason: String,
    },

    /// The frame driver is no longer accepting commands
    DriverClosed,

    /// The frame driver command queue is full
    CommandQueueFull {
        /// Queue capacity
        capacity: usize,
    },
}

impl fmt::Display for EegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EegError::InvalidBand { id } => {
                write!(f, "Invalid band: '{}' is not in the wave catalog", id)
            }
            EegError::OutOfRange { parameter, value, constraint } => {
                write!(f, "Value out of range for {}: {}, expected {}",
                       parameter, value, constraint)
            }
            EegError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            EegError::Serialization { reason } => {
                write!(f, "Serialization error: {}", reason)
            }
            EegError::DriverClosed => {
                write!(f, "Frame driver stopped, command not delivered")
            }
            EegError::CommandQueueFull { capacity } => {
                write!(f, "Command queue full ({} pending commands)", capacity)
            }
        }
    }
}

impl std::error::Error for EegError {}

/// Convenience macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::error::EegError::InvalidConfig {
            reason: format!($($arg)*)
        }
    };
}
