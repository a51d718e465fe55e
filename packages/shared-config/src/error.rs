//! Configuration error types

use thiserror::Error;

/// Failure while reading configuration from the environment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse
    #[error("{var}={value:?} is invalid: {reason}")]
    Unparsable {
        var: String,
        value: String,
        reason: String,
    },

    /// Values parse individually but are inconsistent or out of range
    #[error("{var}: {reason}")]
    OutOfRange { var: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
