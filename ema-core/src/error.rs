/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the EMA configuration engine.
//!
//! Every fatal condition raised while loading, parsing, merging or verifying
//! configuration surfaces as a [`ConfigError`]. Non-fatal diagnostics are not
//! errors; they are collected in the [`ConfigErrorLog`](crate::ConfigErrorLog).

use thiserror::Error;

/// Result type alias using [`ConfigError`] as the error type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level error type for all configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is structurally invalid or a value could not be coerced.
    ///
    /// The message names the offending element or attribute and, where one
    /// exists, the accepted format.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// I/O error while reading a configuration file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates an [`ConfigError::InvalidConfiguration`] from any displayable message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Returns true if this is an invalid-configuration error.
    #[must_use]
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Returns the diagnostic text without any category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidConfiguration(msg) => msg.clone(),
            Self::Io(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let err = ConfigError::invalid("Missing ConsumerList node");
        assert_eq!(err.to_string(), "Missing ConsumerList node");
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(!err.is_invalid_configuration());
        assert_eq!(err.message(), "denied");
    }
}
