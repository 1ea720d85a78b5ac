//! Error types for the typecast core library
//!
//! This module defines the error handling system for typecast, using
//! thiserror for ergonomic error definitions.

use crate::types::{TargetType, ValueKind};
use thiserror::Error;

/// Main error type for typecast operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Malformed path pattern, only raised when strict path compilation is on
    #[error("Invalid path '{pattern}': {message}")]
    InvalidPath { pattern: String, message: String },

    /// A scalar leaf could not be converted to its declared type
    #[error("Cannot cast {source_kind} {value} to {target} at {path}: {message}")]
    Conversion {
        path: String,
        value: String,
        source_kind: ValueKind,
        target: TargetType,
        message: String,
    },

    /// A record was rejected because one of its columns failed to cast
    #[error("Invalid record at column '{column}': {source}")]
    InvalidRecord {
        column: String,
        #[source]
        source: Box<Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Path of the offending leaf, if this error came from a cast
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Conversion { path, .. } => Some(path),
            Self::InvalidRecord { source, .. } => source.path(),
            _ => None,
        }
    }

    /// Whether this error was raised while casting a value
    pub fn is_conversion(&self) -> bool {
        match self {
            Self::Conversion { .. } => true,
            Self::InvalidRecord { source, .. } => source.is_conversion(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_display() {
        let err = Error::Conversion {
            path: "$.user.age".to_string(),
            value: "\"abc\"".to_string(),
            source_kind: ValueKind::String,
            target: TargetType::Long,
            message: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot cast string \"abc\" to long at $.user.age: not a number"
        );
        assert_eq!(err.path(), Some("$.user.age"));
        assert!(err.is_conversion());
    }

    #[test]
    fn test_invalid_record_delegates_path() {
        let inner = Error::Conversion {
            path: "$.payload.n".to_string(),
            value: "true".to_string(),
            source_kind: ValueKind::Boolean,
            target: TargetType::Timestamp,
            message: "unsupported".to_string(),
        };
        let err = Error::InvalidRecord {
            column: "payload".to_string(),
            source: Box::new(inner),
        };
        assert_eq!(err.path(), Some("$.payload.n"));
        assert!(err.is_conversion());
        assert!(err.to_string().starts_with("Invalid record at column 'payload'"));
    }

    #[test]
    fn test_configuration_error() {
        let err = Error::configuration("bad timezone");
        assert_eq!(err.to_string(), "Configuration error: bad timezone");
        assert!(err.path().is_none());
        assert!(!err.is_conversion());
    }
}
