//! # Error Types
//!
//! Shared error handling for the pgflock workspace.

use thiserror::Error;

/// Error conditions raised by the topology engine and its collaborators.
///
/// The taxonomy follows how errors are handled, not where they occur:
/// connectivity and coordination failures are transient and retryable,
/// query failures are absorbed as soft reconciliation errors, and
/// configuration failures are fatal at bootstrap.
#[derive(Error, Debug)]
pub enum FlockError {
    /// Failure to acquire or use a database connection
    #[error("connectivity error: {message}")]
    Connectivity { message: String },

    /// A SQL statement failed on a node
    #[error("query error: {message}")]
    Query { message: String },

    /// Coordination store operation failure
    #[error("coordination error: {message}")]
    Coordination { message: String },

    /// Invalid or unusable configuration
    #[error("configuration error: {message}")]
    Config { message: String },

    /// JSON serialization/deserialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system I/O failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal error
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Type alias for results in the pgflock workspace.
pub type Result<T> = std::result::Result<T, FlockError>;

impl FlockError {
    /// Creates a new connectivity error with the given message.
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    /// Creates a new query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Creates a new coordination error with the given message.
    pub fn coordination(message: impl Into<String>) -> Self {
        Self::Coordination {
            message: message.into(),
        }
    }

    /// Creates a new configuration error with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a new internal error with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Determines if this error condition is potentially recoverable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flock_core::FlockError;
    ///
    /// assert!(FlockError::connectivity("connection refused").is_retryable());
    /// assert!(!FlockError::config("no nodes configured").is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connectivity { .. } | Self::Coordination { .. } | Self::Query { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_message() {
        let err = FlockError::connectivity("refused");
        assert_eq!(err.to_string(), "connectivity error: refused");

        let err = FlockError::query("syntax error");
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn retryability_by_category() {
        assert!(FlockError::coordination("session expired").is_retryable());
        assert!(!FlockError::internal("bug").is_retryable());
        assert!(!FlockError::config("missing dsn").is_retryable());
    }
}
