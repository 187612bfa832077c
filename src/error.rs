use crate::provider::TransportError;
use thiserror::Error;

/// Unified error type for the guard.
///
/// Threshold violations are not represented here: they are values
/// ([`crate::evaluator::Violation`]) absorbed by the retry loop. Only retry
/// exhaustion, provider transport failures, and builder misuse escape to the
/// caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The polling loop slept through its whole retry budget while the
    /// cluster stayed unhealthy.
    #[error("max retries exceeded {max_retries}")]
    MaxRetriesExceeded { max_retries: u32 },

    /// The stats provider failed. Surfaced unchanged and immediately; never
    /// counted against the retry budget.
    #[error("stats transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Check whether this error is retry exhaustion.
    pub fn is_max_retries_exceeded(&self) -> bool {
        matches!(self, Error::MaxRetriesExceeded { .. })
    }

    /// The configured retry limit, if this error is retry exhaustion.
    pub fn max_retries(&self) -> Option<u32> {
        match self {
            Error::MaxRetriesExceeded { max_retries } => Some(*max_retries),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_retries_display() {
        let err = Error::MaxRetriesExceeded { max_retries: 3 };
        assert_eq!(err.to_string(), "max retries exceeded 3");
        assert!(err.is_max_retries_exceeded());
        assert_eq!(err.max_retries(), Some(3));
    }

    #[test]
    fn test_configuration_helper() {
        let err = Error::configuration("stats provider is required");
        assert_eq!(
            err.to_string(),
            "configuration error: stats provider is required"
        );
        assert!(!err.is_max_retries_exceeded());
        assert_eq!(err.max_retries(), None);
    }

    #[test]
    fn test_transport_error_wraps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(TransportError::Malformed(json_err));
        assert!(err.to_string().starts_with("stats transport error:"));
    }
}
