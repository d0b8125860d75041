//! Result and error types for Storeprobe.

use thiserror::Error;

/// Result type for Storeprobe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur in Storeprobe
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Response body held no JSON, strict or embedded
    #[error("Response body is not decodable as JSON ({len} bytes)")]
    Undecodable {
        /// Length of the rejected body
        len: usize,
    },

    /// A loosely-typed form payload held a value that has no scalar form
    #[error("Field `{key}` holds {kind}, which cannot be form-encoded")]
    UnsupportedFormValue {
        /// Offending field name
        key: String,
        /// JSON kind of the value (`array` or `object`)
        kind: &'static str,
    },

    /// Browser driver reported a failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Element went away between lookup and interaction
    #[error("Element {id} is no longer attached")]
    ElementDetached {
        /// Element handle id
        id: String,
    },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A decoded response lacked an expected field
    #[error("Response has no `{field}` field")]
    MissingField {
        /// Field name
        field: String,
    },

    /// HTTP transport error
    #[cfg(feature = "api")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undecodable_message_mentions_length() {
        let err = ProbeError::Undecodable { len: 12 };
        assert_eq!(
            err.to_string(),
            "Response body is not decodable as JSON (12 bytes)"
        );
    }

    #[test]
    fn test_unsupported_form_value_message() {
        let err = ProbeError::UnsupportedFormValue {
            key: "tags".into(),
            kind: "array",
        };
        assert_eq!(
            err.to_string(),
            "Field `tags` holds array, which cannot be form-encoded"
        );
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(ProbeError::driver("boom"), ProbeError::Driver { .. }));
        assert_eq!(
            ProbeError::config("bad url").to_string(),
            "Configuration error: bad url"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ProbeError = json_err.into();
        assert!(matches!(err, ProbeError::Json(_)));
    }
}
