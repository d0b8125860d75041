//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Input held no JSON
    #[error("No JSON found in {source_name} ({len} bytes)")]
    Undecodable {
        /// Input file name or `stdin`
        source_name: String,
        /// Input length
        len: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storeprobe library error
    #[error("Storeprobe error: {0}")]
    Probe(#[from] storeprobe::ProbeError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Probe(storeprobe::ProbeError::Json(err))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_undecodable_error() {
        let err = CliError::Undecodable {
            source_name: "stdin".to_string(),
            len: 12,
        };
        assert_eq!(err.to_string(), "No JSON found in stdin (12 bytes)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.html");
        let err: CliError = io.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_probe_error_conversion() {
        let err: CliError = storeprobe::ProbeError::config("empty phrases").into();
        assert!(err.to_string().contains("Storeprobe error"));
        assert!(err.to_string().contains("empty phrases"));
    }
}
