//! Error types for Tether.
//!
//! Uses `thiserror` for ergonomic error handling with automatic `Display`
//! and `Error` trait implementations. The transport/body/parse split mirrors
//! the three stages of an exchange that can fail independently.

use thiserror::Error;

/// The primary error type for Tether operations.
#[derive(Error, Debug)]
pub enum TetherError {
    /// Configuration errors (invalid server origin, malformed config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard I/O errors (config file reads).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be serialized to JSON.
    #[error("Serialize error: {0}")]
    Serialize(String),

    /// Network transport failure (connect, send).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be read.
    #[error("Body error: {0}")]
    Body(String),

    /// Response body was not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A specialized `Result` type for Tether operations.
pub type Result<T> = std::result::Result<T, TetherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TetherError::Config("bad server origin".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad server origin");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TetherError = io_err.into();
        assert!(matches!(err, TetherError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }

    #[test]
    fn test_exchange_stage_variants() {
        let transport = TetherError::Transport("connection refused".into());
        let body = TetherError::Body("stream closed".into());
        let parse = TetherError::Parse("expected value".into());
        assert_eq!(transport.to_string(), "Transport error: connection refused");
        assert_eq!(body.to_string(), "Body error: stream closed");
        assert_eq!(parse.to_string(), "Parse error: expected value");
    }
}
