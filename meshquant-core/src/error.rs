//! Error types for meshquant

use thiserror::Error;

/// Main error type for meshquant operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller contract was violated: empty buffers, bin counts below two,
    /// mismatched buffer lengths, non-finite coordinates or metadata that does
    /// not belong to the requested inverse.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidInput`]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Whether this error is a caller contract violation
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

/// Result type alias for meshquant operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input("bin count must be at least 2, got 1");
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "Invalid input: bin count must be at least 2, got 1");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.obj");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_invalid_input());
    }
}
