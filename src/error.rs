//! Error handling for the skipmatch library
//!
//! Searching itself cannot fail once a matcher is compiled; every error here is
//! a precondition violation detected at entry (pattern too short for an engine,
//! a scratch region that cannot hold the sentinel, a bad configuration).

use thiserror::Error;

/// Main error type for the skipmatch library
#[derive(Error, Debug)]
pub enum SkipMatchError {
    /// I/O related errors (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pattern length not supported by the selected engine
    #[error("Unsupported pattern length: {length} (engine requires at least {minimum})")]
    UnsupportedPatternLength {
        /// Length of the rejected pattern
        length: usize,
        /// Minimum length the engine accepts
        minimum: usize,
    },

    /// Caller buffer too small to hold the text plus its scan sentinel
    #[error("Insufficient scratch space: need {required} bytes, buffer has {available}")]
    InsufficientScratch {
        /// Bytes the buffer must hold
        required: usize,
        /// Bytes the buffer actually holds
        available: usize,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Invalid input data
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl SkipMatchError {
    /// Create an unsupported pattern length error
    pub fn unsupported_pattern_length(length: usize, minimum: usize) -> Self {
        Self::UnsupportedPatternLength { length, minimum }
    }

    /// Create an insufficient scratch space error
    pub fn insufficient_scratch(required: usize, available: usize) -> Self {
        Self::InsufficientScratch { required, available }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Check if this is a recoverable error
    ///
    /// Only I/O failures are worth retrying; everything else needs different
    /// input from the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::UnsupportedPatternLength { .. } => false,
            Self::InsufficientScratch { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::InvalidData { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::UnsupportedPatternLength { .. } => "unsupported",
            Self::InsufficientScratch { .. } => "scratch",
            Self::OutOfBounds { .. } => "bounds",
            Self::InvalidData { .. } => "data",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SkipMatchError>;

/// Assert that a range is within bounds
#[inline]
pub fn check_range(start: usize, end: usize, size: usize) -> Result<()> {
    if start > end {
        return Err(SkipMatchError::invalid_data(format!(
            "Invalid range: start {} > end {}",
            start, end
        )));
    }
    if end > size {
        return Err(SkipMatchError::out_of_bounds(end, size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SkipMatchError::unsupported_pattern_length(3, 8);
        assert_eq!(err.category(), "unsupported");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_range_checking() {
        assert!(check_range(2, 8, 10).is_ok());
        assert!(check_range(8, 2, 10).is_err()); // start > end
        assert!(check_range(2, 15, 10).is_err()); // end > size
    }

    #[test]
    fn test_edge_case_range_checking() {
        assert!(check_range(0, 0, 0).is_ok());
        assert!(check_range(5, 5, 5).is_ok());
        assert!(check_range(0, 11, 10).is_err());
        assert!(check_range(usize::MAX, 0, 10).is_err());
    }

    #[test]
    fn test_all_error_types() {
        let scratch = SkipMatchError::insufficient_scratch(40, 32);
        assert_eq!(scratch.category(), "scratch");
        assert!(!scratch.is_recoverable());

        let bounds = SkipMatchError::out_of_bounds(5, 3);
        assert_eq!(bounds.category(), "bounds");

        let data = SkipMatchError::invalid_data("bad");
        assert_eq!(data.category(), "data");

        let config = SkipMatchError::configuration("bad engine");
        assert_eq!(config.category(), "config");
        assert!(!config.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = SkipMatchError::unsupported_pattern_length(5, 8);
        let display = format!("{}", err);
        assert!(display.contains("Unsupported pattern length"));
        assert!(display.contains('5'));
        assert!(display.contains('8'));

        let scratch = SkipMatchError::insufficient_scratch(120, 100);
        let display = format!("{}", scratch);
        assert!(display.contains("120"));
        assert!(display.contains("100"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SkipMatchError = io_error.into();

        assert_eq!(err.category(), "io");
        assert!(err.is_recoverable());
        assert!(format!("{}", err).contains("I/O error"));
    }
}
