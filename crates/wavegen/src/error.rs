//! Error types for waveform generation.

use thiserror::Error;

use crate::expr::ExprError;

/// Result type for wavegen operations.
pub type WavegenResult<T> = Result<T, WavegenError>;

/// Errors that can occur while preparing or encoding a waveform.
#[derive(Debug, Error)]
pub enum WavegenError {
    /// A synthesis parameter is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// A channel's expression failed to compile.
    #[error("invalid expression for channel {channel}: {source}")]
    InvalidExpression {
        /// Zero-based channel index.
        channel: usize,
        /// Underlying compiler error.
        #[source]
        source: ExprError,
    },

    /// The output stream rejected a write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavegenError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns the stable error code (e.g., "WAVEGEN_001").
    pub fn code(&self) -> &'static str {
        match self {
            WavegenError::InvalidParameter { .. } => "WAVEGEN_001",
            WavegenError::InvalidExpression { .. } => "WAVEGEN_002",
            WavegenError::Io(_) => "WAVEGEN_003",
        }
    }

    /// Returns the error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            WavegenError::InvalidParameter { .. } => "parameter",
            WavegenError::InvalidExpression { .. } => "expression",
            WavegenError::Io(_) => "io",
        }
    }

    /// Whether the error was caused by caller input rather than the stream.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, WavegenError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ExprError, ExprErrorKind};

    #[test]
    fn test_invalid_param_helper() {
        let err = WavegenError::invalid_param("sample_rate", "must be positive, got 0");
        assert!(err.to_string().contains("sample_rate"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.code(), "WAVEGEN_001");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_expression_error_carries_channel() {
        let err = WavegenError::InvalidExpression {
            channel: 1,
            source: ExprError::new(ExprErrorKind::UnexpectedEnd, 3),
        };
        let msg = err.to_string();
        assert!(msg.contains("channel 1"));
        assert!(msg.contains("unexpected end of expression"));
        assert_eq!(err.category(), "expression");
    }

    #[test]
    fn test_io_error_is_not_input_error() {
        let err = WavegenError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        ));
        assert_eq!(err.code(), "WAVEGEN_003");
        assert!(!err.is_input_error());
    }
}
