//! Error types for the editing pipeline and WAV codec

use std::fmt;

/// Errors that can occur while editing or encoding audio
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// Buffer violates its shape invariants (channels, sample rate, interleave)
    InvalidBuffer(String),

    /// Out-of-domain editing parameter (negative gain, NaN duration, ...)
    InvalidParameter(String),

    /// Trim range outside the buffer or inverted
    InvalidRange(String),

    /// Buffer cannot be serialized as WAV
    EncodeError(String),

    /// Malformed or unsupported WAV input
    DecodingError(String),

    /// Filesystem failure while reading or writing a WAV file
    IoError(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::InvalidBuffer(msg) => write!(f, "Invalid buffer: {}", msg),
            EditError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            EditError::InvalidRange(msg) => write!(f, "Invalid range: {}", msg),
            EditError::EncodeError(msg) => write!(f, "Encode error: {}", msg),
            EditError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            EditError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for EditError {}

impl From<std::io::Error> for EditError {
    fn from(err: std::io::Error) -> Self {
        EditError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for EditError {
    fn from(err: serde_json::Error) -> Self {
        EditError::InvalidParameter(format!("config: {}", err))
    }
}

/// Reject negative, NaN and infinite values for a named parameter
pub(crate) fn check_non_negative(name: &str, value: f32) -> Result<(), EditError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EditError::InvalidParameter(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}
