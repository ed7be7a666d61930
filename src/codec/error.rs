// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid input '{text}': {reason}")]
    InvalidInput { text: String, reason: String },
}

impl CodecError {
    pub fn invalid(text: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    pub fn zero_width() -> Self {
        Self::invalid("", "width must be at least one byte")
    }
}
