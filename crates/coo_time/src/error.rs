//! Error types for time-scale conversions and time-string parsing.

use thiserror::Error;

/// Errors from time-string parsing or UTC ↔ TDB conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The input could not be read as a supported time string.
    #[error("invalid time string '{input}': {reason}")]
    InvalidTimeString { input: String, reason: &'static str },
    /// A UTC conversion was requested but no leap-second table is loaded.
    #[error("no leap-second data loaded; cannot convert UTC to TDB")]
    NoLeapSeconds,
    /// The leap-second table is malformed.
    #[error("leap-second table error: {0}")]
    LeapTable(String),
}

impl TimeError {
    pub(crate) fn invalid(input: &str, reason: &'static str) -> Self {
        Self::InvalidTimeString {
            input: input.to_string(),
            reason,
        }
    }
}
