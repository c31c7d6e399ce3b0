//! Error types for geometric conversions.

use thiserror::Error;

/// Errors from vector and coordinate geometry.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FrameError {
    /// An input vector has zero length where a direction is required.
    #[error("zero-length vector has no direction")]
    ZeroVector,
    /// An input contains NaN or infinity.
    #[error("non-finite input: {0}")]
    NonFinite(&'static str),
    /// A reference spheroid is unusable.
    #[error("invalid spheroid: {0}")]
    InvalidSpheroid(&'static str),
}
