//! Error taxonomy of the transformation core.

use coo_engine::EngineFault;
use thiserror::Error;

/// Failure of a core operation.
///
/// The engine's fault flag has always been reset by the time one of these
/// reaches the caller.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CooError {
    /// The timestamp could not be turned into an epoch.
    #[error("cannot resolve epoch '{input}': {source}")]
    EpochParse { input: String, source: EngineFault },
    /// The body has no usable shape entry.
    #[error("no usable shape for body '{body}': {reason}")]
    UnknownBody { body: String, reason: String },
    /// An engine computation signaled failure.
    #[error("{operation} failed: {source}")]
    EngineComputation {
        operation: &'static str,
        source: EngineFault,
    },
    /// The target and support directions are parallel or degenerate.
    #[error("cannot build a basis from parallel directions (|sin| = {sine_angle:e})")]
    DegenerateBasis { sine_angle: f64 },
}

/// Coarse classification of a [`CooError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EpochParse,
    UnknownBody,
    EngineComputation,
    DegenerateBasis,
}

impl CooError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EpochParse { .. } => ErrorKind::EpochParse,
            Self::UnknownBody { .. } => ErrorKind::UnknownBody,
            Self::EngineComputation { .. } => ErrorKind::EngineComputation,
            Self::DegenerateBasis { .. } => ErrorKind::DegenerateBasis,
        }
    }

    pub(crate) fn engine(operation: &'static str, source: EngineFault) -> Self {
        Self::EngineComputation { operation, source }
    }
}
