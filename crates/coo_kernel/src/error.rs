//! Error types for kernel loading and segment evaluation.

use std::path::PathBuf;

use coo_time::TimeError;
use thiserror::Error;

/// Errors from text kernels, body constants and ephemeris segments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KernelError {
    /// Reading a kernel file failed.
    #[error("cannot read kernel {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The kernel text is malformed.
    #[error("kernel parse error: {0}")]
    Parse(String),
    /// A required pool variable is absent.
    #[error("kernel variable {0} not found")]
    MissingVariable(String),
    /// A pool variable has the wrong type or size.
    #[error("kernel variable {name}: {reason}")]
    BadVariable { name: String, reason: String },
    /// A date literal or leap-second table is invalid.
    #[error(transparent)]
    Time(#[from] TimeError),
    /// A segment definition is invalid.
    #[error("invalid segment {target} w.r.t. {center}: {reason}")]
    InvalidSegment {
        target: i32,
        center: i32,
        reason: &'static str,
    },
    /// No segment covers the requested epoch.
    #[error("no data for {target} w.r.t. {center} at {epoch_tdb_s} s past J2000")]
    EpochOutOfRange {
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> KernelError {
    KernelError::Io {
        path: path.into(),
        source,
    }
}
