//! Engine faults, one per NAIF-style short error message.

use thiserror::Error;

/// A failure raised by an engine operation.
///
/// Once raised, a fault stays pending on the engine until
/// [`EphemerisEngine::reset`](crate::EphemerisEngine::reset) is called.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineFault {
    #[error("SPICE(INVALIDTIMESTRING): {0}")]
    InvalidTimeString(String),
    #[error("SPICE(NOLEAPSECONDS): no leapseconds kernel loaded")]
    NoLeapSeconds,
    #[error("SPICE(IDCODENOTFOUND): '{0}' is not a known body")]
    IdCodeNotFound(String),
    #[error("SPICE(KERNELVARNOTFOUND): {0}")]
    KernelVarNotFound(String),
    #[error("SPICE(UNKNOWNFRAME): '{0}' is not a recognized frame")]
    UnknownFrame(String),
    #[error("SPICE(SPKINSUFFDATA): no data for {target} w.r.t. {observer} at {epoch_tdb_s} s")]
    SpkInsuffData {
        target: i32,
        observer: i32,
        epoch_tdb_s: f64,
    },
    #[error("SPICE(ZEROVECTOR): {0}")]
    ZeroVector(&'static str),
    #[error("SPICE(VALUEOUTOFRANGE): {0}")]
    ValueOutOfRange(String),
    #[error("SPICE(MISSINGDATA): {0}")]
    MissingData(String),
    /// An earlier fault was never reset; the call did nothing.
    #[error("SPICE(PENDINGFAULT): call skipped while {0} is pending")]
    PendingFault(&'static str),
}

impl EngineFault {
    /// NAIF short error message, e.g. `SPICE(ZEROVECTOR)`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::InvalidTimeString(_) => "SPICE(INVALIDTIMESTRING)",
            Self::NoLeapSeconds => "SPICE(NOLEAPSECONDS)",
            Self::IdCodeNotFound(_) => "SPICE(IDCODENOTFOUND)",
            Self::KernelVarNotFound(_) => "SPICE(KERNELVARNOTFOUND)",
            Self::UnknownFrame(_) => "SPICE(UNKNOWNFRAME)",
            Self::SpkInsuffData { .. } => "SPICE(SPKINSUFFDATA)",
            Self::ZeroVector(_) => "SPICE(ZEROVECTOR)",
            Self::ValueOutOfRange(_) => "SPICE(VALUEOUTOFRANGE)",
            Self::MissingData(_) => "SPICE(MISSINGDATA)",
            Self::PendingFault(_) => "SPICE(PENDINGFAULT)",
        }
    }
}
