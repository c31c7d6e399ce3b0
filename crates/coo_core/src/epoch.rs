//! Timestamp → ephemeris epoch.

use coo_engine::EphemerisEngine;
use coo_time::Epoch;

use crate::error::CooError;
use crate::guard::try_compute;

/// Resolve `timestamp` with the engine's time-string grammar.
pub fn resolve_epoch<E>(engine: &mut E, timestamp: &str) -> Result<Epoch, CooError>
where
    E: EphemerisEngine + ?Sized,
{
    try_compute(engine, "resolve_epoch", |e| e.resolve_epoch(timestamp))
        .map(Epoch::from_tdb_seconds)
        .map_err(|source| CooError::EpochParse {
            input: timestamp.to_string(),
            source,
        })
}
