//! Frame-to-frame rotation at a timestamp.

use coo_engine::EphemerisEngine;
use coo_frames::RotationMatrix3x3;

use crate::epoch::resolve_epoch;
use crate::error::CooError;
use crate::guard::try_compute;

/// Rotation taking `from` vectors into `to` at `datetime`.
///
/// The engine's rows are copied as-is; [`RotationMatrix3x3::to_row_major`]
/// gives the flat layout.
pub fn get_frame_transform<E>(
    engine: &mut E,
    from: &str,
    to: &str,
    datetime: &str,
) -> Result<RotationMatrix3x3, CooError>
where
    E: EphemerisEngine + ?Sized,
{
    let tdb_s = resolve_epoch(engine, datetime)?.as_tdb_seconds();
    try_compute(engine, "frame_transform", |e| e.frame_transform(from, to, tdb_s))
        .map(RotationMatrix3x3::from_rows)
        .map_err(|f| CooError::engine("frame_transform", f))
}
