//! Relative position and orientation of a target body.
//!
//! The rotation's rows are the basis vectors of a frame whose +Z axis
//! points from the observer at the target and whose +Y axis is normal to
//! the plane holding the target and support directions:
//!
//! ```text
//! uz = unit(target)
//! uy = unit(uz × unit(support))
//! ux = unit(uy × uz)
//! ```

use coo_engine::EphemerisEngine;
use coo_frames::RotationMatrix3x3;
use coo_frames::vector::{cross, norm, unit};

use crate::config::TransformConfig;
use crate::epoch::resolve_epoch;
use crate::error::CooError;
use crate::guard::try_compute;
use crate::planetographic::METERS_PER_KM;

/// Bodies, epoch and frame of one relative-state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelStateRequest<'a> {
    pub target: &'a str,
    /// Body fixing the basis' roll about the target direction.
    pub support: &'a str,
    pub observer: &'a str,
    pub observer_time: &'a str,
    pub output_frame: &'a str,
}

/// Target position and basis, both in the output frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelState {
    /// Target relative to observer, meters.
    pub position_m: [f64; 3],
    pub rotation: RotationMatrix3x3,
}

/// Build the target-aligned basis for `request`.
pub fn get_rel_state<E>(
    engine: &mut E,
    request: &RelStateRequest<'_>,
    config: &TransformConfig,
) -> Result<RelState, CooError>
where
    E: EphemerisEngine + ?Sized,
{
    let epoch = resolve_epoch(engine, request.observer_time)?;
    let tdb_s = epoch.as_tdb_seconds();

    let support = try_compute(engine, "support_state", |e| {
        e.relative_state(
            request.support,
            tdb_s,
            request.output_frame,
            config.aberration,
            request.observer,
        )
    })
    .map_err(|f| CooError::engine("support_state", f))?;

    let target = try_compute(engine, "target_state", |e| {
        e.relative_state(
            request.target,
            tdb_s,
            request.output_frame,
            config.aberration,
            request.observer,
        )
    })
    .map_err(|f| CooError::engine("target_state", f))?;

    let rotation = orthonormal_basis(
        &target.position_km,
        &support.position_km,
        config.parallel_tolerance,
    )?;

    Ok(RelState {
        position_m: target.position_km.map(|c| c * METERS_PER_KM),
        rotation,
    })
}

/// Right-handed orthonormal basis with `primary` as row 2 and the normal of
/// `primary` and `secondary` as row 1.
///
/// Fails when either vector is zero or the sine of the angle between them
/// is below `parallel_tolerance`.
pub fn orthonormal_basis(
    primary: &[f64; 3],
    secondary: &[f64; 3],
    parallel_tolerance: f64,
) -> Result<RotationMatrix3x3, CooError> {
    let degenerate = |sine_angle| CooError::DegenerateBasis { sine_angle };

    let (Some(uz), Some(us)) = (unit(primary), unit(secondary)) else {
        return Err(degenerate(0.0));
    };
    let normal = cross(&uz, &us);
    let sine = norm(&normal);
    if !(sine > 0.0 && sine >= parallel_tolerance) {
        return Err(degenerate(sine));
    }
    let uy = unit(&normal).ok_or(degenerate(sine))?;
    let ux = unit(&cross(&uy, &uz)).ok_or(degenerate(sine))?;

    Ok(RotationMatrix3x3::from_rows([ux, uy, uz]))
}
