//! Body shape models from kernel radii.

use coo_engine::EphemerisEngine;

use crate::error::CooError;
use crate::guard::try_compute;

/// Spheroid used for planetographic conversion of one body.
///
/// Flattening is computed from the first radius against itself, so every
/// body is treated as a sphere of its first radius. `polar_radius_km` keeps
/// the kernel's third radius for reference only.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeModel {
    pub body: String,
    pub equatorial_radius_km: f64,
    pub polar_radius_km: f64,
    pub flattening: f64,
}

/// Look up `body`'s radii and build its shape model.
pub fn lookup_shape<E>(engine: &mut E, body: &str) -> Result<ShapeModel, CooError>
where
    E: EphemerisEngine + ?Sized,
{
    let unknown = |reason: String| CooError::UnknownBody {
        body: body.to_string(),
        reason,
    };
    if body.trim().is_empty() {
        return Err(unknown("empty body name".into()));
    }

    let radii = try_compute(engine, "lookup_radii", |e| e.lookup_radii(body))
        .map_err(|fault| unknown(fault.to_string()))?;
    let [re, _, rp] = radii[..] else {
        return Err(unknown(format!(
            "expected 3 radii, kernel has {}",
            radii.len()
        )));
    };
    if !(re.is_finite() && re > 0.0) {
        return Err(unknown(format!("degenerate equatorial radius {re}")));
    }

    let polar_for_flattening = re;
    Ok(ShapeModel {
        body: body.to_string(),
        equatorial_radius_km: re,
        polar_radius_km: rp,
        flattening: (re - polar_for_flattening) / re,
    })
}
