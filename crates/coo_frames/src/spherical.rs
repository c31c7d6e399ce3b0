//! Cartesian ↔ latitudinal (planetocentric spherical) conversion.

use std::f64::consts::PI;

use crate::error::FrameError;
use crate::vector::{is_finite, norm};

/// Latitudinal coordinates: distance from the origin plus planetocentric
/// longitude and latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latitudinal {
    /// Distance from the origin, in the input's length unit.
    pub radius: f64,
    /// Longitude in radians, range (-π, π].
    /// Measured in the x-y plane from +x toward +y.
    pub lon_rad: f64,
    /// Latitude in radians, range [-π/2, π/2].
    pub lat_rad: f64,
}

/// Convert Cartesian `[x, y, z]` to latitudinal coordinates.
///
/// The zero vector has no direction and is rejected, as is any non-finite
/// component.
pub fn rect_to_latitudinal(xyz: &[f64; 3]) -> Result<Latitudinal, FrameError> {
    if !is_finite(xyz) {
        return Err(FrameError::NonFinite("rectangular coordinates"));
    }
    let r = norm(xyz);
    if r == 0.0 {
        return Err(FrameError::ZeroVector);
    }

    let (x, y, z) = (xyz[0], xyz[1], xyz[2]);
    let rxy = x.hypot(y);
    let lon = if rxy == 0.0 { 0.0 } else { y.atan2(x) };
    let lat = z.atan2(rxy);

    Ok(Latitudinal {
        radius: r,
        lon_rad: if lon <= -PI { lon + 2.0 * PI } else { lon },
        lat_rad: lat,
    })
}
