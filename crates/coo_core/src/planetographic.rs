//! Cartesian ↔ spherical and planetographic conversion at the public
//! boundary (meters and degrees).
//!
//! The engine works in kilometers and radians; each function converts on
//! the way in and on the way out.

use coo_engine::EphemerisEngine;

use crate::error::CooError;
use crate::guard::try_compute;
use crate::shape::lookup_shape;

pub const METERS_PER_KM: f64 = 1000.0;

/// Spherical coordinates about the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonRad {
    pub lat_deg: f64,
    /// In (−180°, 180°].
    pub lon_deg: f64,
    pub radius_m: f64,
}

/// Planetographic coordinates on a body's shape model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonAlt {
    pub lat_deg: f64,
    /// In [0°, 360°), positive in the body's planetographic sense.
    pub lon_deg: f64,
    pub alt_m: f64,
}

fn to_km(xyz_m: [f64; 3]) -> [f64; 3] {
    xyz_m.map(|c| c / METERS_PER_KM)
}

/// Decompose a point into latitude, longitude and distance from the origin.
pub fn xyz_to_lat_lon_rad<E>(engine: &mut E, x: f64, y: f64, z: f64) -> Result<LatLonRad, CooError>
where
    E: EphemerisEngine + ?Sized,
{
    let rect_km = to_km([x, y, z]);
    let lat = try_compute(engine, "rect_to_latitudinal", |e| {
        e.rect_to_latitudinal(&rect_km)
    })
    .map_err(|f| CooError::engine("rect_to_latitudinal", f))?;

    Ok(LatLonRad {
        lat_deg: lat.lat_rad.to_degrees(),
        lon_deg: lat.lon_rad.to_degrees(),
        radius_m: lat.radius * METERS_PER_KM,
    })
}

/// Planetographic latitude, longitude and altitude of a point above
/// `planet`.
pub fn xyz_to_lat_lon_alt<E>(
    engine: &mut E,
    planet: &str,
    x: f64,
    y: f64,
    z: f64,
) -> Result<LatLonAlt, CooError>
where
    E: EphemerisEngine + ?Sized,
{
    let shape = lookup_shape(engine, planet)?;
    let rect_km = to_km([x, y, z]);
    let geo = try_compute(engine, "rect_to_planetographic", |e| {
        e.rect_to_planetographic(
            planet,
            &rect_km,
            shape.equatorial_radius_km,
            shape.flattening,
        )
    })
    .map_err(|f| CooError::engine("rect_to_planetographic", f))?;

    Ok(LatLonAlt {
        lat_deg: geo.lat_rad.to_degrees(),
        lon_deg: geo.lon_rad.to_degrees(),
        alt_m: geo.alt * METERS_PER_KM,
    })
}

/// Cartesian position in meters of a planetographic point on `planet`.
pub fn lat_lon_alt_to_xyz<E>(
    engine: &mut E,
    planet: &str,
    lat_deg: f64,
    lon_deg: f64,
    alt_m: f64,
) -> Result<[f64; 3], CooError>
where
    E: EphemerisEngine + ?Sized,
{
    let shape = lookup_shape(engine, planet)?;
    let rect_km = try_compute(engine, "planetographic_to_rect", |e| {
        e.planetographic_to_rect(
            planet,
            lon_deg.to_radians(),
            lat_deg.to_radians(),
            alt_m / METERS_PER_KM,
            shape.equatorial_radius_km,
            shape.flattening,
        )
    })
    .map_err(|f| CooError::engine("planetographic_to_rect", f))?;

    Ok(rect_km.map(|c| c * METERS_PER_KM))
}
