//! Geodetic and planetographic coordinates on an oblate spheroid.
//!
//! Geodetic latitude is measured from the spheroid's surface normal;
//! longitude is positive east. Planetographic coordinates are geodetic
//! coordinates whose longitude is positive in the direction the body's
//! constants prescribe (see [`LongitudeSense`]), wrapped to [0, 2π).

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::FrameError;
use crate::vector::is_finite;

/// Largest latitude update accepted as converged, in radians.
const LAT_TOLERANCE: f64 = 1e-15;
const MAX_ITERATIONS: usize = 100;

/// Reference spheroid: equatorial radius and flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spheroid {
    re: f64,
    f: f64,
}

impl Spheroid {
    /// `re` must be positive and finite, `f` finite and below 1.
    pub fn new(re: f64, f: f64) -> Result<Self, FrameError> {
        if !(re.is_finite() && re > 0.0) {
            return Err(FrameError::InvalidSpheroid("equatorial radius must be positive"));
        }
        if !(f.is_finite() && f < 1.0) {
            return Err(FrameError::InvalidSpheroid("flattening must be less than 1"));
        }
        Ok(Self { re, f })
    }

    pub fn equatorial_radius(&self) -> f64 {
        self.re
    }

    pub fn flattening(&self) -> f64 {
        self.f
    }

    pub fn polar_radius(&self) -> f64 {
        self.re * (1.0 - self.f)
    }

    /// First eccentricity squared, `f (2 − f)`.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Prime-vertical radius of curvature at geodetic latitude `lat`.
    pub fn prime_vertical_radius(&self, lat: f64) -> f64 {
        let s = lat.sin();
        self.re / (1.0 - self.e2() * s * s).sqrt()
    }
}

/// Geodetic coordinates. Longitude positive east, range (-π, π].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub lon_rad: f64,
    pub lat_rad: f64,
    pub alt: f64,
}

/// Direction in which planetographic longitude increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeSense {
    East,
    West,
}

/// Convert rectangular coordinates to geodetic coordinates.
pub fn rect_to_geodetic(xyz: &[f64; 3], spheroid: &Spheroid) -> Result<Geodetic, FrameError> {
    if !is_finite(xyz) {
        return Err(FrameError::NonFinite("rectangular coordinates"));
    }
    let (x, y, z) = (xyz[0], xyz[1], xyz[2]);
    let p = x.hypot(y);
    let lon = if p == 0.0 { 0.0 } else { y.atan2(x) };

    if p == 0.0 {
        let lat = if z < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };
        return Ok(Geodetic {
            lon_rad: lon,
            lat_rad: lat,
            alt: z.abs() - spheroid.polar_radius(),
        });
    }

    let e2 = spheroid.e2();
    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..MAX_ITERATIONS {
        let n = spheroid.prime_vertical_radius(lat);
        let next = (z + e2 * n * lat.sin()).atan2(p);
        let delta = (next - lat).abs();
        lat = next;
        if delta <= LAT_TOLERANCE {
            break;
        }
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let alt = p * cos_lat + z * sin_lat - spheroid.re * (1.0 - e2 * sin_lat * sin_lat).sqrt();
    Ok(Geodetic {
        lon_rad: lon,
        lat_rad: lat,
        alt,
    })
}

/// Convert geodetic coordinates to rectangular coordinates.
pub fn geodetic_to_rect(lon_rad: f64, lat_rad: f64, alt: f64, spheroid: &Spheroid) -> [f64; 3] {
    let n = spheroid.prime_vertical_radius(lat_rad);
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    let one_minus_e2 = (1.0 - spheroid.f) * (1.0 - spheroid.f);
    [
        (n + alt) * cos_lat * cos_lon,
        (n + alt) * cos_lat * sin_lon,
        (one_minus_e2 * n + alt) * sin_lat,
    ]
}

/// Convert rectangular coordinates to planetographic coordinates.
///
/// The returned longitude is in [0, 2π) and increases in `sense`.
pub fn rect_to_planetographic(
    xyz: &[f64; 3],
    spheroid: &Spheroid,
    sense: LongitudeSense,
) -> Result<Geodetic, FrameError> {
    let geo = rect_to_geodetic(xyz, spheroid)?;
    let lon = match sense {
        LongitudeSense::East => geo.lon_rad,
        LongitudeSense::West => -geo.lon_rad,
    };
    Ok(Geodetic {
        lon_rad: wrap_two_pi(lon),
        ..geo
    })
}

/// Convert planetographic coordinates to rectangular coordinates.
pub fn planetographic_to_rect(
    lon_rad: f64,
    lat_rad: f64,
    alt: f64,
    spheroid: &Spheroid,
    sense: LongitudeSense,
) -> [f64; 3] {
    let east_lon = match sense {
        LongitudeSense::East => lon_rad,
        LongitudeSense::West => -lon_rad,
    };
    geodetic_to_rect(east_lon, lat_rad, alt, spheroid)
}

fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mars() -> Spheroid {
        Spheroid::new(3396.19, (3396.19 - 3376.20) / 3396.19).unwrap()
    }

    fn assert_close(a: &[f64; 3], b: &[f64; 3], rel: f64) {
        let scale = a.iter().fold(1.0_f64, |m, x| m.max(x.abs()));
        for i in 0..3 {
            assert!(
                (a[i] - b[i]).abs() <= rel * scale,
                "axis {i}: {:.12e} != {:.12e}",
                a[i],
                b[i]
            );
        }
    }

    #[test]
    fn invalid_spheroids() {
        assert!(Spheroid::new(0.0, 0.0).is_err());
        assert!(Spheroid::new(-1.0, 0.0).is_err());
        assert!(Spheroid::new(1.0, 1.0).is_err());
        assert!(Spheroid::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn sphere_reduces_to_latitudinal() {
        let sphere = Spheroid::new(3389.5, 0.0).unwrap();
        let g = rect_to_geodetic(&[3389.5 + 10.0, 0.0, 0.0], &sphere).unwrap();
        assert!(g.lat_rad.abs() < 1e-15);
        assert!((g.alt - 10.0).abs() < 1e-9);
    }

    #[test]
    fn equator_and_pole_altitudes() {
        let m = mars();
        let eq = rect_to_geodetic(&[3400.0, 0.0, 0.0], &m).unwrap();
        assert!((eq.alt - (3400.0 - 3396.19)).abs() < 1e-9);
        let pole = rect_to_geodetic(&[0.0, 0.0, -3380.0], &m).unwrap();
        assert!((pole.lat_rad + FRAC_PI_2).abs() < 1e-15);
        assert!((pole.alt - (3380.0 - m.polar_radius())).abs() < 1e-9);
    }

    #[test]
    fn geodetic_roundtrip_on_mars() {
        let m = mars();
        for xyz in [
            [1200.0, -2500.0, 2100.0],
            [-3000.0, 50.0, -1700.0],
            [10.0, 20.0, 3370.0],
            [6000.0, 6000.0, 100.0],
        ] {
            let g = rect_to_geodetic(&xyz, &m).unwrap();
            let back = geodetic_to_rect(g.lon_rad, g.lat_rad, g.alt, &m);
            assert_close(&xyz, &back, 1e-12);
        }
    }

    #[test]
    fn west_longitudes_are_mirrored() {
        let m = mars();
        let xyz = [0.0, 3396.19, 0.0];
        let east = rect_to_planetographic(&xyz, &m, LongitudeSense::East).unwrap();
        let west = rect_to_planetographic(&xyz, &m, LongitudeSense::West).unwrap();
        assert!((east.lon_rad - FRAC_PI_2).abs() < 1e-15);
        assert!((west.lon_rad - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn planetographic_roundtrip() {
        let m = mars();
        let xyz = [-1500.0, -2200.0, 1900.0];
        for sense in [LongitudeSense::East, LongitudeSense::West] {
            let g = rect_to_planetographic(&xyz, &m, sense).unwrap();
            assert!((0.0..TAU).contains(&g.lon_rad));
            let back = planetographic_to_rect(g.lon_rad, g.lat_rad, g.alt, &m, sense);
            assert_close(&xyz, &back, 1e-12);
        }
    }

    #[test]
    fn wrap_stays_below_tau() {
        assert_eq!(wrap_two_pi(-1e-300), 0.0);
        assert!((wrap_two_pi(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-15);
    }
}
