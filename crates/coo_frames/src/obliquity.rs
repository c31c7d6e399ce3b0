//! Mean obliquity of the ecliptic at J2000.0.
//!
//! IAU 1976 value, 84381.448″, the angle NAIF uses to define the
//! `ECLIPJ2000` frame.

/// Obliquity at J2000.0 in arcseconds.
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.448;

/// Obliquity at J2000.0 in degrees.
pub const OBLIQUITY_J2000_DEG: f64 = OBLIQUITY_J2000_ARCSEC / 3600.0;

/// Obliquity at J2000.0 in radians.
pub const OBLIQUITY_J2000_RAD: f64 = OBLIQUITY_J2000_DEG * std::f64::consts::PI / 180.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees() {
        assert!((OBLIQUITY_J2000_DEG - 23.439_291_111).abs() < 1e-9);
    }

    #[test]
    fn radians_match_degrees() {
        assert!((OBLIQUITY_J2000_RAD - OBLIQUITY_J2000_DEG.to_radians()).abs() < 1e-15);
    }
}
