//! ICRF/J2000 ↔ ecliptic J2000 rotation.

use crate::matrix::RotationMatrix3x3;
use crate::obliquity::OBLIQUITY_J2000_RAD;

/// Rotation taking J2000 equatorial vectors into the J2000 ecliptic frame.
pub fn j2000_to_ecliptic_matrix() -> RotationMatrix3x3 {
    RotationMatrix3x3::about_x(OBLIQUITY_J2000_RAD)
}

/// Rotate a J2000 equatorial vector into the ecliptic frame.
pub fn icrf_to_ecliptic(v: &[f64; 3]) -> [f64; 3] {
    j2000_to_ecliptic_matrix().apply(v)
}

/// Rotate an ecliptic vector into the J2000 equatorial frame.
pub fn ecliptic_to_icrf(v: &[f64; 3]) -> [f64; 3] {
    j2000_to_ecliptic_matrix().transpose().apply(v)
}
