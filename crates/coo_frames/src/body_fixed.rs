//! IAU body-fixed frames from pole and prime-meridian polynomials.
//!
//! The pole right ascension α and declination δ are quadratic polynomials
//! in Julian centuries of TDB past J2000; the prime meridian angle W is a
//! quadratic in days. The J2000 → body-fixed rotation is
//! `R3(W) · R1(π/2 − δ) · R3(π/2 + α)`.

use std::f64::consts::FRAC_PI_2;

use crate::matrix::RotationMatrix3x3;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Orientation polynomials of a body, all in degrees.
///
/// `ra` and `dec` coefficients are per century and century²; `pm`
/// coefficients are per day and day².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleModel {
    pub ra: [f64; 3],
    pub dec: [f64; 3],
    pub pm: [f64; 3],
}

/// Pole and prime-meridian angles at an epoch, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyAngles {
    pub ra: f64,
    pub dec: f64,
    pub w: f64,
}

impl PoleModel {
    /// Build from coefficient slices of up to three terms, missing terms
    /// taken as zero.
    pub fn from_coefficients(ra: &[f64], dec: &[f64], pm: &[f64]) -> Self {
        Self {
            ra: pad(ra),
            dec: pad(dec),
            pm: pad(pm),
        }
    }

    /// Angles at `tdb_seconds` past J2000.
    pub fn angles(&self, tdb_seconds: f64) -> BodyAngles {
        let d = tdb_seconds / SECONDS_PER_DAY;
        let t = d / DAYS_PER_CENTURY;
        BodyAngles {
            ra: poly(&self.ra, t).to_radians(),
            dec: poly(&self.dec, t).to_radians(),
            w: poly(&self.pm, d).to_radians(),
        }
    }

    /// Prime meridian rate in degrees per day at J2000.
    pub fn pm_rate_deg_per_day(&self) -> f64 {
        self.pm[1]
    }

    /// Rotation taking J2000 vectors into the body-fixed frame.
    pub fn j2000_to_body_fixed(&self, tdb_seconds: f64) -> RotationMatrix3x3 {
        let a = self.angles(tdb_seconds);
        RotationMatrix3x3::about_z(a.w)
            .mul(&RotationMatrix3x3::about_x(FRAC_PI_2 - a.dec))
            .mul(&RotationMatrix3x3::about_z(FRAC_PI_2 + a.ra))
    }
}

fn pad(c: &[f64]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (dst, src) in out.iter_mut().zip(c) {
        *dst = *src;
    }
    out
}

fn poly(c: &[f64; 3], x: f64) -> f64 {
    c[0] + x * (c[1] + x * c[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mars() -> PoleModel {
        PoleModel::from_coefficients(
            &[317.68143, -0.1061],
            &[52.88650, -0.0609],
            &[176.630, 350.89198226],
        )
    }

    #[test]
    fn missing_terms_are_zero() {
        let m = PoleModel::from_coefficients(&[1.0], &[], &[2.0, 3.0]);
        assert_eq!(m.ra, [1.0, 0.0, 0.0]);
        assert_eq!(m.dec, [0.0; 3]);
        assert_eq!(m.pm, [2.0, 3.0, 0.0]);
    }

    #[test]
    fn matrix_is_a_rotation() {
        for t in [0.0, 1.0e8, -3.3e8] {
            assert!(mars().j2000_to_body_fixed(t).is_rotation(1e-12));
        }
    }

    #[test]
    fn third_row_is_the_pole() {
        let m = mars();
        let a = m.angles(0.0);
        let pole = [
            a.dec.cos() * a.ra.cos(),
            a.dec.cos() * a.ra.sin(),
            a.dec.sin(),
        ];
        let row = m.j2000_to_body_fixed(0.0).row(2);
        for i in 0..3 {
            assert!((row[i] - pole[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn pole_maps_to_plus_z() {
        let m = mars();
        let a = m.angles(5.0e7);
        let pole = [
            a.dec.cos() * a.ra.cos(),
            a.dec.cos() * a.ra.sin(),
            a.dec.sin(),
        ];
        let bf = m.j2000_to_body_fixed(5.0e7).apply(&pole);
        assert!((bf[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn earth_like_pole_at_j2000_is_spin_about_z() {
        let m = PoleModel::from_coefficients(&[0.0], &[90.0], &[190.147, 360.9856235]);
        let r = m.j2000_to_body_fixed(0.0);
        let expected = RotationMatrix3x3::about_z((190.147_f64 + 90.0).to_radians());
        for i in 0..3 {
            for j in 0..3 {
                assert!((r.rows()[i][j] - expected.rows()[i][j]).abs() < 1e-12);
            }
        }
    }
}
