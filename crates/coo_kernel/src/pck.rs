//! Body constants from planetary-constants (PCK) text kernels.
//!
//! Variables follow the NAIF `BODY<code>_<ITEM>` convention: `RADII`,
//! `POLE_RA`, `POLE_DEC`, `PM` and `PGR_POSITIVE_LON`.

use coo_frames::{LongitudeSense, PoleModel};

use crate::error::KernelError;
use crate::names::{EARTH, MOON, SUN};
use crate::pool::KernelPool;

/// Pool variable name for a body constant.
pub fn body_var(code: i32, item: &str) -> String {
    format!("BODY{code}_{item}")
}

/// `BODY<code>_RADII` values, of whatever length the kernel supplied.
pub fn radii(pool: &KernelPool, code: i32) -> Result<&[f64], KernelError> {
    pool.require_numbers(&body_var(code, "RADII"))
}

/// Pole and prime-meridian polynomials of a body.
pub fn pole_model(pool: &KernelPool, code: i32) -> Result<PoleModel, KernelError> {
    let ra = pool.require_numbers(&body_var(code, "POLE_RA"))?;
    let dec = pool.require_numbers(&body_var(code, "POLE_DEC"))?;
    let pm = pool.require_numbers(&body_var(code, "PM"))?;
    Ok(PoleModel::from_coefficients(ra, dec, pm))
}

/// Direction of increasing planetographic longitude.
///
/// Earth, Moon and Sun are positive east by convention. Other bodies use
/// `BODY<code>_PGR_POSITIVE_LON` when present, and otherwise their spin:
/// prograde rotators (positive PM rate) are positive west.
pub fn longitude_sense(pool: &KernelPool, code: i32) -> Result<LongitudeSense, KernelError> {
    if matches!(code, EARTH | MOON | SUN) {
        return Ok(LongitudeSense::East);
    }

    let name = body_var(code, "PGR_POSITIVE_LON");
    if let Some(values) = pool.strings(&name) {
        return match values.first().map(|s| s.trim().to_ascii_uppercase()).as_deref() {
            Some("EAST") => Ok(LongitudeSense::East),
            Some("WEST") => Ok(LongitudeSense::West),
            _ => Err(KernelError::BadVariable {
                name,
                reason: "expected 'EAST' or 'WEST'".into(),
            }),
        };
    }

    let pm_name = body_var(code, "PM");
    let pm = pool.require_numbers(&pm_name)?;
    match pm.get(1) {
        Some(rate) if *rate >= 0.0 => Ok(LongitudeSense::West),
        Some(_) => Ok(LongitudeSense::East),
        None => Err(KernelError::BadVariable {
            name: pm_name,
            reason: "needs a rate term".into(),
        }),
    }
}
