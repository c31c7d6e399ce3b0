//! Named reference frames known to the engine.
//!
//! `J2000` (alias `ICRF`) is the inertial base frame. `ECLIPJ2000` is the
//! mean ecliptic and equinox of J2000. `IAU_<BODY>` is the body-fixed frame
//! of any body with pole and prime-meridian constants in the kernel pool.

use coo_frames::{RotationMatrix3x3, j2000_to_ecliptic_matrix};
use coo_kernel::{KernelError, KernelPool, body_code, normalize_name, pck};

use crate::fault::EngineFault;

/// A resolved frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameId {
    J2000,
    EclipJ2000,
    BodyFixed(i32),
}

impl FrameId {
    /// Resolve a case-insensitive frame name.
    pub fn resolve(pool: &KernelPool, name: &str) -> Result<Self, EngineFault> {
        let upper = normalize_name(name);
        match upper.as_str() {
            "J2000" | "ICRF" => Ok(Self::J2000),
            "ECLIPJ2000" => Ok(Self::EclipJ2000),
            _ => upper
                .strip_prefix("IAU_")
                .and_then(|body| body_code(pool, body))
                .map(Self::BodyFixed)
                .ok_or_else(|| EngineFault::UnknownFrame(name.to_string())),
        }
    }

    /// Rotation from J2000 into this frame at `tdb_s`.
    pub fn from_j2000(self, pool: &KernelPool, tdb_s: f64) -> Result<RotationMatrix3x3, EngineFault> {
        match self {
            Self::J2000 => Ok(RotationMatrix3x3::IDENTITY),
            Self::EclipJ2000 => Ok(j2000_to_ecliptic_matrix()),
            Self::BodyFixed(code) => pck::pole_model(pool, code)
                .map(|m| m.j2000_to_body_fixed(tdb_s))
                .map_err(|e| match e {
                    KernelError::MissingVariable(var) => EngineFault::KernelVarNotFound(var),
                    other => EngineFault::ValueOutOfRange(other.to_string()),
                }),
        }
    }

    /// True for frames whose orientation changes with time.
    pub fn is_rotating(self) -> bool {
        matches!(self, Self::BodyFixed(_))
    }
}

/// Rotation from `from` into `to` at `tdb_s`.
pub fn transform(
    pool: &KernelPool,
    from: FrameId,
    to: FrameId,
    tdb_s: f64,
) -> Result<RotationMatrix3x3, EngineFault> {
    let m_from = from.from_j2000(pool, tdb_s)?;
    let m_to = to.from_j2000(pool, tdb_s)?;
    Ok(m_to.mul(&m_from.transpose()))
}
