//! Geometry helpers for planetary coordinate transforms.
//!
//! Provides vector and rotation-matrix primitives, frame rotations
//! (J2000 ↔ ecliptic J2000, J2000 → IAU body-fixed) and coordinate
//! conversions (Cartesian ↔ latitudinal, geodetic and planetographic).

pub mod body_fixed;
pub mod error;
pub mod matrix;
pub mod obliquity;
pub mod planetographic;
pub mod rotation;
pub mod spherical;
pub mod vector;

pub use body_fixed::{BodyAngles, PoleModel};
pub use error::FrameError;
pub use matrix::RotationMatrix3x3;
pub use obliquity::{OBLIQUITY_J2000_ARCSEC, OBLIQUITY_J2000_DEG, OBLIQUITY_J2000_RAD};
pub use planetographic::{
    Geodetic, LongitudeSense, Spheroid, geodetic_to_rect, planetographic_to_rect,
    rect_to_geodetic, rect_to_planetographic,
};
pub use rotation::{ecliptic_to_icrf, icrf_to_ecliptic, j2000_to_ecliptic_matrix};
pub use spherical::{Latitudinal, rect_to_latitudinal};
