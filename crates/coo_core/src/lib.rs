//! Coordinate and reference-frame transformations for planetary surface
//! visualization.
//!
//! Five operations sit on top of any [`EphemerisEngine`]:
//!
//! - [`resolve_epoch`]: timestamp → TDB epoch
//! - [`xyz_to_lat_lon_rad`], [`xyz_to_lat_lon_alt`], [`lat_lon_alt_to_xyz`]:
//!   Cartesian ↔ spherical/planetographic in meters and degrees
//! - [`get_rel_state`]: target position plus a right-handed basis aimed at
//!   the target
//! - [`get_frame_transform`]: frame-to-frame rotation at a timestamp
//!
//! Every engine call goes through [`try_compute`], which leaves the engine's
//! fault flag clear on return. Use [`SharedEngine`] when several threads
//! share one engine.

pub mod config;
pub mod epoch;
pub mod error;
pub mod frame_transform;
pub mod guard;
pub mod logging;
pub mod planetographic;
pub mod relstate;
pub mod shape;

pub use config::{ConfigError, CooConfig, DEFAULT_PARALLEL_TOLERANCE, TransformConfig};
pub use coo_engine::{Aberration, EphemerisEngine};
pub use coo_frames::RotationMatrix3x3;
pub use coo_time::Epoch;
pub use epoch::resolve_epoch;
pub use error::{CooError, ErrorKind};
pub use frame_transform::get_frame_transform;
pub use guard::{SharedEngine, try_compute};
pub use logging::{LogConfig, LogError, LoggingGuard, init_logging};
pub use planetographic::{
    LatLonAlt, LatLonRad, METERS_PER_KM, lat_lon_alt_to_xyz, xyz_to_lat_lon_alt,
    xyz_to_lat_lon_rad,
};
pub use relstate::{RelState, RelStateRequest, get_rel_state, orthonormal_basis};
pub use shape::{ShapeModel, lookup_shape};
