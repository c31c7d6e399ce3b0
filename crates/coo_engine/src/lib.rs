//! Ephemeris engine for planetary coordinate transforms.
//!
//! [`EphemerisEngine`] is the narrow interface the transformation core
//! consumes: epoch parsing, body radii, relative states, frame rotations
//! and planetographic/latitudinal geometry, plus a shared fault flag
//! modeled on NAIF's error subsystem. [`Engine`] implements it over NAIF
//! text kernels and registered ephemeris segments.

use std::path::PathBuf;

use thiserror::Error;

pub mod config;
pub mod engine;
pub mod ephemeris;
pub mod fault;
pub mod frames;

pub use config::EngineConfig;
pub use coo_frames::{Geodetic, Latitudinal};
pub use engine::Engine;
pub use ephemeris::{Aberration, RelativeState, SPEED_OF_LIGHT_KM_S};
pub use fault::EngineFault;
pub use frames::FrameId;

/// Errors from engine construction and kernel loading.
///
/// These never touch the fault flag; only [`EphemerisEngine`] operations do.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Kernel(#[from] coo_kernel::KernelError),
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed segment file {path:?}: {source}")]
    Segments {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Operations the transformation core needs from an ephemeris engine.
///
/// Distances are kilometers, angles radians, epochs TDB seconds past
/// J2000. Body and frame names are case-insensitive.
///
/// Implementations keep one fault flag shared by every operation. A
/// failing operation raises it; while it is raised, operations fail with
/// [`EngineFault::PendingFault`]. Callers must check and
/// [`reset`](Self::reset) after each call.
pub trait EphemerisEngine {
    /// Parse a time string into an epoch.
    fn resolve_epoch(&mut self, text: &str) -> Result<f64, EngineFault>;

    /// Radii of a body; the vector length is the kernel's dimension.
    fn lookup_radii(&mut self, body: &str) -> Result<Vec<f64>, EngineFault>;

    /// State of `target` relative to `observer` in `frame`.
    fn relative_state(
        &mut self,
        target: &str,
        tdb_s: f64,
        frame: &str,
        aberration: Aberration,
        observer: &str,
    ) -> Result<RelativeState, EngineFault>;

    /// Row-major rotation taking `from` vectors into `to` at `tdb_s`.
    fn frame_transform(
        &mut self,
        from: &str,
        to: &str,
        tdb_s: f64,
    ) -> Result<[[f64; 3]; 3], EngineFault>;

    /// Rectangular → planetographic on the spheroid `(re_km, f)`, with the
    /// longitude sense of `body`.
    fn rect_to_planetographic(
        &mut self,
        body: &str,
        rect_km: &[f64; 3],
        re_km: f64,
        f: f64,
    ) -> Result<Geodetic, EngineFault>;

    /// Planetographic → rectangular, inverse of
    /// [`rect_to_planetographic`](Self::rect_to_planetographic).
    fn planetographic_to_rect(
        &mut self,
        body: &str,
        lon_rad: f64,
        lat_rad: f64,
        alt_km: f64,
        re_km: f64,
        f: f64,
    ) -> Result<[f64; 3], EngineFault>;

    /// Rectangular → latitudinal (radius, longitude, latitude).
    fn rect_to_latitudinal(&mut self, rect_km: &[f64; 3]) -> Result<Latitudinal, EngineFault>;

    fn failed(&self) -> bool;

    fn last_fault(&self) -> Option<&EngineFault>;

    fn reset(&mut self);
}
