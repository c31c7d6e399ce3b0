//! Kernel data for the ephemeris engine.
//!
//! This crate provides:
//! - A NAIF text-kernel pool parser (`\begindata` assignments)
//! - Body name ↔ ID code resolution
//! - Body constants (radii, orientation, longitude sense) from PCK variables
//! - Leap-second data from LSK variables
//! - Ephemeris segments with Chebyshev evaluation

pub mod chebyshev;
pub mod error;
pub mod lsk;
pub mod names;
pub mod pck;
pub mod pool;
pub mod segment;

pub use error::KernelError;
pub use lsk::{has_leap_seconds, lsk_from_pool};
pub use names::{body_code, body_name, normalize_name};
pub use pool::{KernelPool, PoolValue};
pub use segment::{ChebyshevRecord, Segment, SegmentData};
