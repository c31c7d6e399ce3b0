//! Position/velocity segments of one body relative to another.
//!
//! A segment covers `[start_tdb_s, end_tdb_s]` (TDB seconds past J2000) and
//! holds either a fixed offset or a sequence of Chebyshev records, each
//! covering `mid ± radius` with one coefficient set per axis. Positions are
//! J2000 kilometers; velocities km/s.

use serde::{Deserialize, Serialize};

use crate::chebyshev::value_and_derivative;
use crate::error::KernelError;

/// One Chebyshev record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChebyshevRecord {
    pub mid_tdb_s: f64,
    pub radius_s: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl ChebyshevRecord {
    fn covers(&self, t: f64) -> bool {
        (t - self.mid_tdb_s).abs() <= self.radius_s
    }

    fn state(&self, t: f64) -> ([f64; 3], [f64; 3]) {
        let s = (t - self.mid_tdb_s) / self.radius_s;
        let mut pos = [0.0; 3];
        let mut vel = [0.0; 3];
        for (i, c) in [&self.x, &self.y, &self.z].into_iter().enumerate() {
            let (p, dp) = value_and_derivative(c, s);
            pos[i] = p;
            vel[i] = dp / self.radius_s;
        }
        (pos, vel)
    }
}

/// Segment payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentData {
    Constant {
        position_km: [f64; 3],
        #[serde(default)]
        velocity_km_s: [f64; 3],
    },
    Chebyshev { records: Vec<ChebyshevRecord> },
}

/// State of `target` relative to `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub target: i32,
    pub center: i32,
    pub start_tdb_s: f64,
    pub end_tdb_s: f64,
    pub data: SegmentData,
}

impl Segment {
    /// A fixed offset valid at all epochs.
    pub fn constant(target: i32, center: i32, position_km: [f64; 3]) -> Self {
        Self {
            target,
            center,
            start_tdb_s: f64::MIN,
            end_tdb_s: f64::MAX,
            data: SegmentData::Constant {
                position_km,
                velocity_km_s: [0.0; 3],
            },
        }
    }

    /// Check coverage bounds and record shapes.
    pub fn validate(&self) -> Result<(), KernelError> {
        let invalid = |reason| KernelError::InvalidSegment {
            target: self.target,
            center: self.center,
            reason,
        };
        if self.target == self.center {
            return Err(invalid("target and center are the same body"));
        }
        if self.start_tdb_s.is_nan() || self.end_tdb_s.is_nan() || self.start_tdb_s > self.end_tdb_s {
            return Err(invalid("coverage interval is empty"));
        }
        match &self.data {
            SegmentData::Constant {
                position_km,
                velocity_km_s,
            } => {
                if position_km.iter().chain(velocity_km_s).any(|v| !v.is_finite()) {
                    return Err(invalid("non-finite state"));
                }
            }
            SegmentData::Chebyshev { records } => {
                if records.is_empty() {
                    return Err(invalid("no Chebyshev records"));
                }
                for r in records {
                    if !(r.radius_s.is_finite() && r.radius_s > 0.0) || !r.mid_tdb_s.is_finite() {
                        return Err(invalid("record interval must be finite and positive"));
                    }
                    if r.x.is_empty() || r.y.is_empty() || r.z.is_empty() {
                        return Err(invalid("record needs coefficients on every axis"));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn covers(&self, t: f64) -> bool {
        t >= self.start_tdb_s && t <= self.end_tdb_s
    }

    /// Position (km) and velocity (km/s) at `t`.
    pub fn state(&self, t: f64) -> Result<([f64; 3], [f64; 3]), KernelError> {
        let out_of_range = || KernelError::EpochOutOfRange {
            target: self.target,
            center: self.center,
            epoch_tdb_s: t,
        };
        if !self.covers(t) {
            return Err(out_of_range());
        }
        match &self.data {
            SegmentData::Constant {
                position_km,
                velocity_km_s,
            } => Ok((*position_km, *velocity_km_s)),
            SegmentData::Chebyshev { records } => records
                .iter()
                .find(|r| r.covers(t))
                .map(|r| r.state(t))
                .ok_or_else(out_of_range),
        }
    }
}
