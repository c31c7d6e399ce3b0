//! Segment chaining and light-time correction.
//!
//! A body's state is accumulated along its segment chain (target → center
//! → center's center …) until a body with no segments is reached. Two
//! bodies can be differenced only when their chains end at the same root,
//! normally the solar system barycenter.

use coo_frames::vector::{add, norm, sub};
use coo_kernel::Segment;
use serde::{Deserialize, Serialize};

use crate::fault::EngineFault;

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

const MAX_CHAIN_DEPTH: usize = 64;
const MAX_LIGHT_TIME_ITERATIONS: usize = 10;

/// Aberration correction applied to a relative state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aberration {
    /// Geometric state.
    #[default]
    None,
    /// Target position at the light-time-retarded epoch.
    #[serde(alias = "LT")]
    LightTime,
}

impl Aberration {
    /// NAIF correction string.
    pub fn as_naif(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::LightTime => "LT",
        }
    }
}

impl std::str::FromStr for Aberration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "LT" | "LIGHT_TIME" => Ok(Self::LightTime),
            other => Err(format!("unsupported aberration correction '{other}'")),
        }
    }
}

/// State of one body relative to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeState {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
    /// One-way light time between observer and target in seconds.
    pub light_time_s: f64,
}

/// Position and velocity of `code` relative to the root of its chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChainState {
    pub root: i32,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Walk the segment chain of `code` at `t`. Later segments win.
pub(crate) fn chain_state(segments: &[Segment], code: i32, t: f64) -> Result<ChainState, EngineFault> {
    let mut state = ChainState {
        root: code,
        position_km: [0.0; 3],
        velocity_km_s: [0.0; 3],
    };
    let mut current = code;

    for _ in 0..MAX_CHAIN_DEPTH {
        let body = current;
        let mut candidates = segments
            .iter()
            .rev()
            .filter(move |s| s.target == body)
            .peekable();
        let newest = candidates.peek().copied();

        let Some(seg) = candidates.find(|s| s.covers(t)) else {
            if let Some(newest) = newest {
                return Err(EngineFault::SpkInsuffData {
                    target: current,
                    observer: newest.center,
                    epoch_tdb_s: t,
                });
            }
            state.root = current;
            return Ok(state);
        };

        let (p, v) = seg.state(t).map_err(|_| EngineFault::SpkInsuffData {
            target: seg.target,
            observer: seg.center,
            epoch_tdb_s: t,
        })?;
        state.position_km = add(&state.position_km, &p);
        state.velocity_km_s = add(&state.velocity_km_s, &v);
        current = seg.center;
    }

    Err(EngineFault::ValueOutOfRange(format!(
        "segment chain of body {code} is deeper than {MAX_CHAIN_DEPTH}"
    )))
}

/// Geometric or light-time corrected state of `target` w.r.t. `observer`
/// in J2000.
pub(crate) fn relative_j2000(
    segments: &[Segment],
    target: i32,
    observer: i32,
    t: f64,
    aberration: Aberration,
) -> Result<RelativeState, EngineFault> {
    let obs = chain_state(segments, observer, t)?;
    let insufficient = || EngineFault::SpkInsuffData {
        target,
        observer,
        epoch_tdb_s: t,
    };

    let at = |epoch: f64| -> Result<([f64; 3], [f64; 3]), EngineFault> {
        let tgt = chain_state(segments, target, epoch)?;
        if tgt.root != obs.root {
            return Err(insufficient());
        }
        Ok((
            sub(&tgt.position_km, &obs.position_km),
            sub(&tgt.velocity_km_s, &obs.velocity_km_s),
        ))
    };

    let (mut pos, mut vel) = at(t)?;
    let mut lt = norm(&pos) / SPEED_OF_LIGHT_KM_S;

    if aberration == Aberration::LightTime {
        for _ in 0..MAX_LIGHT_TIME_ITERATIONS {
            let (p, v) = at(t - lt)?;
            let next = norm(&p) / SPEED_OF_LIGHT_KM_S;
            pos = p;
            vel = v;
            let converged = (next - lt).abs() <= 1e-12 * next.max(1e-300);
            lt = next;
            if converged {
                break;
            }
        }
    }

    Ok(RelativeState {
        position_km: pos,
        velocity_km_s: vel,
        light_time_s: lt,
    })
}
