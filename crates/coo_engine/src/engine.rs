//! The in-process ephemeris engine.

use std::path::Path;

use coo_frames::{Geodetic, Latitudinal, Spheroid};
use coo_kernel::{KernelError, KernelPool, Segment, body_code, has_leap_seconds, lsk_from_pool, pck};
use coo_time::{Epoch, LeapSecondKernel, TimeError};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::ephemeris::{Aberration, RelativeState, relative_j2000};
use crate::fault::EngineFault;
use crate::frames::{FrameId, transform};
use crate::{EngineError, EphemerisEngine};

/// Step for the numerical rotation rate of body-fixed frames, in seconds.
const ROTATION_RATE_STEP_S: f64 = 1.0;

/// Ephemeris engine backed by text kernels and registered segments.
///
/// Every [`EphemerisEngine`] operation follows NAIF's `RETURN` error
/// action: a failing call records its fault, and every later call returns
/// [`EngineFault::PendingFault`] without doing any work until
/// [`EphemerisEngine::reset`] clears the flag.
#[derive(Default)]
pub struct Engine {
    pool: KernelPool,
    segments: Vec<Segment>,
    lsk: Option<LeapSecondKernel>,
    fault: Option<EngineFault>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("pool_variables", &self.pool.len())
            .field("segments", &self.segments.len())
            .field("leap_seconds", &self.lsk.is_some())
            .field("fault", &self.fault)
            .finish()
    }
}

impl Engine {
    /// Create an engine and load every kernel named in `config`.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = Self::default();
        for path in &config.kernel_paths {
            engine.load_kernel(path)?;
        }
        Ok(engine)
    }

    /// Load a text kernel, or a `.json` segment file.
    pub fn load_kernel(&mut self, path: &Path) -> Result<(), EngineError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let segments: Vec<Segment> =
                serde_json::from_str(&text).map_err(|source| EngineError::Segments {
                    path: path.to_path_buf(),
                    source,
                })?;
            let count = segments.len();
            for seg in segments {
                self.add_segment(seg)?;
            }
            info!(path = %path.display(), segments = count, "loaded segment file");
            return Ok(());
        }

        self.pool.load(path)?;
        self.refresh_leap_seconds()
    }

    /// Load text-kernel content held in memory.
    pub fn load_kernel_str(&mut self, content: &str) -> Result<(), EngineError> {
        self.pool.load_str(content)?;
        self.refresh_leap_seconds()
    }

    /// Register an ephemeris segment. Later segments take precedence.
    pub fn add_segment(&mut self, segment: Segment) -> Result<(), EngineError> {
        segment.validate()?;
        debug!(
            target_body = segment.target,
            center = segment.center,
            "segment registered"
        );
        self.segments.push(segment);
        Ok(())
    }

    pub fn pool(&self) -> &KernelPool {
        &self.pool
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn leap_seconds(&self) -> Option<&LeapSecondKernel> {
        self.lsk.as_ref()
    }

    fn refresh_leap_seconds(&mut self) -> Result<(), EngineError> {
        if has_leap_seconds(&self.pool) {
            self.lsk = Some(lsk_from_pool(&self.pool)?);
        }
        Ok(())
    }

    /// Run `op` unless a fault is pending; record any fault it raises.
    fn guarded<T>(
        &mut self,
        operation: &'static str,
        op: impl FnOnce(&Self) -> Result<T, EngineFault>,
    ) -> Result<T, EngineFault> {
        if let Some(pending) = &self.fault {
            return Err(EngineFault::PendingFault(pending.short_name()));
        }
        let out = op(self);
        if let Err(fault) = &out {
            debug!(operation, %fault, "engine fault raised");
            self.fault = Some(fault.clone());
        }
        out
    }

    fn code(&self, name: &str) -> Result<i32, EngineFault> {
        body_code(&self.pool, name).ok_or_else(|| EngineFault::IdCodeNotFound(name.to_string()))
    }

    fn spheroid(re_km: f64, f: f64) -> Result<Spheroid, EngineFault> {
        Spheroid::new(re_km, f).map_err(|e| EngineFault::ValueOutOfRange(e.to_string()))
    }

    fn sense(&self, code: i32) -> Result<coo_frames::LongitudeSense, EngineFault> {
        pck::longitude_sense(&self.pool, code).map_err(|e| match e {
            KernelError::MissingVariable(var) => EngineFault::MissingData(format!(
                "planetographic longitude sense of body {code} needs {var}"
            )),
            other => EngineFault::ValueOutOfRange(other.to_string()),
        })
    }

    fn epoch(&self, text: &str) -> Result<f64, EngineFault> {
        Epoch::parse(text, self.lsk.as_ref())
            .map(Epoch::as_tdb_seconds)
            .map_err(|e| match e {
                TimeError::NoLeapSeconds => EngineFault::NoLeapSeconds,
                other => EngineFault::InvalidTimeString(other.to_string()),
            })
    }

    fn radii(&self, body: &str) -> Result<Vec<f64>, EngineFault> {
        let code = self.code(body)?;
        pck::radii(&self.pool, code)
            .map(<[f64]>::to_vec)
            .map_err(|e| match e {
                KernelError::MissingVariable(var) => EngineFault::KernelVarNotFound(var),
                other => EngineFault::ValueOutOfRange(other.to_string()),
            })
    }

    fn state(
        &self,
        target: &str,
        tdb_s: f64,
        frame: &str,
        aberration: Aberration,
        observer: &str,
    ) -> Result<RelativeState, EngineFault> {
        if !tdb_s.is_finite() {
            return Err(EngineFault::ValueOutOfRange("epoch must be finite".into()));
        }
        let target_code = self.code(target)?;
        let observer_code = self.code(observer)?;
        let frame_id = FrameId::resolve(&self.pool, frame)?;

        let j2000 = relative_j2000(&self.segments, target_code, observer_code, tdb_s, aberration)?;
        let m = frame_id.from_j2000(&self.pool, tdb_s)?;
        let position_km = m.apply(&j2000.position_km);
        let mut velocity_km_s = m.apply(&j2000.velocity_km_s);

        if frame_id.is_rotating() {
            // v' = M v + (dM/dt) r, with dM/dt by central difference.
            let h = ROTATION_RATE_STEP_S;
            let ahead = frame_id.from_j2000(&self.pool, tdb_s + h)?.apply(&j2000.position_km);
            let behind = frame_id.from_j2000(&self.pool, tdb_s - h)?.apply(&j2000.position_km);
            for i in 0..3 {
                velocity_km_s[i] += (ahead[i] - behind[i]) / (2.0 * h);
            }
        }

        Ok(RelativeState {
            position_km,
            velocity_km_s,
            light_time_s: j2000.light_time_s,
        })
    }

    fn rotation(&self, from: &str, to: &str, tdb_s: f64) -> Result<[[f64; 3]; 3], EngineFault> {
        if !tdb_s.is_finite() {
            return Err(EngineFault::ValueOutOfRange("epoch must be finite".into()));
        }
        let from_id = FrameId::resolve(&self.pool, from)?;
        let to_id = FrameId::resolve(&self.pool, to)?;
        transform(&self.pool, from_id, to_id, tdb_s).map(|m| *m.rows())
    }
}

impl EphemerisEngine for Engine {
    fn resolve_epoch(&mut self, text: &str) -> Result<f64, EngineFault> {
        self.guarded("resolve_epoch", |e| e.epoch(text))
    }

    fn lookup_radii(&mut self, body: &str) -> Result<Vec<f64>, EngineFault> {
        self.guarded("lookup_radii", |e| e.radii(body))
    }

    fn relative_state(
        &mut self,
        target: &str,
        tdb_s: f64,
        frame: &str,
        aberration: Aberration,
        observer: &str,
    ) -> Result<RelativeState, EngineFault> {
        self.guarded("relative_state", |e| {
            e.state(target, tdb_s, frame, aberration, observer)
        })
    }

    fn frame_transform(
        &mut self,
        from: &str,
        to: &str,
        tdb_s: f64,
    ) -> Result<[[f64; 3]; 3], EngineFault> {
        self.guarded("frame_transform", |e| e.rotation(from, to, tdb_s))
    }

    fn rect_to_planetographic(
        &mut self,
        body: &str,
        rect_km: &[f64; 3],
        re_km: f64,
        f: f64,
    ) -> Result<Geodetic, EngineFault> {
        self.guarded("rect_to_planetographic", |e| {
            let sense = e.sense(e.code(body)?)?;
            let spheroid = Self::spheroid(re_km, f)?;
            coo_frames::rect_to_planetographic(rect_km, &spheroid, sense)
                .map_err(|err| EngineFault::ValueOutOfRange(err.to_string()))
        })
    }

    fn planetographic_to_rect(
        &mut self,
        body: &str,
        lon_rad: f64,
        lat_rad: f64,
        alt_km: f64,
        re_km: f64,
        f: f64,
    ) -> Result<[f64; 3], EngineFault> {
        self.guarded("planetographic_to_rect", |e| {
            let sense = e.sense(e.code(body)?)?;
            let spheroid = Self::spheroid(re_km, f)?;
            if !(lon_rad.is_finite() && lat_rad.is_finite() && alt_km.is_finite()) {
                return Err(EngineFault::ValueOutOfRange(
                    "planetographic coordinates must be finite".into(),
                ));
            }
            Ok(coo_frames::planetographic_to_rect(
                lon_rad, lat_rad, alt_km, &spheroid, sense,
            ))
        })
    }

    fn rect_to_latitudinal(&mut self, rect_km: &[f64; 3]) -> Result<Latitudinal, EngineFault> {
        self.guarded("rect_to_latitudinal", |_| {
            coo_frames::rect_to_latitudinal(rect_km).map_err(|err| match err {
                coo_frames::FrameError::ZeroVector => {
                    EngineFault::ZeroVector("rectangular coordinates are the zero vector")
                }
                other => EngineFault::ValueOutOfRange(other.to_string()),
            })
        })
    }

    fn failed(&self) -> bool {
        self.fault.is_some()
    }

    fn last_fault(&self) -> Option<&EngineFault> {
        self.fault.as_ref()
    }

    fn reset(&mut self) {
        self.fault = None;
    }
}
