//! UTC → TAI → TT → TDB conversion chain (and inverse).
//!
//! TDB − TT uses the single-term DELTET model of the NAIF leapseconds
//! kernel: `K · sin(E)`, with `E = M + EB · sin(M)` and
//! `M = M0 + M1 · t` where `t` is TT seconds past J2000.

use crate::error::TimeError;

/// Leap-second table plus the DELTET constants of a leapseconds kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct LskData {
    /// TT − TAI in seconds (DELTET/DELTA_T_A).
    pub delta_t_a: f64,
    /// Amplitude of the TDB − TT term in seconds (DELTET/K).
    pub k: f64,
    /// Eccentricity used in the Kepler equation (DELTET/EB).
    pub eb: f64,
    /// Mean anomaly at J2000.0 in radians (DELTET/M[0]).
    pub m0: f64,
    /// Mean anomaly rate in rad/s (DELTET/M[1]).
    pub m1: f64,
    /// `(delta_AT, utc_seconds_past_j2000)`, sorted by epoch.
    pub leap_seconds: Vec<(f64, f64)>,
}

impl LskData {
    /// Validate and sort the leap-second table.
    pub fn new(
        delta_t_a: f64,
        k: f64,
        eb: f64,
        m: [f64; 2],
        mut leap_seconds: Vec<(f64, f64)>,
    ) -> Result<Self, TimeError> {
        if leap_seconds.is_empty() {
            return Err(TimeError::LeapTable("leap-second table is empty".into()));
        }
        if leap_seconds
            .iter()
            .any(|(dat, epoch)| !dat.is_finite() || !epoch.is_finite())
        {
            return Err(TimeError::LeapTable(
                "leap-second table contains non-finite values".into(),
            ));
        }
        leap_seconds.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(Self {
            delta_t_a,
            k,
            eb,
            m0: m[0],
            m1: m[1],
            leap_seconds,
        })
    }

    /// TAI − UTC at a UTC instant. Instants before the first entry use the
    /// first entry's offset.
    pub fn delta_at_for_utc(&self, utc_s: f64) -> f64 {
        let mut delta = self.leap_seconds[0].0;
        for &(dat, epoch) in &self.leap_seconds {
            if utc_s >= epoch {
                delta = dat;
            } else {
                break;
            }
        }
        delta
    }

    /// TAI − UTC at a TAI instant.
    fn delta_at_for_tai(&self, tai_s: f64) -> f64 {
        let mut delta = self.leap_seconds[0].0;
        for &(dat, epoch) in &self.leap_seconds {
            if tai_s >= epoch + dat {
                delta = dat;
            } else {
                break;
            }
        }
        delta
    }

    /// TDB − TT at a TT instant.
    pub fn tdb_minus_tt(&self, tt_s: f64) -> f64 {
        let m = self.m0 + self.m1 * tt_s;
        let e = m + self.eb * m.sin();
        self.k * e.sin()
    }
}

/// UTC seconds past J2000 → TDB seconds past J2000.
pub fn utc_to_tdb(utc_s: f64, lsk: &LskData) -> f64 {
    let tai = utc_s + lsk.delta_at_for_utc(utc_s);
    tt_to_tdb(tai + lsk.delta_t_a, lsk)
}

/// TDB seconds past J2000 → UTC seconds past J2000.
pub fn tdb_to_utc(tdb_s: f64, lsk: &LskData) -> f64 {
    let tai = tdb_to_tt(tdb_s, lsk) - lsk.delta_t_a;
    tai - lsk.delta_at_for_tai(tai)
}

/// TT seconds past J2000 → TDB seconds past J2000.
pub fn tt_to_tdb(tt_s: f64, lsk: &LskData) -> f64 {
    tt_s + lsk.tdb_minus_tt(tt_s)
}

/// TDB seconds past J2000 → TT seconds past J2000.
///
/// Fixed-point iteration; the correction is under 2 ms so three passes
/// settle far below a nanosecond.
pub fn tdb_to_tt(tdb_s: f64, lsk: &LskData) -> f64 {
    let mut tt = tdb_s;
    for _ in 0..3 {
        tt = tdb_s - lsk.tdb_minus_tt(tt);
    }
    tt
}
