//! Time handling for planetary coordinate transforms.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - UTC → TAI → TT → TDB conversion chain (and inverse)
//! - Parsing of human-readable time strings
//! - An `Epoch` type for TDB seconds past J2000

pub mod error;
pub mod julian;
pub mod scales;
pub mod timestr;
pub mod utc_time;

pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, day_of_year_to_month_day,
    days_in_month, is_leap_year, jd_to_calendar, jd_to_tdb_seconds, month_from_abbrev,
    tdb_seconds_to_jd,
};
pub use scales::LskData;
pub use timestr::{ParsedTime, TimeInstant, TimeScale, parse_time_string};
pub use utc_time::CalendarTime;

/// A loaded leap-second table, ready for time conversions.
#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondKernel {
    data: LskData,
}

impl LeapSecondKernel {
    pub fn new(data: LskData) -> Self {
        Self { data }
    }

    /// Access the leap-second data.
    pub fn data(&self) -> &LskData {
        &self.data
    }

    /// Convert UTC seconds past J2000 to TDB seconds past J2000.
    pub fn utc_to_tdb(&self, utc_s: f64) -> f64 {
        scales::utc_to_tdb(utc_s, &self.data)
    }

    /// Convert TDB seconds past J2000 to UTC seconds past J2000.
    pub fn tdb_to_utc(&self, tdb_s: f64) -> f64 {
        scales::tdb_to_utc(tdb_s, &self.data)
    }
}

/// A TDB epoch represented as seconds past J2000.0 ("ephemeris time").
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    tdb_seconds: f64,
}

impl Epoch {
    /// Create an epoch from TDB seconds past J2000.0.
    pub fn from_tdb_seconds(s: f64) -> Self {
        Self { tdb_seconds: s }
    }

    /// Create an epoch from a Julian Date in TDB.
    pub fn from_jd_tdb(jd: f64) -> Self {
        Self {
            tdb_seconds: jd_to_tdb_seconds(jd),
        }
    }

    /// Parse a time string, using `lsk` for UTC inputs.
    pub fn parse(text: &str, lsk: Option<&LeapSecondKernel>) -> Result<Self, TimeError> {
        let parsed = parse_time_string(text)?;
        let tdb_seconds = parsed.to_tdb_seconds(lsk.map(LeapSecondKernel::data))?;
        Ok(Self { tdb_seconds })
    }

    /// TDB seconds past J2000.0.
    pub fn as_tdb_seconds(self) -> f64 {
        self.tdb_seconds
    }

    /// Julian Date in TDB.
    pub fn as_jd_tdb(self) -> f64 {
        tdb_seconds_to_jd(self.tdb_seconds)
    }

    /// Julian centuries of TDB past J2000.0.
    pub fn centuries_past_j2000(self) -> f64 {
        self.tdb_seconds / (SECONDS_PER_DAY * DAYS_PER_CENTURY)
    }

    /// Days of TDB past J2000.0.
    pub fn days_past_j2000(self) -> f64 {
        self.tdb_seconds / SECONDS_PER_DAY
    }
}
