//! Calendar date/time with sub-second precision.
//!
//! `CalendarTime` carries no time scale of its own; the scale comes from
//! the parsed time string (see [`crate::timestr`]).

use crate::julian::{days_in_month, days_since_2000, jd_to_calendar, tdb_seconds_to_jd};

/// Calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CalendarTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Check field ranges. A 60th second is allowed for leap seconds.
    pub fn is_valid(&self) -> bool {
        let Some(month_len) = days_in_month(self.year, self.month) else {
            return false;
        };
        (1..=month_len).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second >= 0.0
            && self.second < 61.0
    }

    /// Julian Date on the calendar's own time scale.
    pub fn to_jd(&self) -> f64 {
        tdb_seconds_to_jd(self.to_seconds_past_j2000())
    }

    /// Seconds past J2000 on the calendar's own time scale.
    ///
    /// Whole seconds are summed as integers so that only the fractional
    /// second goes through floating point.
    pub fn to_seconds_past_j2000(&self) -> f64 {
        let days = days_since_2000(self.year, self.month, self.day);
        let whole = days * 86_400 - 43_200
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60;
        whole as f64 + self.second
    }

    /// Break a Julian Date back into calendar fields.
    pub fn from_jd(jd: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd);
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * 86_400.0;
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl std::fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}
