//! Julian Date ↔ proleptic Gregorian calendar conversions.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TDB).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in one Julian day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

const MONTH_ABBREVS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Convert a calendar date (with fractional day) to a Julian Date.
///
/// Uses the proleptic Gregorian calendar. `day` may carry the time of day
/// as a fraction, e.g. `1.5` is noon on the first.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as i64 - 1, month as i64 + 12)
    } else {
        (year as i64, month as i64)
    };
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * (y + 4716) as f64).floor() + (30.6001 * (m + 1) as f64).floor() + day + b as f64
        - 1524.5
}

/// Convert a Julian Date to `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian Date → seconds past J2000.0 on the same time scale.
pub fn jd_to_tdb_seconds(jd: f64) -> f64 {
    (jd - J2000_JD) * SECONDS_PER_DAY
}

/// Seconds past J2000.0 → Julian Date on the same time scale.
pub fn tdb_seconds_to_jd(seconds: f64) -> f64 {
    J2000_JD + seconds / SECONDS_PER_DAY
}

/// Month number (1–12) from a case-insensitive English month name.
///
/// Accepts the three-letter abbreviation or any longer prefix of the full
/// name (`"DEC"`, `"Dec"`, `"December"`).
pub fn month_from_abbrev(name: &str) -> Option<u32> {
    if name.len() < 3 {
        return None;
    }
    let upper = name.to_ascii_uppercase();
    let prefix = &upper[..3];
    let index = MONTH_ABBREVS.iter().position(|m| *m == prefix)?;
    let full = FULL_MONTHS[index];
    if full.starts_with(upper.as_str()) {
        Some(index as u32 + 1)
    } else {
        None
    }
}

const FULL_MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    Some(days)
}

/// Whole days from 2000-01-01 to the given proleptic Gregorian date.
pub fn days_since_2000(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let year_of_era = y - era * 400;
    let m = i64::from(month);
    let shifted_month = if m > 2 { m - 3 } else { m + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    // The era count starts at 0000-03-01, 730_425 days before 2000-01-01.
    era * 146_097 + day_of_era - 730_425
}

/// Convert a day-of-year (1-based) into `(month, day)`.
pub fn day_of_year_to_month_day(year: i32, day_of_year: u32) -> Option<(u32, u32)> {
    let mut remaining = day_of_year;
    if remaining == 0 {
        return None;
    }
    for month in 1..=12 {
        let len = days_in_month(year, month)?;
        if remaining <= len {
            return Some((month, remaining));
        }
        remaining -= len;
    }
    None
}
