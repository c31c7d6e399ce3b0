//! Human-readable time strings.
//!
//! Accepted forms (case-insensitive, optional trailing scale `UTC`, `TDB`,
//! `TT` or `TDT`; UTC when omitted):
//!
//! ```text
//! 2026-12-03 08:15:00.00        ISO calendar, space or T separator
//! 2026-12-03T08:15:00Z
//! 2026 DEC 03 08:15             month name, year first
//! 03-DEC-2026 08:15:30          month name, day first
//! 2026-337T08:15:00             day of year
//! JD 2461377.84375 TDB          Julian Date
//! ```

use crate::error::TimeError;
use crate::julian::{day_of_year_to_month_day, jd_to_tdb_seconds, month_from_abbrev};
use crate::scales::{self, LskData};
use crate::utc_time::CalendarTime;

/// Time scale named by a time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScale {
    Utc,
    Tt,
    Tdb,
}

/// The instant written in a time string, before scale conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeInstant {
    Calendar(CalendarTime),
    JulianDate(f64),
}

/// A parsed time string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedTime {
    pub instant: TimeInstant,
    pub scale: TimeScale,
}

impl ParsedTime {
    /// Seconds past J2000 on the string's own scale.
    pub fn seconds_past_j2000(&self) -> f64 {
        match self.instant {
            TimeInstant::Calendar(cal) => cal.to_seconds_past_j2000(),
            TimeInstant::JulianDate(jd) => jd_to_tdb_seconds(jd),
        }
    }

    /// Convert to TDB seconds past J2000.
    ///
    /// UTC strings need leap-second data; TT and TDB strings do not.
    pub fn to_tdb_seconds(&self, lsk: Option<&LskData>) -> Result<f64, TimeError> {
        let s = self.seconds_past_j2000();
        match self.scale {
            TimeScale::Tdb => Ok(s),
            TimeScale::Tt => match lsk {
                Some(lsk) => Ok(scales::tt_to_tdb(s, lsk)),
                // TDB − TT stays under 2 ms; without DELTET constants TT is
                // taken as TDB.
                None => Ok(s),
            },
            TimeScale::Utc => {
                let lsk = lsk.ok_or(TimeError::NoLeapSeconds)?;
                Ok(scales::utc_to_tdb(s, lsk))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Item<'a> {
    Num(&'a str),
    Colon,
}

/// Parse a time string into its instant and scale.
pub fn parse_time_string(input: &str) -> Result<ParsedTime, TimeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeError::invalid(input, "empty time string"));
    }

    let mut scale = TimeScale::Utc;
    let mut scale_seen = false;
    let mut julian = false;
    let mut month: Option<u32> = None;
    let mut items: Vec<Item<'_>> = Vec::new();

    let bytes = trimmed.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_digit() || c == b'.' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            items.push(Item::Num(&trimmed[start..i]));
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word = trimmed[start..i].to_ascii_uppercase();
            match word.as_str() {
                "T" | "Z" => {}
                "JD" => julian = true,
                "UTC" | "TDB" | "TT" | "TDT" => {
                    if scale_seen {
                        return Err(TimeError::invalid(input, "more than one time scale"));
                    }
                    scale_seen = true;
                    scale = match word.as_str() {
                        "UTC" => TimeScale::Utc,
                        "TDB" => TimeScale::Tdb,
                        _ => TimeScale::Tt,
                    };
                }
                other => match month_from_abbrev(other) {
                    Some(_) if month.is_some() => {
                        return Err(TimeError::invalid(input, "more than one month name"));
                    }
                    Some(m) => month = Some(m),
                    None => return Err(TimeError::invalid(input, "unrecognized word")),
                },
            }
        } else if c == b':' {
            items.push(Item::Colon);
            i += 1;
        } else if c == b'-' && is_sign(bytes, i) {
            return Err(TimeError::invalid(input, "signed numeric field"));
        } else if c.is_ascii_whitespace() || matches!(c, b'-' | b'/' | b',') {
            i += 1;
        } else {
            return Err(TimeError::invalid(input, "unexpected character"));
        }
    }

    if julian {
        return parse_julian(input, &items, month, scale);
    }

    let colon = items.iter().position(|item| *item == Item::Colon);
    let (date_items, time_items): (&[Item<'_>], &[Item<'_>]) = match colon {
        Some(0) => return Err(TimeError::invalid(input, "time without an hour field")),
        Some(c) => items.split_at(c - 1),
        None => (&items, &[]),
    };

    let date: Vec<&str> = date_items
        .iter()
        .map(|item| match item {
            Item::Num(n) => Ok(*n),
            Item::Colon => Err(TimeError::invalid(input, "misplaced ':'")),
        })
        .collect::<Result<_, _>>()?;

    let (year, month, day) = parse_date(input, &date, month)?;
    let (hour, minute, second) = parse_clock(input, time_items)?;

    let cal = CalendarTime::new(year, month, day, hour, minute, second);
    if !cal.is_valid() {
        return Err(TimeError::invalid(input, "calendar field out of range"));
    }
    Ok(ParsedTime {
        instant: TimeInstant::Calendar(cal),
        scale,
    })
}

/// A '-' opening a number rather than joining two fields.
fn is_sign(bytes: &[u8], i: usize) -> bool {
    let joins_previous = i
        .checked_sub(1)
        .is_some_and(|p| bytes[p].is_ascii_alphanumeric() || bytes[p] == b'.');
    let opens_number = bytes
        .get(i + 1)
        .is_some_and(|n| n.is_ascii_digit() || *n == b'.');
    opens_number && !joins_previous
}

fn parse_julian(
    input: &str,
    items: &[Item<'_>],
    month: Option<u32>,
    scale: TimeScale,
) -> Result<ParsedTime, TimeError> {
    if month.is_some() {
        return Err(TimeError::invalid(input, "month name in a Julian Date"));
    }
    match items {
        [Item::Num(n)] => {
            let jd: f64 = n
                .parse()
                .map_err(|_| TimeError::invalid(input, "malformed Julian Date"))?;
            Ok(ParsedTime {
                instant: TimeInstant::JulianDate(jd),
                scale,
            })
        }
        _ => Err(TimeError::invalid(input, "Julian Date needs exactly one number")),
    }
}

fn parse_date(
    input: &str,
    fields: &[&str],
    month_word: Option<u32>,
) -> Result<(i32, u32, u32), TimeError> {
    match (month_word, fields) {
        (Some(month), [a, b]) => {
            // Year first when the leading field cannot be a day.
            let a_is_year = a.len() >= 3 || parse_uint(input, a)? > 31;
            let (year, day) = if a_is_year { (a, b) } else { (b, a) };
            Ok((parse_year(input, year)?, month, parse_uint(input, day)?))
        }
        (Some(_), _) => Err(TimeError::invalid(input, "expected day and year around month")),
        (None, [y, m, d]) => Ok((
            parse_year(input, y)?,
            parse_uint(input, m)?,
            parse_uint(input, d)?,
        )),
        (None, [y, doy]) => {
            let year = parse_year(input, y)?;
            let (month, day) = day_of_year_to_month_day(year, parse_uint(input, doy)?)
                .ok_or_else(|| TimeError::invalid(input, "day of year out of range"))?;
            Ok((year, month, day))
        }
        _ => Err(TimeError::invalid(input, "unrecognized date layout")),
    }
}

fn parse_clock(input: &str, items: &[Item<'_>]) -> Result<(u32, u32, f64), TimeError> {
    match items {
        [] => Ok((0, 0, 0.0)),
        [Item::Num(h), Item::Colon, Item::Num(m)] => {
            Ok((parse_uint(input, h)?, parse_uint(input, m)?, 0.0))
        }
        [Item::Num(h), Item::Colon, Item::Num(m), Item::Colon, Item::Num(s)] => {
            let second: f64 = s
                .parse()
                .map_err(|_| TimeError::invalid(input, "malformed seconds"))?;
            Ok((parse_uint(input, h)?, parse_uint(input, m)?, second))
        }
        _ => Err(TimeError::invalid(input, "unrecognized time of day")),
    }
}

fn parse_uint(input: &str, field: &str) -> Result<u32, TimeError> {
    field
        .parse()
        .map_err(|_| TimeError::invalid(input, "expected an integer field"))
}

fn parse_year(input: &str, field: &str) -> Result<i32, TimeError> {
    field
        .parse()
        .map_err(|_| TimeError::invalid(input, "malformed year"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(s: &str) -> CalendarTime {
        match parse_time_string(s).expect(s).instant {
            TimeInstant::Calendar(c) => c,
            TimeInstant::JulianDate(_) => panic!("expected calendar for {s}"),
        }
    }

    #[test]
    fn iso_with_space() {
        let c = calendar("2026-12-03 08:15:00.00");
        assert_eq!((c.year, c.month, c.day, c.hour, c.minute), (2026, 12, 3, 8, 15));
        assert_eq!(c.second, 0.0);
    }

    #[test]
    fn iso_with_t_and_z() {
        let c = calendar("2026-12-03T08:15:30.5Z");
        assert_eq!((c.hour, c.minute), (8, 15));
        assert!((c.second - 30.5).abs() < 1e-12);
    }

    #[test]
    fn month_names_both_orders() {
        let a = calendar("2026 DEC 03 08:15");
        let b = calendar("03-dec-2026 08:15");
        assert_eq!(a, b);
        assert_eq!((a.year, a.month, a.day), (2026, 12, 3));
    }

    #[test]
    fn day_of_year() {
        let c = calendar("2026-337T08:15:00");
        assert_eq!((c.month, c.day), (12, 3));
    }

    #[test]
    fn date_only() {
        let c = calendar("2000-01-01");
        assert_eq!((c.hour, c.minute, c.second), (0, 0, 0.0));
    }

    #[test]
    fn scale_suffix() {
        let p = parse_time_string("2000-01-01 12:00:00 TDB").unwrap();
        assert_eq!(p.scale, TimeScale::Tdb);
        assert_eq!(p.to_tdb_seconds(None).unwrap(), 0.0);
    }

    #[test]
    fn julian_date() {
        let p = parse_time_string("JD 2451545.0 TDB").unwrap();
        assert_eq!(p.instant, TimeInstant::JulianDate(2_451_545.0));
        assert_eq!(p.to_tdb_seconds(None).unwrap(), 0.0);
    }

    #[test]
    fn utc_without_leap_seconds_fails() {
        let p = parse_time_string("2026-12-03 08:15:00").unwrap();
        assert_eq!(p.to_tdb_seconds(None), Err(TimeError::NoLeapSeconds));
    }

    #[test]
    fn calendar_seconds_carry_no_rounding_noise() {
        let p = parse_time_string("03 DEC 2026 1:2").unwrap();
        assert_eq!(p.seconds_past_j2000(), 849_531_720.0);
    }

    #[test]
    fn negative_fields_are_rejected() {
        for bad in ["-2026-12-03", "-2026-12-03 08:15", "2026 -12 03", "03 DEC -2026"] {
            assert!(parse_time_string(bad).is_err(), "accepted {bad:?}");
        }
        assert_eq!(calendar("DEC-03-2026"), CalendarTime::new(2026, 12, 3, 0, 0, 0.0));
        assert_eq!(calendar("2026-12-03"), CalendarTime::new(2026, 12, 3, 0, 0, 0.0));
    }

    #[test]
    fn rejects_garbage() {
        for bad in [
            "",
            "   ",
            "not a date",
            "2026-13-03",
            "2026-02-30 00:00",
            "2026-12-03 25:00",
            "2026-12-03 08:15:00 UTC TDB",
            "2026-12-03 08:15:00:01",
            "2026 DEC JAN 03",
            "JD",
            "2026-12-03 08:15 #",
        ] {
            assert!(
                matches!(
                    parse_time_string(bad),
                    Err(TimeError::InvalidTimeString { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }
}
