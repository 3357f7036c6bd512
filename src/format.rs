//! Timestamp formatting
//!
//! Turns the ISO timestamps sent by the analytics API into the short
//! human form shown on chart axes and tooltips, e.g. `Jan 1, 2024, 10:00 AM`.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format: abbreviated month, day, year, 2-digit 12h clock
const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Shown for timestamps that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Naive (offset-less) layouts accepted in addition to RFC 3339
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing layouts tried after RFC 3339, which requires seconds.
/// A trailing `Z` is rewritten to `+00:00` before these are tried.
const OFFSET_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Time zone timestamps are rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DisplayZone {
    Utc,
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl FromStr for DisplayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "utc" | "z" | "gmt" => Ok(DisplayZone::Utc),
            "local" => Ok(DisplayZone::Local),
            _ => parse_offset(trimmed)
                .map(DisplayZone::Fixed)
                .ok_or_else(|| format!("invalid timezone '{}': expected utc, local or +HH:MM", s)),
        }
    }
}

impl TryFrom<String> for DisplayZone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DisplayZone> for String {
    fn from(zone: DisplayZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Utc => f.write_str("utc"),
            DisplayZone::Local => f.write_str("local"),
            DisplayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };

    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Format an API timestamp for display in `zone`.
///
/// Offset-less date-times are read as wall-clock time in `zone`, bare dates
/// as UTC midnight. Anything unparseable becomes [`INVALID_DATE`].
pub fn format_timestamp(raw: &str, zone: DisplayZone) -> String {
    let raw = raw.trim();

    if let Some(dt) = parse_with_offset(raw) {
        return render_in(dt.with_timezone(&Utc), zone);
    }

    if let Some(naive) = parse_naive(raw) {
        return match localize(naive, zone) {
            Some(utc) => render_in(utc, zone),
            None => INVALID_DATE.to_string(),
        };
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return render_in(Utc.from_utc_datetime(&midnight), zone);
        }
    }

    INVALID_DATE.to_string()
}

/// Format an optional API timestamp; a missing date is invalid
pub fn format_optional(raw: Option<&str>, zone: DisplayZone) -> String {
    raw.map(|r| format_timestamp(r, zone))
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn parse_with_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let normalized = match raw.strip_suffix(['Z', 'z']) {
        Some(stem) => format!("{}+00:00", stem),
        None => raw.to_string(),
    };
    OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(&normalized, layout).ok())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
}

fn localize(naive: NaiveDateTime, zone: DisplayZone) -> Option<DateTime<Utc>> {
    match zone {
        DisplayZone::Utc => Some(Utc.from_utc_datetime(&naive)),
        DisplayZone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        DisplayZone::Fixed(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

fn render_in(instant: DateTime<Utc>, zone: DisplayZone) -> String {
    match zone {
        DisplayZone::Utc => instant.format(DISPLAY_FORMAT).to_string(),
        DisplayZone::Local => instant.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        DisplayZone::Fixed(offset) => instant.with_timezone(&offset).format(DISPLAY_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_morning() {
        assert_eq!(
            format_timestamp("2024-01-01T10:00:00Z", DisplayZone::Utc),
            "Jan 1, 2024, 10:00 AM"
        );
    }

    #[test]
    fn test_two_digit_hour_and_pm() {
        assert_eq!(
            format_timestamp("2024-03-09T21:05:00Z", DisplayZone::Utc),
            "Mar 9, 2024, 09:05 PM"
        );
        assert_eq!(
            format_timestamp("2024-12-25T00:30:00Z", DisplayZone::Utc),
            "Dec 25, 2024, 12:30 AM"
        );
    }

    #[test]
    fn test_fractional_seconds_and_offset() {
        assert_eq!(
            format_timestamp("2024-06-15T08:45:12.1234567+02:00", DisplayZone::Utc),
            "Jun 15, 2024, 06:45 AM"
        );
    }

    #[test]
    fn test_offset_without_seconds() {
        assert_eq!(
            format_timestamp("2024-01-01T10:00Z", DisplayZone::Utc),
            "Jan 1, 2024, 10:00 AM"
        );
        assert_eq!(
            format_timestamp("2024-01-01T10:00+05:30", DisplayZone::Utc),
            "Jan 1, 2024, 04:30 AM"
        );
        assert_eq!(
            format_timestamp("2024-01-01T10:00-0100", DisplayZone::Utc),
            "Jan 1, 2024, 11:00 AM"
        );
    }

    #[test]
    fn test_space_separated_with_offset() {
        assert_eq!(
            format_timestamp("2024-01-01 10:00:00Z", DisplayZone::Utc),
            "Jan 1, 2024, 10:00 AM"
        );
        assert_eq!(
            format_timestamp("2024-01-01 22:15:00.5+01:00", DisplayZone::Utc),
            "Jan 1, 2024, 09:15 PM"
        );
    }

    #[test]
    fn test_fixed_zone_shifts_instant() {
        let ist: DisplayZone = "+05:30".parse().unwrap();
        assert_eq!(
            format_timestamp("2024-01-01T10:00:00Z", ist),
            "Jan 1, 2024, 03:30 PM"
        );
    }

    #[test]
    fn test_naive_is_wall_clock_in_zone() {
        let ist: DisplayZone = "+05:30".parse().unwrap();
        assert_eq!(
            format_timestamp("2024-01-01T10:00:00", ist),
            "Jan 1, 2024, 10:00 AM"
        );
        assert_eq!(
            format_timestamp("2024-01-01T10:00:00.5", DisplayZone::Utc),
            "Jan 1, 2024, 10:00 AM"
        );
    }

    #[test]
    fn test_bare_date_is_utc_midnight() {
        assert_eq!(
            format_timestamp("2024-02-29", DisplayZone::Utc),
            "Feb 29, 2024, 12:00 AM"
        );
        let west: DisplayZone = "-05:00".parse().unwrap();
        assert_eq!(format_timestamp("2024-02-29", west), "Feb 28, 2024, 07:00 PM");
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(format_timestamp("not a date", DisplayZone::Utc), INVALID_DATE);
        assert_eq!(format_timestamp("", DisplayZone::Utc), INVALID_DATE);
        assert_eq!(format_timestamp("2024-13-01", DisplayZone::Utc), INVALID_DATE);
        assert_eq!(format_optional(None, DisplayZone::Utc), INVALID_DATE);
    }

    #[test]
    fn test_pure() {
        let a = format_timestamp("2024-07-04T16:20:00Z", DisplayZone::Utc);
        let b = format_timestamp("2024-07-04T16:20:00Z", DisplayZone::Utc);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zone_parsing() {
        assert_eq!("UTC".parse::<DisplayZone>().unwrap(), DisplayZone::Utc);
        assert_eq!("local".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert_eq!(
            "-0330".parse::<DisplayZone>().unwrap(),
            DisplayZone::Fixed(FixedOffset::west_opt(3 * 3600 + 1800).unwrap())
        );
        assert!("+25:00".parse::<DisplayZone>().is_err());
        assert!("mars".parse::<DisplayZone>().is_err());
    }
}
