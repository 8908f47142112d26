//! Coercion of date-like values to epoch seconds.

use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Offset-bearing layouts tried after RFC 3339 and RFC 2822.
///
/// A trailing `Z` is rewritten to `+00:00` before these are tried.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    // `Date.prototype.toString()` output, zone name already stripped
    "%a %b %d %Y %H:%M:%S GMT%z",
];

/// Local date-time layouts accepted in addition to RFC 3339 and RFC 2822.
///
/// Values without an offset are interpreted as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A date-like value supplied for `signed_up_at` or `last_seen_at`.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Seconds since the Unix epoch; fractions are floored.
    Seconds(f64),
    /// An instant.
    DateTime(DateTime<Utc>),
    /// A date string, parsed when coerced.
    Text(String),
}

impl DateInput {
    /// Returns whole seconds since the epoch, or `None` if the value is
    /// not a valid instant.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // floor() then saturating cast
    pub fn epoch_seconds(&self) -> Option<i64> {
        match self {
            Self::Seconds(secs) if secs.is_finite() => Some(secs.floor() as i64),
            Self::Seconds(_) => None,
            Self::DateTime(instant) => Some(instant.timestamp()),
            Self::Text(text) => parse_date(text).map(|instant| instant.timestamp()),
        }
    }
}

impl From<f64> for DateInput {
    fn from(secs: f64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<i64> for DateInput {
    #[allow(clippy::cast_precision_loss)] // epoch seconds stay well inside f64's exact range
    fn from(secs: i64) -> Self {
        Self::Seconds(secs as f64)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::DateTime(instant)
    }
}

impl From<SystemTime> for DateInput {
    fn from(time: SystemTime) -> Self {
        Self::DateTime(time.into())
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Coerces an optional date-like value to whole epoch seconds.
///
/// Absent values, empty strings, non-finite numbers and unparseable
/// strings all yield `None`.
#[must_use]
pub fn to_epoch_seconds(value: Option<&DateInput>) -> Option<i64> {
    value.and_then(DateInput::epoch_seconds)
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.with_timezone(&Utc));
    }

    parse_with_offset(text)
        .or_else(|| parse_naive(text).map(|naive| naive.and_utc()))
}

fn parse_with_offset(text: &str) -> Option<DateTime<Utc>> {
    let text = strip_zone_name(text);
    let text = text
        .strip_suffix(['Z', 'z'])
        .map_or_else(|| text.to_string(), |rest| format!("{rest}+00:00"));

    OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&text, format).ok())
        .map(|instant| instant.with_timezone(&Utc))
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_calendar_date(text).and_then(|date| date.and_hms_opt(0, 0, 0)))
}

/// Parses `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; missing parts default to 1.
fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.splitn(3, '-');
    let year = parts.next().filter(|y| is_digits(y, 4))?.parse().ok()?;
    let month = match parts.next() {
        Some(m) if is_digits(m, 2) => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    let day = match parts.next() {
        Some(d) if is_digits(d, 2) => d.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

/// Drops a trailing `(Zone Name)` as printed by `Date.prototype.toString()`.
fn strip_zone_name(text: &str) -> &str {
    match text.find(" (") {
        Some(start) if text.ends_with(')') => text[..start].trim_end(),
        _ => text,
    }
}
