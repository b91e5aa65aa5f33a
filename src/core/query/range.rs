//! Modification-time range bounds
//!
//! Caller bounds arrive as free-form date-time strings. They are normalized to
//! UTC ISO-8601 with millisecond precision before being spliced into SQL, so a
//! template only ever sees `YYYY-MM-DDTHH:MM:SS.sssZ`.

use crate::domain::{AdeError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Which range clause of a template to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeFilter {
    Unbounded,
    From(String),
    To(String),
    Between { from: String, to: String },
}

impl RangeFilter {
    /// Builds the filter from optional caller bounds
    ///
    /// Blank strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns `AdeError::InvalidDateFormat` if a bound cannot be parsed.
    pub fn from_bounds(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = from.filter(|s| !s.trim().is_empty()).map(canonical_datetime).transpose()?;
        let to = to.filter(|s| !s.trim().is_empty()).map(canonical_datetime).transpose()?;

        Ok(match (from, to) {
            (None, None) => RangeFilter::Unbounded,
            (Some(from), None) => RangeFilter::From(from),
            (None, Some(to)) => RangeFilter::To(to),
            (Some(from), Some(to)) => RangeFilter::Between { from, to },
        })
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, RangeFilter::Unbounded)
    }
}

/// Parses a date-time and renders it as `YYYY-MM-DDTHH:MM:SS.sssZ`
///
/// Accepts RFC 3339 with any offset, a naive date-time (taken as UTC) and a
/// bare date (UTC midnight).
///
/// # Errors
///
/// Returns `AdeError::InvalidDateFormat` if no accepted form matches.
pub fn canonical_datetime(input: &str) -> Result<String> {
    let trimmed = input.trim();
    parse_utc(trimmed)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| AdeError::InvalidDateFormat(input.to_string()))
}

fn parse_utc(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
