//! W3C datetime handling for `<lastmod>` values.
//!
//! Sitemaps use the W3C profile of ISO 8601. Output is always a full RFC 3339
//! timestamp normalized to UTC. Input is accepted in any of the precisions the
//! sitemaps.org protocol allows:
//!
//! - `2005-01-01T12:30:45.5+01:00` (full RFC 3339, fractional seconds optional)
//! - `2005-01-01T12:30+01:00` (minutes, no seconds)
//! - `2005-01-01` (date only, read as midnight UTC)

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};

use crate::{Error, Result};

/// Format a timestamp as RFC 3339 in UTC.
///
/// Fractional seconds are only written when non-zero, so the Unix epoch
/// becomes `1970-01-01T00:00:00Z`.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a W3C datetime and normalize it to UTC.
///
/// Leading and trailing whitespace is ignored.
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    // chrono's `%:z` does not accept the `Z` designator
    let with_offset = match text.strip_suffix(['Z', 'z']) {
        Some(head) => Cow::Owned(format!("{head}+00:00")),
        None => Cow::Borrowed(text),
    };
    if let Ok(parsed) = DateTime::parse_from_str(&with_offset, "%Y-%m-%dT%H:%M%:z") {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(Error::InvalidDateTime(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(format_datetime(&epoch), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_format_keeps_fraction() {
        let value = Utc.timestamp_opt(1, 500_000_000).unwrap();
        assert_eq!(format_datetime(&value), "1970-01-01T00:00:01.500Z");
    }

    #[test]
    fn test_parse_rfc3339_normalizes_to_utc() {
        let parsed = parse_datetime("2004-12-23T18:00:15+02:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2004-12-23T16:00:15Z");
    }

    #[test]
    fn test_parse_minute_precision() {
        let parsed = parse_datetime("2005-01-01T12:30Z").unwrap();
        assert_eq!(format_datetime(&parsed), "2005-01-01T12:30:00Z");

        let parsed = parse_datetime("2005-01-01T12:30-05:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2005-01-01T17:30:00Z");
    }

    #[test]
    fn test_parse_date_only() {
        let parsed = parse_datetime(" 2005-01-01 ").unwrap();
        assert_eq!(format_datetime(&parsed), "2005-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(Error::InvalidDateTime(s)) if s == "yesterday"
        ));
        assert!(parse_datetime("2005-02-31").is_err());
        assert!(parse_datetime("").is_err());
    }
}
