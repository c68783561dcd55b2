//! Date recognition shared by type inference and type validation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// Shapes a string must have before inference treats it as a date.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // ISO date
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(),
        // ISO date-time, optional seconds, fraction and offset
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|\s?[+-]\d{2}:?\d{2})?$")
            .unwrap(),
        // MM/DD/YYYY
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(),
    ]
});

static SPACED_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([+-]\d{2}:?\d{2})$").unwrap());

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a string as a calendar date or date-time.
///
/// Returns `None` for anything that is not a real date (`2024-02-30` included).
/// A space between the time and a trailing offset (`10:00:00 +05:00`) is accepted.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = SPACED_OFFSET.replace(trimmed, "$1");
    let text = normalized.as_ref();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.naive_utc());
        }
    }

    let naive = text.strip_suffix('Z').unwrap_or(text);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc2822(text).ok().map(|dt| dt.naive_utc())
}

/// Check whether a string has a recognised date shape and is a valid calendar date.
pub fn looks_like_date(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|p| p.is_match(value)) && parse_date(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_forms() {
        assert!(parse_date("2024-01-15").is_some());
        assert!(parse_date("2024-01-15T10:30:00Z").is_some());
        assert!(parse_date("2024-01-15T10:30:00.250+02:00").is_some());
        assert!(parse_date("2024-01-15T10:30").is_some());
        assert!(parse_date("2024-01-15 10:30:00").is_some());
    }

    #[test]
    fn test_parse_spaced_offset() {
        assert!(parse_date("2024-01-15T10:30:00 +05:00").is_some());
        assert!(parse_date("2024-01-15 10:30:00 -0800").is_some());
    }

    #[test]
    fn test_parse_us_date() {
        assert!(parse_date("01/15/2024").is_some());
        assert!(parse_date("1/5/2024").is_some());
        assert!(parse_date("13/01/2024").is_none());
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("2023-13-01").is_none());
        assert!(parse_date("hello").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_looks_like_date() {
        assert!(looks_like_date("2024-01-15"));
        assert!(looks_like_date("2024-01-15T08:00:00Z"));
        assert!(looks_like_date("12/31/1999"));
        assert!(!looks_like_date("2024-02-30"));
        assert!(!looks_like_date("Mon, 15 Jan 2024 10:00:00 +0000"));
        assert!(!looks_like_date("2024"));
        // Parseable, but not one of the recognised shapes.
        assert!(!looks_like_date("1/5/2024"));
        assert!(!looks_like_date("2024-01-15 10:00"));
        assert!(looks_like_date("2024-01-15T10:00"));
    }
}
