//! Timestamp extraction for log entries
//!
//! Patterns are tried in priority order and the first one that matches wins,
//! even if its value turns out to be unparseable:
//!
//! 1. an explicit `Date: <value>` field
//! 2. an ISO-like `YYYY-MM-DDTHH:MM:SS` timestamp
//! 3. a simple `YYYY-MM-DD HH:MM` datetime

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::utils::Timezone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    DateField,
    IsoTimestamp,
    SimpleDateTime,
}

static PATTERNS: LazyLock<[(TimestampSource, Regex); 3]> = LazyLock::new(|| {
    let compile = |pattern: &str| Regex::new(pattern).expect("timestamp pattern is valid");
    [
        (TimestampSource::DateField, compile(r"Date: (.+)")),
        (
            TimestampSource::IsoTimestamp,
            compile(r"([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2})"),
        ),
        (
            TimestampSource::SimpleDateTime,
            compile(r"([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2})"),
        ),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampMatch<'a> {
    Found {
        source: TimestampSource,
        raw: &'a str,
    },
    NotFound,
}

pub fn find_timestamp(entry: &str) -> TimestampMatch<'_> {
    for (source, re) in PATTERNS.iter() {
        if let Some(caps) = re.captures(entry)
            && let Some(m) = caps.get(1)
        {
            return TimestampMatch::Found {
                source: *source,
                raw: m.as_str().trim(),
            };
        }
    }
    TimestampMatch::NotFound
}

// Wall-clock formats, anchored in the configured zone
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// Human-written dates, anchored at midnight in the configured zone
const NAIVE_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%m/%d/%Y"];

// `Date.prototype.toString()` once its "(Zone Name)" comment is stripped
const JS_DATE_STRING_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Drop a trailing parenthesised comment: "2024-01-15 (Monday)"
fn strip_comment(raw: &str) -> &str {
    if raw.ends_with(')')
        && let Some(open) = raw.rfind('(')
    {
        return raw[..open].trim_end();
    }
    raw
}

/// Split a trailing zone designator (`UTC`, `GMT`, `Z`, `GMT+hhmm`) off a
/// wall-clock reading.
fn split_zone_suffix(raw: &str) -> Option<(&str, FixedOffset)> {
    for suffix in [" UTC", " GMT", " Z", "Z"] {
        if let Some(head) = raw.strip_suffix(suffix) {
            return Some((head.trim_end(), FixedOffset::east_opt(0)?));
        }
    }

    let gmt = raw.rfind("GMT")?;
    let offset = &raw[gmt + 3..];
    let (sign, digits) = match offset.as_bytes().first().copied()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };
    let digits = digits.replace(':', "");
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
    Some((raw[..gmt].trim_end(), offset))
}

fn parse_with_offset(head: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(head, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(head, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
        })?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a matched value into an instant.
///
/// Values with an explicit offset or zone suffix are taken as-is. Bare
/// `YYYY-MM-DD` dates are UTC midnight; every other offset-less form is read
/// in `timezone`. A trailing `(...)` comment is ignored.
pub fn parse_timestamp(raw: &str, timezone: Timezone) -> Option<DateTime<Utc>> {
    let raw = strip_comment(raw.trim());
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, JS_DATE_STRING_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some((head, offset)) = split_zone_suffix(raw)
        && let Some(dt) = parse_with_offset(head, offset)
    {
        return Some(dt);
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return timezone.to_utc(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return timezone.to_utc(date.and_hms_opt(0, 0, 0)?);
        }
    }

    None
}
