//! Normalization of the site's heterogeneous byline timestamps into one
//! canonical ISO-8601 string.
//!
//! Three shapes are recognized, tried in order: relative-day strings
//! ("Today at 12:36 AM GMT+5:30"), RFC 3339 date-times, and offset-less ISO
//! date-times. Anything else yields `None` rather than an error so a bad
//! byline never aborts a crawl.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime};

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a byline timestamp into a canonical ISO-8601 string.
///
/// Relative-day strings resolve against the calendar date of
/// `reference_now`; the trailing GMT offset is discarded and the result is a
/// naive local instant. RFC 3339 input keeps its offset.
pub fn normalize(text: &str, reference_now: NaiveDateTime) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(rest) = text.strip_prefix("Today at ") {
        return clock_on(reference_now.date(), rest);
    }
    if let Some(rest) = text.strip_prefix("Yesterday at ") {
        let date = reference_now.date().checked_sub_days(Days::new(1))?;
        return clock_on(date, rest);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.to_rfc3339());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
    {
        return Some(dt.format(CANONICAL_FORMAT).to_string());
    }

    None
}

/// Combine a 12-hour clock string ("10:10 PM GMT+5:30") with a date. The
/// " GMT" suffix is required; everything after it is ignored.
fn clock_on(date: NaiveDate, rest: &str) -> Option<String> {
    let clock = &rest[..rest.rfind(" GMT")?];
    let time = NaiveTime::parse_from_str(clock.trim(), "%I:%M %p").ok()?;
    Some(date.and_time(time).format(CANONICAL_FORMAT).to_string())
}
