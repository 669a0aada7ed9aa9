//! Utility functions for relative-time labels and log-friendly string handling.
//!
//! This module provides helper functions used throughout the application:
//! - Relative publication labels ("Just now", "5 hours ago", "3 days ago")
//! - The compact "5h ago" label used by desk listings
//! - String truncation for logging upstream bodies

use chrono::{DateTime, Utc};

/// Parse an upstream timestamp (RFC 3339 / ISO-8601 with offset) into UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a publication timestamp relative to `now`.
///
/// Buckets, on whole elapsed hours:
/// - **< 1 hour** (including timestamps in the future): `"Just now"`
/// - **< 24 hours**: `"{N} hours ago"`
/// - **< 7 days**: `"{N} days ago"`
/// - otherwise the calendar date, `M/D/YYYY`
///
/// Timestamps that cannot be parsed are returned unchanged.
///
/// # Examples
///
/// ```ignore
/// let now = Utc::now();
/// let five_hours = (now - Duration::hours(5)).to_rfc3339();
/// assert_eq!(format_relative(&five_hours, now), "5 hours ago");
/// ```
pub fn format_relative(published_at: &str, now: DateTime<Utc>) -> String {
    let Some(published) = parse_timestamp(published_at) else {
        return published_at.to_string();
    };

    let diff_in_hours = (now - published).num_hours();
    if diff_in_hours < 1 {
        return "Just now".to_string();
    }
    if diff_in_hours < 24 {
        return format!("{diff_in_hours} hours ago");
    }

    let diff_in_days = diff_in_hours / 24;
    if diff_in_days < 7 {
        return format!("{diff_in_days} days ago");
    }

    published.format("%-m/%-d/%Y").to_string()
}

/// Short label used where space is tight: `"Just now"` or `"{N}h ago"`.
pub fn format_compact(published_at: &str, now: DateTime<Utc>) -> String {
    let Some(published) = parse_timestamp(published_at) else {
        return published_at.to_string();
    };

    let diff = (now - published).num_hours();
    if diff <= 0 {
        "Just now".to_string()
    } else {
        format!("{diff}h ago")
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
