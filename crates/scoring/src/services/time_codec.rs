//! Conversion between `mm:ss` clock text and seconds.
//!
//! Parsing is lenient and never fails: stored data that does not parse counts
//! as zero seconds. Rejecting bad input is the job of [`is_valid_format`].

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIME_FORMAT: Regex =
        Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("time format pattern is valid");
}

/// Parses `m:ss` or `mm:ss` into seconds; malformed or out-of-range input yields `0`.
pub fn parse_to_seconds(time: &str) -> i64 {
    let mut parts = time.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };

    match (leading_integer(minutes), leading_integer(seconds)) {
        (Some(minutes), Some(seconds)) => minutes
            .checked_mul(60)
            .and_then(|total| total.checked_add(seconds))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Renders seconds as `minutes:ss`; negative input renders as `0:00`.
pub fn format_from_seconds(seconds: i64) -> String {
    if seconds < 0 {
        return "0:00".to_string();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Difference in seconds: negative when `a` is faster than `b`.
pub fn compare(a: &str, b: &str) -> i64 {
    parse_to_seconds(a).saturating_sub(parse_to_seconds(b))
}

pub fn is_valid_format(time: &str) -> bool {
    TIME_FORMAT.is_match(time)
}

/// Equal to the cap is allowed.
pub fn exceeds_cap(time: &str, cap: &str) -> bool {
    compare(time, cap) > 0
}

// Reads an optional sign and the digits that follow, ignoring leading
// whitespace and anything after the digits, the way score-entry forms did.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}
