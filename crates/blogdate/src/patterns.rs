// ABOUTME: Plain-text date grammar for blog post bylines.
// ABOUTME: Tries Korean, dotted, ISO, and English abbreviated patterns before a generic fallback.

//! Text and attribute-value date parsing.
//!
//! The visible byline formats across the supported blogs reduce to a small
//! grammar, tried in order until one matches and yields a real calendar date:
//!
//! - Korean full date: `2025년 12월 24일`
//! - dotted: `2025.12.24` / `2025. 12. 24.`
//! - ISO dashed: `2025-12-24`
//! - English abbreviated, forward `Dec 24, 2025` and reversed `24 Dec 2025`
//! - generic fallback through the `dateparser` crate
//!
//! Every constructed date goes through `NaiveDate::from_ymd_opt`; an
//! out-of-range month or day rejects the match rather than wrapping.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Three-letter month abbreviations, in calendar order.
///
/// The single shared table keeps month numbering consistent across every
/// strategy that builds a date from a named month.
const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Maps a three-letter month abbreviation to its 1-12 month number.
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let lower = abbrev.to_lowercase();
    MONTH_ABBREVS
        .iter()
        .position(|m| *m == lower)
        .map(|i| i as u32 + 1)
}

static KOREAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})년\s*(\d{1,2})월\s*(\d{1,2})일").unwrap());

static DOTTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})\.\s*(\d{1,2})\.\s*(\d{1,2})\.?").unwrap());

static ISO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").unwrap());

static ENGLISH_FWD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]{3})\s+(\d{1,2}),\s*(\d{4})").unwrap());

static ENGLISH_REV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})\s+([A-Za-z]{3})\s+(\d{4})").unwrap());

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Parses visible byline text through the pattern cascade.
///
/// Returns `None` for empty input and for text no pattern can read.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = KOREAN_RE.captures(text) {
        if let Some(date) = ymd_from_captures(&caps, 1, 2, 3) {
            return Some(date);
        }
    }

    if let Some(caps) = DOTTED_RE.captures(text) {
        if let Some(date) = ymd_from_captures(&caps, 1, 2, 3) {
            return Some(date);
        }
    }

    if let Some(caps) = ISO_RE.captures(text) {
        if let Some(date) = ymd_from_captures(&caps, 1, 2, 3) {
            return Some(date);
        }
    }

    if let Some(caps) = ENGLISH_FWD_RE.captures(text) {
        if let Some(date) = named_month_date(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    if let Some(caps) = ENGLISH_REV_RE.captures(text) {
        if let Some(date) = named_month_date(&caps[2], &caps[1], &caps[3]) {
            return Some(date);
        }
    }

    // Generic fallback. Gated on a 4-digit year so that time-of-day-only
    // strings cannot resolve against "today" and break idempotence.
    if YEAR_RE.is_match(text) {
        if let Ok(dt) = dateparser::parse(text) {
            return Some(dt.date_naive());
        }
    }

    None
}

/// Parses a machine-readable date value, as found in `datetime` attributes
/// and structured metadata fields.
pub fn parse_datetime_value(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // RFC 3339 first, the common case for datetime attributes.
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    // ISO datetime without offset: "2025-12-23T10:00:00"
    if let Ok(ndt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.date());
    }

    parse_date_text(value)
}

fn ymd_from_captures(caps: &regex::Captures<'_>, y: usize, m: usize, d: usize) -> Option<NaiveDate> {
    let year: i32 = caps[y].parse().ok()?;
    let month: u32 = caps[m].parse().ok()?;
    let day: u32 = caps[d].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn named_month_date(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    let month = month_from_abbrev(month)?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
