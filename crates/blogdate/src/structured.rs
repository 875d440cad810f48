// ABOUTME: Structured-data fallback probing framework JSON islands, JSON-LD, time tags, and meta tags.
// ABOUTME: Used by repair workflows when the per-site selector finds nothing.

//! Structured-metadata date probes.
//!
//! When the per-site selector fails (a template changed, or a site was never
//! configured), the document itself often still carries a machine-readable
//! publish date. Probes run in order, each short-circuiting on the first
//! value that parses to a real calendar date:
//!
//! 1. framework-embedded JSON data islands (`__NEXT_DATA__`, `__NUXT_DATA__`),
//!    scanned in serialized form for known date-bearing key names;
//! 2. `application/ld+json` blocks, parsed and walked for `datePublished`;
//! 3. any bare `<time datetime="...">` in the document source;
//! 4. `<meta>` tags: `article:published_time` first, then any tag whose
//!    `property`/`name` mentions "publish" or "date".

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::patterns::parse_datetime_value;
use crate::strategies::time_datetime_in_markup;

static DATA_ISLAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<script[^>]*id\s*=\s*["'](?:__NEXT_DATA__|__NUXT_DATA__)["'][^>]*>(.*?)</script>"#,
    )
    .unwrap()
});

/// Date-bearing key names observed across the supported frameworks' islands.
static ISLAND_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#""(?:publishedTime|publishedAt|published_time|date_published|createdTime)"\s*:\s*"([^"]+)""#,
    )
    .unwrap()
});

static JSON_LD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .unwrap()
});

/// Probes a whole document's structured metadata for a publish date.
pub fn extract_structured_date(raw_html: &str) -> Option<NaiveDate> {
    if let Some(date) = probe_data_islands(raw_html) {
        return Some(date);
    }
    if let Some(date) = probe_json_ld(raw_html) {
        return Some(date);
    }
    if let Some(date) = time_datetime_in_markup(raw_html).and_then(|v| parse_datetime_value(&v)) {
        return Some(date);
    }
    probe_meta_tags(raw_html)
}

/// Scans framework JSON islands in serialized form for known date keys.
///
/// The islands are large and deeply nested; a key scan over the raw text is
/// both cheaper and more robust than deserializing framework-specific shapes.
fn probe_data_islands(raw_html: &str) -> Option<NaiveDate> {
    for island in DATA_ISLAND_RE.captures_iter(raw_html) {
        for caps in ISLAND_KEY_RE.captures_iter(&island[1]) {
            if let Some(date) = parse_datetime_value(&caps[1]) {
                return Some(date);
            }
        }
    }
    None
}

/// Parses `application/ld+json` blocks and walks them for `datePublished`.
fn probe_json_ld(raw_html: &str) -> Option<NaiveDate> {
    for caps in JSON_LD_RE.captures_iter(raw_html) {
        let raw = caps[1].trim();
        if raw.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            continue;
        };
        if let Some(date) = date_published_in(&value) {
            return Some(date);
        }
    }
    None
}

fn date_published_in(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Object(map) => {
            if let Some(date) = map
                .get("datePublished")
                .and_then(Value::as_str)
                .and_then(parse_datetime_value)
            {
                return Some(date);
            }
            // Covers @graph arrays and nested entities.
            map.values().find_map(date_published_in)
        }
        Value::Array(items) => items.iter().find_map(date_published_in),
        _ => None,
    }
}

/// Checks `<meta>` tags for published-time style content.
fn probe_meta_tags(raw_html: &str) -> Option<NaiveDate> {
    let doc = Html::parse_document(raw_html);
    let sel = Selector::parse("meta").ok()?;

    // Exact article:published_time wins over looser name matches.
    for el in doc.select(&sel) {
        if el.value().attr("property") == Some("article:published_time") {
            if let Some(date) = el.value().attr("content").and_then(parse_datetime_value) {
                return Some(date);
            }
        }
    }

    for el in doc.select(&sel) {
        let key = el
            .value()
            .attr("property")
            .or_else(|| el.value().attr("name"))
            .unwrap_or("");
        let lower = key.to_lowercase();
        if lower.contains("publish") || lower.contains("date") {
            if let Some(date) = el.value().attr("content").and_then(parse_datetime_value) {
                return Some(date);
            }
        }
    }
    None
}
