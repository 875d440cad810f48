// ABOUTME: Date-parsing strategies applied to a located DOM element.
// ABOUTME: Each strategy is independently testable; the engine composes an ordered cascade per rule mode.

//! The per-element strategy cascade.
//!
//! A [`DateStrategy`] takes the element located by a site rule and attempts
//! one way of reading a date out of it. The engine builds an ordered list
//! from the rule's [`ExtractionMode`] and runs it front to back; the first
//! strategy returning a date wins. Attribute-based strategies always come
//! before the plain-text cascade, so a `datetime` attribute beats visible
//! text when both are present and disagree.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use crate::patterns::{month_from_abbrev, parse_date_text, parse_datetime_value};
use crate::registry::ExtractionMode;

/// One attempt at reading a date from a located element.
pub trait DateStrategy {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Returns a date if this strategy can read one from the element.
    fn try_extract(&self, element: &ElementRef<'_>) -> Option<NaiveDate>;
}

/// Builds the ordered strategy cascade for a rule's extraction mode.
///
/// Every mode ends with [`TextPatterns`]: a failed attribute read falls
/// through to the visible text rather than aborting.
pub fn cascade_for_mode(mode: ExtractionMode) -> Vec<Box<dyn DateStrategy>> {
    match mode {
        ExtractionMode::AttributeDatetime => {
            vec![Box::new(AttrDatetime), Box::new(TextPatterns)]
        }
        ExtractionMode::EmbeddedTimeTag => {
            vec![Box::new(EmbeddedTimeTag), Box::new(TextPatterns)]
        }
        ExtractionMode::LabeledTestId => {
            vec![Box::new(LabeledField), Box::new(TextPatterns)]
        }
        ExtractionMode::PlainText => vec![Box::new(TextPatterns)],
    }
}

/// Reads an ISO-8601 `datetime` attribute off the element itself.
pub struct AttrDatetime;

impl DateStrategy for AttrDatetime {
    fn name(&self) -> &'static str {
        "attr_datetime"
    }

    fn try_extract(&self, element: &ElementRef<'_>) -> Option<NaiveDate> {
        let value = element.value().attr("datetime")?;
        parse_datetime_value(value)
    }
}

static TIME_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<time[^>]*\bdatetime\s*=\s*["']([^"']+)["']"#).unwrap());

/// Returns the first `<time datetime="...">` value found in raw markup.
pub(crate) fn time_datetime_in_markup(markup: &str) -> Option<String> {
    TIME_TAG_RE.captures(markup).map(|caps| caps[1].to_string())
}

/// Probes the element's source markup for a nested `<time datetime="...">`.
///
/// Matches the serialized markup directly rather than running a nested DOM
/// query, which also catches `<time>` tags the template nests inside
/// wrappers the selector cannot reach.
pub struct EmbeddedTimeTag;

impl DateStrategy for EmbeddedTimeTag {
    fn name(&self) -> &'static str {
        "embedded_time_tag"
    }

    fn try_extract(&self, element: &ElementRef<'_>) -> Option<NaiveDate> {
        let value = time_datetime_in_markup(&element.html())?;
        parse_datetime_value(&value)
    }
}

static LABELED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]{3})\s+(\d{1,2}),\s*(\d{4})").unwrap());

/// Parses a labeled `Mon D, YYYY` field, as rendered under Medium's
/// `storyPublishDate` marker.
///
/// The day is taken from the text as written. A historical variant pinned
/// the day to 1 instead; see DESIGN.md for why the lossless reading won.
pub struct LabeledField;

impl DateStrategy for LabeledField {
    fn name(&self) -> &'static str {
        "labeled_field"
    }

    fn try_extract(&self, element: &ElementRef<'_>) -> Option<NaiveDate> {
        let text = element_text(element);
        let caps = LABELED_RE.captures(&text)?;
        let month = month_from_abbrev(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Runs the plain-text pattern cascade over the element's trimmed text.
pub struct TextPatterns;

impl DateStrategy for TextPatterns {
    fn name(&self) -> &'static str {
        "text_patterns"
    }

    fn try_extract(&self, element: &ElementRef<'_>) -> Option<NaiveDate> {
        parse_date_text(&element_text(element))
    }
}

/// Collects an element's text with whitespace collapsed to single spaces.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
