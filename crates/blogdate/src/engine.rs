// ABOUTME: The date extraction engine: override check, DOM locate, strategy cascade, structured fallback.
// ABOUTME: Stateless per call; absence is a normal outcome and never an error.

//! The extraction engine.
//!
//! [`Engine::extract_publish_date`] is the single entry point. Given a raw
//! HTML document, a site id, and optionally the source URL, it runs an
//! ordered, short-circuiting cascade:
//!
//! 1. the known-bad-URL override table;
//! 2. DOM locate via the site rule's selector, its fallback selectors, and
//!    (where configured) a framework-marker text scan;
//! 3. the mode-specific strategy cascade on the located element;
//! 4. the structured-metadata probes, when enabled in [`Options`].
//!
//! Malformed markup, unknown site ids, and unparseable text all resolve to
//! `None`. The engine holds no mutable state, so calls are idempotent and
//! safe to issue from any number of workers sharing one instance.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::options::{EngineBuilder, Options};
use crate::overrides::override_for_url;
use crate::registry::{SiteRegistry, SiteRule};
use crate::strategies::{cascade_for_mode, element_text};
use crate::structured::extract_structured_date;

/// Strict full-text form required by the marker scan. Looser dotted text is
/// deliberately not accepted here: the scan runs over the whole document and
/// would otherwise pick up view counts and version strings.
static STRICT_DOTTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}$").unwrap());

/// Publish-date extraction engine for the supported engineering blogs.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: SiteRegistry,
    opts: Options,
}

impl Engine {
    /// Creates an engine over an injected registry.
    pub fn new(registry: SiteRegistry, opts: Options) -> Self {
        Self { registry, opts }
    }

    /// Returns a builder preconfigured with the builtin registry.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// The selector registry this engine consults.
    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Extracts the publish date from a raw HTML document.
    ///
    /// Returns `None` when no strategy yields a valid calendar date — an
    /// expected outcome, including for unknown site ids and malformed
    /// markup. `source_url` is consulted only by the override table.
    pub fn extract_publish_date(
        &self,
        raw_html: &str,
        site_id: &str,
        source_url: Option<&str>,
    ) -> Option<NaiveDate> {
        if let Some(date) = source_url.and_then(override_for_url) {
            return Some(date);
        }

        let Some(rule) = self.registry.get(site_id) else {
            return self.structured_or_none(raw_html);
        };

        let doc = Html::parse_document(raw_html);
        if let Some(element) = locate_date_element(&doc, rule) {
            for strategy in cascade_for_mode(rule.mode) {
                if let Some(date) = strategy.try_extract(&element) {
                    return Some(date);
                }
            }
        }

        self.structured_or_none(raw_html)
    }

    /// Runs only the structured-metadata probes over a document.
    ///
    /// Exposed for repair workflows that layer a structured-first pass over
    /// the selector path; equivalent to step 4 of the main cascade.
    pub fn extract_structured_date(&self, raw_html: &str) -> Option<NaiveDate> {
        extract_structured_date(raw_html)
    }

    fn structured_or_none(&self, raw_html: &str) -> Option<NaiveDate> {
        if self.opts.structured_fallback {
            extract_structured_date(raw_html)
        } else {
            None
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Locates the date-bearing element for a rule.
///
/// Tries the primary selector, then the rule's fallback selectors in order,
/// then the marker scan where the rule enables it. Selectors are validated
/// at registry load; an invalid one slipping through is skipped, not fatal.
fn locate_date_element<'a>(doc: &'a Html, rule: &SiteRule) -> Option<ElementRef<'a>> {
    let selectors = std::iter::once(rule.date_selector.as_str())
        .chain(rule.fallback_selectors.iter().map(String::as_str));

    for css in selectors {
        let Ok(sel) = Selector::parse(css) else {
            continue;
        };
        if let Some(element) = doc.select(&sel).next() {
            return Some(element);
        }
    }

    if rule.marker_scan {
        return marker_scan(doc);
    }
    None
}

/// Finds an element carrying a framework-generated `data-v-*` attribute whose
/// entire text is a strict `YYYY.MM.DD` date.
///
/// The kakao template is a Vue app; its scoped-style markers survive
/// template reshuffles that break class-based selectors.
fn marker_scan(doc: &Html) -> Option<ElementRef<'_>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().attrs().any(|(name, _)| name.starts_with("data-v-"))
                && STRICT_DOTTED_RE.is_match(element_text(el).trim())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ExtractionMode;

    fn rule(selector: &str, fallbacks: &[&str], marker_scan: bool) -> SiteRule {
        SiteRule {
            site_id: "test".to_string(),
            date_selector: selector.to_string(),
            fallback_selectors: fallbacks.iter().map(|s| s.to_string()).collect(),
            marker_scan,
            mode: ExtractionMode::PlainText,
            format_hint: String::new(),
            sample_url: String::new(),
        }
    }

    #[test]
    fn locate_prefers_primary_selector() {
        let doc = Html::parse_document(
            r#"<span class="primary">2025.01.01</span><span class="alt">2024.01.01</span>"#,
        );
        let r = rule("span.primary", &["span.alt"], false);
        let el = locate_date_element(&doc, &r).unwrap();
        assert_eq!(element_text(&el), "2025.01.01");
    }

    #[test]
    fn locate_falls_back_in_order() {
        let doc = Html::parse_document(r#"<span class="alt">2024.01.01</span>"#);
        let r = rule("span.primary", &["span.missing", "span.alt"], false);
        let el = locate_date_element(&doc, &r).unwrap();
        assert_eq!(element_text(&el), "2024.01.01");
    }

    #[test]
    fn marker_scan_requires_strict_text() {
        let doc = Html::parse_document(
            r#"
            <div data-v-1a2b3c>조회수 1.024.123</div>
            <div data-v-1a2b3c>v1.2.3</div>
            <span data-v-9f8e7d>2025.12.24</span>
            "#,
        );
        let r = rule("span.missing", &[], true);
        let el = locate_date_element(&doc, &r).unwrap();
        assert_eq!(element_text(&el), "2025.12.24");
    }

    #[test]
    fn marker_scan_ignores_unmarked_elements() {
        let doc = Html::parse_document(r#"<span class="plain">2025.12.24</span>"#);
        let r = rule("span.missing", &[], true);
        assert!(locate_date_element(&doc, &r).is_none());
    }

    #[test]
    fn locate_none_when_nothing_matches() {
        let doc = Html::parse_document("<p>no dates here</p>");
        let r = rule("span.date", &[], false);
        assert!(locate_date_element(&doc, &r).is_none());
    }
}
