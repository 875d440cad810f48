// ABOUTME: Site selector registry mapping company ids to date-extraction rules.
// ABOUTME: Supports an embedded builtin table plus file-backed loading of the same JSON shape.

//! Per-site selector rules and the registry that serves them.
//!
//! Each supported blog has exactly one active [`SiteRule`] naming the CSS
//! selector expected to hold the publish date, an [`ExtractionMode`] telling
//! the engine how to read that node, and a sample URL for manual regression
//! checks. The registry is built once and injected into the engine; lookup
//! is a pure map access with no failure mode beyond `None`.
//!
//! Rules come from either the embedded builtin table
//! (`data/site_selectors.json`) or an external file of the same shape:
//! a map from site id to `publishedDate` / `publishedDateFormat` / `testUrl`,
//! with optional `mode` and `fallbackSelectors` fields. When `mode` is
//! absent it is derived from the format hint exactly once, at load time;
//! the engine itself never inspects hint text.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// How the engine should read the located date node.
///
/// A closed set replaces substring-sniffing of the free-text format hint:
/// the hint stays on the rule as documentation, but dispatch happens on
/// this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Read an ISO-8601 `datetime` attribute off the located element.
    AttributeDatetime,
    /// Probe the located element's source markup for a nested `<time datetime>`.
    EmbeddedTimeTag,
    /// Parse the element text as a labeled `Mon D, YYYY` field (Medium's
    /// `storyPublishDate` marker).
    LabeledTestId,
    /// Parse the element's trimmed text through the plain-text pattern cascade.
    #[default]
    PlainText,
}

/// One site's date-extraction rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRule {
    /// Stable site identifier, e.g. "toss" or "kakao".
    pub site_id: String,
    /// CSS selector for the date-bearing element on the current template.
    pub date_selector: String,
    /// Ordered alternate selectors tried when the primary finds nothing.
    #[serde(default)]
    pub fallback_selectors: Vec<String>,
    /// After all selectors fail, scan for any element carrying a
    /// framework-generated `data-v-*` attribute whose text is strictly
    /// `YYYY.MM.DD`. Only the kakao template needs this.
    #[serde(default)]
    pub marker_scan: bool,
    pub mode: ExtractionMode,
    /// Human-readable description of the expected shape. Documentation only.
    pub format_hint: String,
    /// Known-good post URL for manual regression verification.
    pub sample_url: String,
}

/// Registry for looking up selector rules by site id.
#[derive(Debug, Default, Clone)]
pub struct SiteRegistry {
    map: HashMap<String, SiteRule>,
}

impl SiteRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule under its site id, replacing any existing rule.
    pub fn register(&mut self, rule: SiteRule) {
        self.map.insert(rule.site_id.clone(), rule);
    }

    /// Looks up a rule by site id.
    pub fn get(&self, site_id: &str) -> Option<&SiteRule> {
        self.map.get(site_id)
    }

    /// Returns the number of registered sites.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over registered rules in arbitrary order.
    pub fn rules(&self) -> impl Iterator<Item = &SiteRule> {
        self.map.values()
    }

    /// Loads a registry from the external JSON selector-file shape.
    pub fn from_json_str(json: &str, subject: &str) -> Result<Self, LoadError> {
        let raw: HashMap<String, RawRule> = serde_json::from_str(json).map_err(|e| {
            LoadError::malformed(subject, "from_json_str", Some(anyhow::anyhow!(e)))
        })?;

        let mut registry = Self::new();
        for (site_id, rule) in raw {
            let rule = rule.into_site_rule(site_id)?;
            registry.register(rule);
        }
        Ok(registry)
    }

    /// Loads a registry from a selector file on disk.
    ///
    /// Read once; there is no hot reload. Callers that want process-wide
    /// caching should hold the returned registry themselves.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let subject = path.display().to_string();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LoadError::io(&subject, "from_file", Some(anyhow::anyhow!(e))))?;
        Self::from_json_str(&json, &subject)
    }
}

/// On-disk/raw rule shape: map values of the selector JSON file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    published_date: String,
    #[serde(default)]
    published_date_format: String,
    #[serde(default)]
    test_url: String,
    #[serde(default)]
    mode: Option<ExtractionMode>,
    #[serde(default)]
    fallback_selectors: Vec<String>,
    #[serde(default)]
    marker_scan: bool,
}

impl RawRule {
    fn into_site_rule(self, site_id: String) -> Result<SiteRule, LoadError> {
        validate_selector(&self.published_date, &site_id)?;
        for sel in &self.fallback_selectors {
            validate_selector(sel, &site_id)?;
        }
        let mode = self
            .mode
            .unwrap_or_else(|| classify_hint(&self.published_date_format));
        Ok(SiteRule {
            site_id,
            date_selector: self.published_date,
            fallback_selectors: self.fallback_selectors,
            marker_scan: self.marker_scan,
            mode,
            format_hint: self.published_date_format,
            sample_url: self.test_url,
        })
    }
}

fn validate_selector(css: &str, site_id: &str) -> Result<(), LoadError> {
    scraper::Selector::parse(css).map_err(|e| {
        LoadError::selector(
            site_id,
            "validate_selector",
            Some(anyhow::anyhow!("{}: {}", css, e)),
        )
    })?;
    Ok(())
}

/// Derives an extraction mode from a legacy free-text format hint.
///
/// Only used for selector files that omit the explicit `mode` field.
/// Checked in specificity order: an embedded-time hint also mentions
/// "datetime", so the `<time` probe wins over the attribute check.
fn classify_hint(hint: &str) -> ExtractionMode {
    let lower = hint.to_lowercase();
    if lower.contains("<time") {
        ExtractionMode::EmbeddedTimeTag
    } else if lower.contains("data-testid") || lower.contains("storypublishdate") {
        ExtractionMode::LabeledTestId
    } else if lower.contains("datetime") {
        ExtractionMode::AttributeDatetime
    } else {
        ExtractionMode::PlainText
    }
}

/// Embedded JSON containing the builtin selector rules for all supported sites.
const BUILTIN_SELECTORS_JSON: &str = include_str!("../data/site_selectors.json");

/// Loads the builtin selector registry from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed or carries an invalid selector;
/// both indicate a broken build, not a runtime condition.
pub fn load_builtin_registry() -> SiteRegistry {
    SiteRegistry::from_json_str(BUILTIN_SELECTORS_JSON, "builtin")
        .expect("failed to parse builtin site selectors")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_loads() {
        let registry = load_builtin_registry();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn builtin_registry_covers_expected_sites() {
        let registry = load_builtin_registry();
        for site in ["toss", "kakao", "naver", "woowahan", "daangn", "line", "banksalad"] {
            assert!(registry.get(site).is_some(), "missing rule for {}", site);
        }
    }

    #[test]
    fn builtin_modes_are_explicit() {
        let registry = load_builtin_registry();
        assert_eq!(registry.get("toss").unwrap().mode, ExtractionMode::PlainText);
        assert_eq!(
            registry.get("naver").unwrap().mode,
            ExtractionMode::AttributeDatetime
        );
        assert_eq!(
            registry.get("daangn").unwrap().mode,
            ExtractionMode::LabeledTestId
        );
        assert_eq!(
            registry.get("line").unwrap().mode,
            ExtractionMode::EmbeddedTimeTag
        );
    }

    #[test]
    fn kakao_rule_has_locator_fallbacks() {
        let registry = load_builtin_registry();
        let kakao = registry.get("kakao").unwrap();
        assert!(!kakao.fallback_selectors.is_empty());
        assert!(kakao.marker_scan);
    }

    #[test]
    fn unknown_site_returns_none() {
        let registry = load_builtin_registry();
        assert!(registry.get("not-a-real-site").is_none());
    }

    #[test]
    fn from_json_str_derives_mode_from_hint() {
        let json = r#"{
            "alpha": {
                "publishedDate": "time.published",
                "publishedDateFormat": "ISO date in datetime attribute",
                "testUrl": "https://alpha.example/post/1"
            },
            "beta": {
                "publishedDate": "div.meta",
                "publishedDateFormat": "nested <time datetime> tag in markup",
                "testUrl": "https://beta.example/post/2"
            },
            "gamma": {
                "publishedDate": "span.date",
                "publishedDateFormat": "visible text, dotted",
                "testUrl": "https://gamma.example/post/3"
            }
        }"#;

        let registry = SiteRegistry::from_json_str(json, "test").unwrap();
        assert_eq!(
            registry.get("alpha").unwrap().mode,
            ExtractionMode::AttributeDatetime
        );
        assert_eq!(
            registry.get("beta").unwrap().mode,
            ExtractionMode::EmbeddedTimeTag
        );
        assert_eq!(registry.get("gamma").unwrap().mode, ExtractionMode::PlainText);
    }

    #[test]
    fn from_json_str_rejects_malformed_json() {
        let err = SiteRegistry::from_json_str("{not json", "test").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn from_json_str_rejects_invalid_selector() {
        let json = r#"{
            "broken": {
                "publishedDate": "[[[nope",
                "publishedDateFormat": "text",
                "testUrl": "https://broken.example/"
            }
        }"#;
        let err = SiteRegistry::from_json_str(json, "test").unwrap_err();
        assert!(err.is_selector());
    }

    #[test]
    fn register_replaces_existing_rule() {
        let mut registry = SiteRegistry::new();
        registry.register(SiteRule {
            site_id: "toss".to_string(),
            date_selector: "span.old".to_string(),
            fallback_selectors: vec![],
            marker_scan: false,
            mode: ExtractionMode::PlainText,
            format_hint: String::new(),
            sample_url: String::new(),
        });
        registry.register(SiteRule {
            site_id: "toss".to_string(),
            date_selector: "span.new".to_string(),
            fallback_selectors: vec![],
            marker_scan: false,
            mode: ExtractionMode::PlainText,
            format_hint: String::new(),
            sample_url: String::new(),
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("toss").unwrap().date_selector, "span.new");
    }

    #[test]
    fn classify_hint_specificity_order() {
        // An embedded-time hint also mentions "datetime"; <time must win.
        assert_eq!(
            classify_hint("nested <time datetime> in source"),
            ExtractionMode::EmbeddedTimeTag
        );
        assert_eq!(
            classify_hint("datetime attribute on the element"),
            ExtractionMode::AttributeDatetime
        );
        assert_eq!(
            classify_hint("data-testid storyPublishDate label"),
            ExtractionMode::LabeledTestId
        );
        assert_eq!(classify_hint("plain dotted text"), ExtractionMode::PlainText);
        assert_eq!(classify_hint(""), ExtractionMode::PlainText);
    }
}
