// ABOUTME: Main library entry point for the blogdate publish-date extraction engine.
// ABOUTME: Re-exports the public API: Engine, EngineBuilder, SiteRegistry, SiteRule, ExtractionMode, LoadError.

//! blogdate - publish-date extraction for engineering-blog posts.
//!
//! Given the raw HTML of a post from one of the supported corporate tech
//! blogs, the engine locates the date-bearing element via a per-site
//! selector rule and runs a cascade of parsing strategies until one yields
//! a calendar date. Absence is an explicit, expected outcome.
//!
//! # Example
//!
//! ```
//! use blogdate::Engine;
//!
//! let engine = Engine::builder().build();
//! let html = r#"<article><div class="editor-info"><span>글쓴이</span>
//!               <span>2025년 12월 24일</span></div></article>"#;
//! let date = engine.extract_publish_date(html, "toss", None);
//! assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2025, 12, 24));
//! ```

pub mod engine;
pub mod error;
pub mod options;
pub mod overrides;
pub mod patterns;
pub mod registry;
pub mod strategies;
pub mod structured;

pub use crate::engine::Engine;
pub use crate::error::{ErrorCode, LoadError};
pub use crate::options::{EngineBuilder, Options};
pub use crate::registry::{load_builtin_registry, ExtractionMode, SiteRegistry, SiteRule};
pub use crate::structured::extract_structured_date;
