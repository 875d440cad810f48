// ABOUTME: Hard-coded URL-to-date exception table for posts with known-broken markup.
// ABOUTME: Checked before any parsing; matching is exact-string on the source URL.

//! Known-bad-URL overrides.
//!
//! A handful of posts ship markup with no recoverable date (an upstream
//! template defect, confirmed by hand). Their dates are pinned here so the
//! rest of the pipeline stays uniform. This is technical debt, not a
//! mechanism: entries should only ever be removed, never generalized.

use chrono::NaiveDate;

/// Exact URL, then (year, month, day) verified manually against the post.
const OVERRIDES: &[(&str, (i32, u32, u32))] = &[(
    "https://tech.kakao.com/posts/312",
    (2021, 10, 5),
)];

/// Returns the pinned date for a known-bad URL, if any.
pub fn override_for_url(url: &str) -> Option<NaiveDate> {
    OVERRIDES
        .iter()
        .find(|(bad, _)| *bad == url)
        .and_then(|(_, (y, m, d))| NaiveDate::from_ymd_opt(*y, *m, *d))
}
