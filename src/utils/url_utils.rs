//! URL manipulation utilities.
//!
//! This module provides functions for turning user input into requestable
//! URLs and for comparing hosts when categorizing links.

use url::Url;

use super::constants::DEFAULT_SCHEME;

/// Check whether the input already starts with `http://` or `https://` (case-insensitive)
#[must_use]
pub fn has_http_scheme(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Normalize raw user input into the URL string that will be requested.
///
/// Surrounding whitespace is trimmed and `https://` is prepended when the
/// input has no http(s) scheme. Returns `None` for blank input.
///
/// ```
/// use kodegen_tools_pagecrawl::utils::normalize_input_url;
/// assert_eq!(normalize_input_url("example.com").as_deref(), Some("https://example.com"));
/// assert_eq!(normalize_input_url(" http://a.io ").as_deref(), Some("http://a.io"));
/// assert_eq!(normalize_input_url("   "), None);
/// ```
#[must_use]
pub fn normalize_input_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if has_http_scheme(trimmed) {
        Some(trimmed.to_string())
    } else {
        Some(format!("{DEFAULT_SCHEME}{trimmed}"))
    }
}

/// Exact, case-insensitive host comparison. Subdomains are distinct hosts
/// and ports are ignored.
#[must_use]
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
