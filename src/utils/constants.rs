//! Shared configuration constants for pagecrawl
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default politeness delay between two consecutive requests: 1 second
///
/// Applied after every URL except the last one of a crawl. There is no
/// adaptive backoff; users can adjust via `delay_secs`, and `0.0` disables it.
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Default per-request timeout: 10 seconds
///
/// Covers connect, request and reading the whole body. A request that does
/// not finish within this window produces a timeout failure for that URL.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound accepted for `timeout_secs`
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Upper bound accepted for `delay_secs`
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Scheme prepended to user input that carries none
pub const DEFAULT_SCHEME: &str = "https://";

/// Desktop Chrome user agent sent with every request unless overridden
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Maximum characters of page content kept in LLM exports
pub const LLM_MAX_CONTENT_CHARS: usize = 8000;

/// Links per category listed in the LLM prompt context
pub const LLM_PROMPT_LINKS_PER_CATEGORY: usize = 5;

/// Links per category kept in LLM structured data
pub const LLM_STRUCTURED_LINKS_PER_CATEGORY: usize = 10;
