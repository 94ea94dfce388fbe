//! Core configuration types for page crawling
//!
//! This module contains the main `CrawlConfig` struct that defines the
//! parameters shared by every URL of a crawl.

use serde::{Deserialize, Serialize};

use crate::content_extractor::ExtractionMode;

/// Main configuration struct for crawl operations
///
/// The list of URLs is not part of the configuration: the same config is
/// reused when discovered links are fed back for a re-crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// What to keep from each page: raw HTML or cleaned main-content text
    pub(crate) mode: ExtractionMode,

    /// Whether to run link discovery on every successfully fetched page
    pub(crate) discover_links: bool,

    /// Fixed politeness delay in seconds between consecutive URLs
    ///
    /// Applied after every URL except the last. `0.0` disables the delay.
    ///
    /// Default: 1.0 seconds
    pub(crate) delay_secs: f64,

    /// Timeout in seconds for a single request, including the body read
    ///
    /// Default: 10 seconds
    pub(crate) timeout_secs: u64,

    /// `User-Agent` header sent with every request
    pub(crate) user_agent: String,

    /// Treat non-2xx responses as failed crawls
    ///
    /// When false, a non-2xx response is still a completed fetch and its
    /// status code is surfaced unmodified.
    ///
    /// Default: false
    pub(crate) fail_on_http_error: bool,

    /// Optional CSS selector tried before the built-in content regions
    pub(crate) content_selector: Option<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        super::builder::CrawlConfigBuilder::default().into_config()
    }
}
