//! Read accessors for `CrawlConfig`

use std::time::Duration;

use super::types::CrawlConfig;
use crate::content_extractor::ExtractionMode;

impl CrawlConfig {
    /// Start building a new configuration from defaults
    #[must_use]
    pub fn builder() -> super::builder::CrawlConfigBuilder {
        super::builder::CrawlConfigBuilder::default()
    }

    #[must_use]
    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    #[must_use]
    pub fn discover_links(&self) -> bool {
        self.discover_links
    }

    #[must_use]
    pub fn delay_secs(&self) -> f64 {
        self.delay_secs
    }

    /// Delay between consecutive URLs as a `Duration`
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_secs)
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Per-request timeout as a `Duration`
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn fail_on_http_error(&self) -> bool {
        self.fail_on_http_error
    }

    #[must_use]
    pub fn content_selector(&self) -> Option<&str> {
        self.content_selector.as_deref()
    }
}
