//! Builder for `CrawlConfig`
//!
//! Every field has a default, so `CrawlConfig::builder().build()` is valid.
//! `build()` validates ranges and the optional content selector.

use scraper::Selector;

use super::types::CrawlConfig;
use crate::content_extractor::ExtractionMode;
use crate::crawl_engine::CrawlError;
use crate::utils::{
    CHROME_USER_AGENT, DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS, MAX_DELAY_SECS, MAX_TIMEOUT_SECS,
};

#[derive(Debug, Clone)]
pub struct CrawlConfigBuilder {
    pub(crate) mode: ExtractionMode,
    pub(crate) discover_links: bool,
    pub(crate) delay_secs: f64,
    pub(crate) timeout_secs: u64,
    pub(crate) user_agent: String,
    pub(crate) fail_on_http_error: bool,
    pub(crate) content_selector: Option<String>,
}

impl Default for CrawlConfigBuilder {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::default(),
            discover_links: false,
            delay_secs: DEFAULT_DELAY_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: CHROME_USER_AGENT.to_string(),
            fail_on_http_error: false,
            content_selector: None,
        }
    }
}

impl CrawlConfigBuilder {
    #[must_use]
    pub fn mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn discover_links(mut self, discover_links: bool) -> Self {
        self.discover_links = discover_links;
        self
    }

    #[must_use]
    pub fn delay_secs(mut self, delay_secs: f64) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    #[must_use]
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn fail_on_http_error(mut self, fail_on_http_error: bool) -> Self {
        self.fail_on_http_error = fail_on_http_error;
        self
    }

    #[must_use]
    pub fn content_selector(mut self, content_selector: Option<String>) -> Self {
        self.content_selector = content_selector.filter(|s| !s.trim().is_empty());
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Config` when the delay is negative, not finite or
    /// too large, when the timeout is zero or too large, when the user agent
    /// is blank, or when the content selector is not valid CSS.
    pub fn build(self) -> Result<CrawlConfig, CrawlError> {
        if !self.delay_secs.is_finite() || self.delay_secs < 0.0 {
            return Err(CrawlError::Config(format!(
                "delay_secs must be a non-negative number, got {}",
                self.delay_secs
            )));
        }
        if self.delay_secs > MAX_DELAY_SECS {
            return Err(CrawlError::Config(format!(
                "delay_secs must be at most {MAX_DELAY_SECS}, got {}",
                self.delay_secs
            )));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(CrawlError::Config(format!(
                "timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                self.timeout_secs
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(CrawlError::Config("user_agent must not be empty".to_string()));
        }
        if let Some(selector) = &self.content_selector {
            Selector::parse(selector).map_err(|e| {
                CrawlError::Config(format!("Invalid content selector '{selector}': {e}"))
            })?;
        }

        Ok(self.into_config())
    }

    pub(crate) fn into_config(self) -> CrawlConfig {
        CrawlConfig {
            mode: self.mode,
            discover_links: self.discover_links,
            delay_secs: self.delay_secs,
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent,
            fail_on_http_error: self.fail_on_http_error,
            content_selector: self.content_selector,
        }
    }
}
