//! Core types for crawl operations.
//!
//! This module contains the per-URL result record, the crawl-level error
//! type, and the summary statistics derived from a result list.

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::content_extractor::ExtractError;
use crate::link_extractor::PageLinks;

/// Errors that prevent a crawl from being set up or its results from being exported.
///
/// Per-URL failures never surface as `CrawlError`; they are recorded in the
/// corresponding [`CrawlResult`].
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be created
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Reading input or writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ExtractError> for CrawlError {
    fn from(err: ExtractError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Link counts serialized next to `links`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounts {
    pub internal_links_count: usize,
    pub external_links_count: usize,
    pub total_links_count: usize,
}

impl From<&PageLinks> for LinkCounts {
    fn from(links: &PageLinks) -> Self {
        Self {
            internal_links_count: links.internal_count(),
            external_links_count: links.external_count(),
            total_links_count: links.total_count(),
        }
    }
}

/// Outcome of crawling one requested URL.
///
/// Immutable once produced: fields are private and only the constructors
/// below create values, which keeps the success/failure invariants intact.
/// A successful result always carries a status code and content; a failed
/// result always carries an error message. Deserialization checks the same
/// invariants and recomputes the derived length and link counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlResult {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<String>,
    content_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<PageLinks>,
    #[serde(flatten)]
    link_counts: Option<LinkCounts>,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Wire shape of a result; derived fields are ignored on input
#[derive(Deserialize)]
struct RawCrawlResult {
    url: String,
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    links: Option<PageLinks>,
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl<'de> Deserialize<'de> for CrawlResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCrawlResult::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(de::Error::custom)
    }
}

impl CrawlResult {
    /// Result for a completed fetch and extraction
    #[must_use]
    pub fn succeeded(
        url: impl Into<String>,
        status_code: u16,
        content_type: Option<String>,
        encoding: Option<String>,
        content: String,
        links: Option<PageLinks>,
    ) -> Self {
        let content_length = content.chars().count();
        let link_counts = links.as_ref().map(LinkCounts::from);

        Self {
            url: url.into(),
            status_code: Some(status_code),
            content: Some(content),
            content_type,
            encoding,
            content_length,
            links,
            link_counts,
            success: true,
            error: None,
        }
    }

    /// Result for a URL where no response was obtained
    #[must_use]
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            content: None,
            content_type: None,
            encoding: None,
            content_length: 0,
            links: None,
            link_counts: None,
            success: false,
            error: Some(error.into()),
        }
    }

    /// Result for a response that was received but rejected by status
    #[must_use]
    pub fn failed_with_status(
        url: impl Into<String>,
        status_code: u16,
        content_type: Option<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            status_code: Some(status_code),
            content_type,
            ..Self::failed(url, error)
        }
    }

    /// Rebuild a result from its wire shape through the regular constructors
    fn from_raw(raw: RawCrawlResult) -> Result<Self, String> {
        if raw.success {
            let status_code = raw.status_code.ok_or_else(|| {
                format!("successful result for {} has no status_code", raw.url)
            })?;
            let content = raw
                .content
                .ok_or_else(|| format!("successful result for {} has no content", raw.url))?;
            if raw.error.is_some() {
                return Err(format!("successful result for {} carries an error", raw.url));
            }
            return Ok(Self::succeeded(
                raw.url,
                status_code,
                raw.content_type,
                raw.encoding,
                content,
                raw.links,
            ));
        }

        let error = raw
            .error
            .filter(|error| !error.is_empty())
            .ok_or_else(|| format!("failed result for {} has no error", raw.url))?;
        if raw.content.is_some() || raw.links.is_some() {
            return Err(format!(
                "failed result for {} carries content or links",
                raw.url
            ));
        }
        Ok(Self {
            status_code: raw.status_code,
            content_type: raw.content_type,
            encoding: raw.encoding,
            ..Self::failed(raw.url, error)
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// `Content-Type` of the response; empty when the header was absent
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of characters in `content`, 0 when there is none
    #[must_use]
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    #[must_use]
    pub fn links(&self) -> Option<&PageLinks> {
        self.links.as_ref()
    }

    #[must_use]
    pub fn link_counts(&self) -> Option<LinkCounts> {
        self.link_counts
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Aggregate statistics over a result list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Mean `content_length` of successful results
    pub average_content_length: Option<f64>,
}

impl CrawlSummary {
    #[must_use]
    pub fn from_results(results: &[CrawlResult]) -> Self {
        let successful: Vec<&CrawlResult> = results.iter().filter(|r| r.is_success()).collect();
        let average_content_length = if successful.is_empty() {
            None
        } else {
            let total_length: usize = successful.iter().map(|r| r.content_length()).sum();
            Some(total_length as f64 / successful.len() as f64)
        };

        Self {
            total: results.len(),
            successful: successful.len(),
            failed: results.len() - successful.len(),
            average_content_length,
        }
    }
}

/// Which discovered links to feed back into a new crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkScope {
    Internal,
    External,
    All,
}

impl LinkScope {
    /// The links of `links` selected by this scope
    #[must_use]
    pub fn select<'a>(&self, links: &'a PageLinks) -> &'a [String] {
        match self {
            Self::Internal => &links.internal,
            Self::External => &links.external,
            Self::All => &links.all,
        }
    }
}
