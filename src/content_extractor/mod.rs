//! Page content extraction.
//!
//! Turns a fetched HTML document into the `content` of a crawl result:
//! either the raw HTML unchanged (`FullPage`) or the cleaned text of the
//! page's main content region (`BodyOnly`).

pub mod regions;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;

use scraper::Html;

pub use regions::{ContentPolicy, ContentRegion, RegionMatch};
pub use text::{collapse_whitespace, element_text};

/// Maximum HTML input size accepted for parsing (10 MB)
///
/// Larger documents are not parsed at all; `BodyOnly` extraction degrades to
/// returning the raw input.
pub const MAX_HTML_SIZE: usize = 10 * 1024 * 1024;

/// Elements whose subtrees never contribute to extracted text
pub const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "noscript", "template",
];

/// What a crawl keeps from each fetched page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// The unmodified HTML document
    FullPage,
    /// Cleaned text of the main content region
    #[default]
    BodyOnly,
}

impl ExtractionMode {
    /// Stable machine name, matching the serde representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullPage => "full_page",
            Self::BodyOnly => "body_only",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullPage => write!(f, "Full Page"),
            Self::BodyOnly => write!(f, "Body Only"),
        }
    }
}

/// Errors raised while preparing or running text extraction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Input exceeds [`MAX_HTML_SIZE`]
    #[error("HTML input too large: {size} bytes (limit {limit} bytes)")]
    TooLarge { size: usize, limit: usize },

    /// A custom content selector could not be parsed
    #[error("Invalid content selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Content extractor bound to a region policy
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    policy: ContentPolicy,
}

impl ContentExtractor {
    #[must_use]
    pub fn new(policy: ContentPolicy) -> Self {
        Self { policy }
    }

    /// Build an extractor whose policy tries `selector` before the built-in regions
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidSelector` if `selector` is not valid CSS.
    pub fn with_custom_selector(selector: Option<&str>) -> Result<Self, ExtractError> {
        match selector {
            Some(css) => Ok(Self::new(ContentPolicy::with_custom_selector(css)?)),
            None => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ContentPolicy {
        &self.policy
    }

    /// Extract page content for the given mode.
    ///
    /// Never fails: when the document cannot be processed, the raw input is
    /// returned unchanged and a warning is logged.
    #[must_use]
    pub fn extract(&self, html: &str, mode: ExtractionMode) -> String {
        match mode {
            ExtractionMode::FullPage => html.to_string(),
            ExtractionMode::BodyOnly => match self.try_extract_text(html) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Falling back to raw HTML because content extraction failed"
                    );
                    html.to_string()
                }
            },
        }
    }

    /// Extract the cleaned main-content text of `html`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::TooLarge` when the input exceeds [`MAX_HTML_SIZE`].
    pub fn try_extract_text(&self, html: &str) -> Result<String, ExtractError> {
        if html.len() > MAX_HTML_SIZE {
            return Err(ExtractError::TooLarge {
                size: html.len(),
                limit: MAX_HTML_SIZE,
            });
        }

        let document = Html::parse_document(html);
        let excluded = regions::excluded_nodes(&document);
        let region = self.policy.find(&document, &excluded);

        tracing::debug!(region = region.name(), "Selected content region");

        Ok(collapse_whitespace(&element_text(region.element(), &excluded)))
    }
}

/// Extract page content with the default region policy.
///
/// ```
/// use kodegen_tools_pagecrawl::content_extractor::{extract_content, ExtractionMode};
///
/// let html = "<html><body><script>evil()</script><main>Hello World</main></body></html>";
/// assert_eq!(extract_content(html, ExtractionMode::BodyOnly), "Hello World");
/// assert_eq!(extract_content(html, ExtractionMode::FullPage), html);
/// ```
#[must_use]
pub fn extract_content(html: &str, mode: ExtractionMode) -> String {
    ContentExtractor::default().extract(html, mode)
}
