//! LLM-oriented exports.
//!
//! Produces a markdown prompt context and a structured JSON document from
//! crawl results, with content cleaned of boilerplate and bounded in size so
//! it fits comfortably in a model context window.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::format_thousands;
use crate::content_extractor::{ExtractionMode, collapse_whitespace, extract_content};
use crate::crawl_engine::CrawlResult;
use crate::utils::{
    LLM_MAX_CONTENT_CHARS, LLM_PROMPT_LINKS_PER_CATEGORY, LLM_STRUCTURED_LINKS_PER_CATEGORY,
};

/// Marker appended to content cut at the length limit
pub const TRUNCATION_MARKER: &str = "... [Content truncated]";

static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)cookie policy|privacy policy|terms of service|contact us")
        .expect("BUG: hardcoded boilerplate regex is invalid")
});

/// Crawl-level counters in the structured export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub total_pages: usize,
    pub successful_crawls: usize,
    pub failed_crawls: usize,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmPageMetadata {
    pub status_code: Option<u16>,
    /// Characters of the cleaned content
    pub content_length: usize,
    pub mode: ExtractionMode,
    pub content_type: String,
    pub encoding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmLinks {
    pub internal: Vec<String>,
    pub external: Vec<String>,
    pub total_internal: usize,
    pub total_external: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmPage {
    pub url: String,
    pub content: String,
    pub metadata: LlmPageMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<LlmLinks>,
}

/// Structured export for LLM API calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmExport {
    pub session_info: SessionInfo,
    pub pages: Vec<LlmPage>,
}

/// Cleans crawl results for LLM consumption
#[derive(Debug, Clone)]
pub struct LlmContentProcessor {
    max_content_chars: usize,
    prompt_links_per_category: usize,
    structured_links_per_category: usize,
}

impl Default for LlmContentProcessor {
    fn default() -> Self {
        Self {
            max_content_chars: LLM_MAX_CONTENT_CHARS,
            prompt_links_per_category: LLM_PROMPT_LINKS_PER_CATEGORY,
            structured_links_per_category: LLM_STRUCTURED_LINKS_PER_CATEGORY,
        }
    }
}

impl LlmContentProcessor {
    #[must_use]
    pub fn with_max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
    }

    /// Clean page content: HTML (full page mode) is reduced to text, boilerplate
    /// phrases are dropped, whitespace collapsed, and the result truncated.
    #[must_use]
    pub fn clean_content(&self, content: &str, mode: ExtractionMode) -> String {
        let text = match mode {
            ExtractionMode::FullPage => extract_content(content, ExtractionMode::BodyOnly),
            ExtractionMode::BodyOnly => content.to_string(),
        };
        let text = collapse_whitespace(&BOILERPLATE_RE.replace_all(&text, ""));

        match text.char_indices().nth(self.max_content_chars) {
            Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
            None => text,
        }
    }

    /// Markdown context listing every successful page
    #[must_use]
    pub fn prompt_context(
        &self,
        results: &[CrawlResult],
        mode: ExtractionMode,
        generated_at: DateTime<Utc>,
    ) -> String {
        let mut out = String::from("## Web Crawl Results\n\n");
        out.push_str(&format!("_Generated: {}_\n\n", generated_at.to_rfc3339()));

        for (i, result) in results.iter().enumerate() {
            if !result.is_success() {
                continue;
            }

            out.push_str(&format!("### Page {}: {}\n\n", i + 1, result.url()));
            out.push_str("**Metadata:**\n");
            out.push_str(&format!(
                "- Status: {}\n",
                result
                    .status_code()
                    .map_or_else(|| "N/A".to_string(), |code| code.to_string())
            ));
            out.push_str(&format!(
                "- Content Length: {} characters\n",
                format_thousands(result.content_length())
            ));
            out.push_str(&format!("- Mode: {mode}\n\n"));

            let content = self.clean_content(result.content().unwrap_or_default(), mode);
            out.push_str(&format!("**Content:**\n{content}\n\n"));

            if let Some(links) = result.links().filter(|links| !links.is_empty()) {
                out.push_str("**Key Links:**\n");
                for link in links.internal.iter().take(self.prompt_links_per_category) {
                    out.push_str(&format!("- Internal: {link}\n"));
                }
                for link in links.external.iter().take(self.prompt_links_per_category) {
                    out.push_str(&format!("- External: {link}\n"));
                }
                out.push('\n');
            }

            out.push_str("---\n\n");
        }

        out
    }

    /// Structured data with session counters and cleaned successful pages
    #[must_use]
    pub fn structured_data(
        &self,
        results: &[CrawlResult],
        mode: ExtractionMode,
        generated_at: DateTime<Utc>,
    ) -> LlmExport {
        let successful = results.iter().filter(|r| r.is_success()).count();

        let pages = results
            .iter()
            .filter(|r| r.is_success())
            .map(|result| {
                let content = self.clean_content(result.content().unwrap_or_default(), mode);
                let links = result.links().map(|links| LlmLinks {
                    internal: links
                        .internal
                        .iter()
                        .take(self.structured_links_per_category)
                        .cloned()
                        .collect(),
                    external: links
                        .external
                        .iter()
                        .take(self.structured_links_per_category)
                        .cloned()
                        .collect(),
                    total_internal: links.internal_count(),
                    total_external: links.external_count(),
                });

                LlmPage {
                    url: result.url().to_string(),
                    metadata: LlmPageMetadata {
                        status_code: result.status_code(),
                        content_length: content.chars().count(),
                        mode,
                        content_type: result.content_type().unwrap_or_default().to_string(),
                        encoding: result.encoding().unwrap_or_default().to_string(),
                    },
                    content,
                    links,
                }
            })
            .collect();

        LlmExport {
            session_info: SessionInfo {
                total_pages: results.len(),
                successful_crawls: successful,
                failed_crawls: results.len() - successful,
                generated_at: generated_at.to_rfc3339(),
            },
            pages,
        }
    }
}
