//! Export of crawl results.
//!
//! Renders a result list as JSON, plain text, markdown, or LLM-oriented
//! prompt text, and writes rendered exports to disk.

pub mod json;
pub mod llm;
pub mod markdown;
pub mod text;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::content_extractor::ExtractionMode;
use crate::crawl_engine::{CrawlError, CrawlResult};

pub use json::results_to_json;
pub use llm::{LlmContentProcessor, LlmExport};
pub use markdown::render_markdown;
pub use text::render_text;

/// Output formats supported by [`render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
    Markdown,
    /// Markdown prompt context for pasting into an LLM
    LlmContext,
    /// Structured JSON for LLM API calls
    LlmJson,
}

impl ExportFormat {
    /// Conventional file name for this format
    #[must_use]
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::Json => "crawl_results.json",
            Self::Text => "crawl_results.txt",
            Self::Markdown => "crawl_results.md",
            Self::LlmContext => "llm_prompt_context.md",
            Self::LlmJson => "llm_structured_data.json",
        }
    }
}

/// Which results an export includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFilter {
    #[default]
    All,
    Successful,
    Failed,
}

impl ResultFilter {
    #[must_use]
    pub fn matches(&self, result: &CrawlResult) -> bool {
        match self {
            Self::All => true,
            Self::Successful => result.is_success(),
            Self::Failed => !result.is_success(),
        }
    }

    /// Matching results, in their original order
    #[must_use]
    pub fn apply(&self, results: &[CrawlResult]) -> Vec<CrawlResult> {
        results
            .iter()
            .filter(|result| self.matches(result))
            .cloned()
            .collect()
    }
}

/// Render `results` in `format`.
///
/// `mode` is the extraction mode the results were produced with; the LLM
/// formats use it to decide how to clean content.
///
/// # Errors
///
/// Returns `CrawlError::Serialization` if JSON serialization fails.
pub fn render(
    results: &[CrawlResult],
    format: ExportFormat,
    mode: ExtractionMode,
) -> Result<String, CrawlError> {
    let generated_at = Utc::now();
    match format {
        ExportFormat::Json => results_to_json(results),
        ExportFormat::Text => Ok(render_text(results, generated_at)),
        ExportFormat::Markdown => Ok(render_markdown(results, generated_at)),
        ExportFormat::LlmContext => {
            Ok(LlmContentProcessor::default().prompt_context(results, mode, generated_at))
        }
        ExportFormat::LlmJson => {
            let export = LlmContentProcessor::default().structured_data(results, mode, generated_at);
            Ok(serde_json::to_string_pretty(&export)?)
        }
    }
}

/// Write a rendered export, creating parent directories as needed
///
/// # Errors
///
/// Returns `CrawlError::Io` if the directory or file cannot be written.
pub async fn save_export(path: &Path, contents: &str) -> Result<(), CrawlError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    log::info!(target: "pagecrawl::export", "Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Format an integer with `,` thousands separators
#[must_use]
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
