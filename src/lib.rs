//! Sequential page crawler with main-content extraction and link discovery.
//!
//! Given explicit URLs, each page is fetched once, reduced to raw HTML or its
//! cleaned main-content text, optionally scanned for internal and external
//! links, and recorded as a [`CrawlResult`]. Results export to JSON, text,
//! markdown and LLM-oriented formats.

pub mod config;
pub mod content_extractor;
pub mod crawl_engine;
pub mod export;
pub mod fetcher;
pub mod link_extractor;
pub mod utils;

pub use config::{CrawlConfig, CrawlConfigBuilder};
pub use content_extractor::{ContentExtractor, ContentPolicy, ExtractionMode, extract_content};
pub use crawl_engine::{
    CrawlAbortHandle, CrawlError, CrawlResult, CrawlSummary, LinkScope, LogProgress,
    NoOpProgress, PageCrawler, ProgressReporter, recrawl_targets,
};
pub use export::{ExportFormat, ResultFilter};
pub use fetcher::{FetchError, FetchErrorKind, FetchedPage, Fetcher, HttpFetcher};
pub use link_extractor::{PageLinks, extract_links};

/// Crawl `urls` over HTTP with `config`.
///
/// # Errors
///
/// Only fails when the crawler cannot be built; per-URL failures are
/// reported in the returned results.
pub async fn crawl<I, S>(urls: I, config: CrawlConfig) -> Result<Vec<CrawlResult>, CrawlError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let crawler = PageCrawler::new(config)?;
    Ok(crawler.crawl(urls).await)
}
