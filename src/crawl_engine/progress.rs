//! Progress reporting abstraction for crawl operations
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides no-op and logging implementations.

use super::crawl_types::{CrawlResult, CrawlSummary};

/// Trait for reporting crawl progress at key lifecycle events
///
/// Implementations can send updates to channels, log to console, update UI, etc.
/// Indices are zero-based positions in the list of non-blank input URLs.
pub trait ProgressReporter: Send + Sync {
    /// Report that a crawl over `total` URLs has started
    fn report_started(&self, total: usize);

    /// Report that fetching of a URL has started
    fn report_fetching(&self, index: usize, url: &str);

    /// Report the finished result for a URL
    fn report_result(&self, index: usize, result: &CrawlResult);

    /// Report that the crawl was aborted with `remaining` URLs never attempted
    fn report_aborted(&self, remaining: usize);

    /// Report that the crawl has finished, aborted or not
    fn report_finished(&self, summary: &CrawlSummary);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_started(&self, _total: usize) {}

    #[inline(always)]
    fn report_fetching(&self, _index: usize, _url: &str) {}

    #[inline(always)]
    fn report_result(&self, _index: usize, _result: &CrawlResult) {}

    #[inline(always)]
    fn report_aborted(&self, _remaining: usize) {}

    #[inline(always)]
    fn report_finished(&self, _summary: &CrawlSummary) {}
}

/// Progress reporter writing through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_started(&self, total: usize) {
        log::info!(target: "pagecrawl::crawl", "Crawling {total} URL(s)");
    }

    fn report_fetching(&self, index: usize, url: &str) {
        log::info!(target: "pagecrawl::crawl", "[{}] Fetching {url}", index + 1);
    }

    fn report_result(&self, index: usize, result: &CrawlResult) {
        if result.is_success() {
            log::info!(
                target: "pagecrawl::crawl",
                "[{}] {} -> {} ({} chars)",
                index + 1,
                result.url(),
                result
                    .status_code()
                    .map_or_else(|| "-".to_string(), |code| code.to_string()),
                result.content_length()
            );
        } else {
            log::warn!(
                target: "pagecrawl::crawl",
                "[{}] {} failed: {}",
                index + 1,
                result.url(),
                result.error().unwrap_or("unknown error")
            );
        }
    }

    fn report_aborted(&self, remaining: usize) {
        log::warn!(
            target: "pagecrawl::crawl",
            "Crawl aborted, {remaining} URL(s) not attempted"
        );
    }

    fn report_finished(&self, summary: &CrawlSummary) {
        log::info!(
            target: "pagecrawl::crawl",
            "Crawl finished: {} total, {} successful, {} failed",
            summary.total,
            summary.successful,
            summary.failed
        );
    }
}
