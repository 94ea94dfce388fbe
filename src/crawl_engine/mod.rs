//! Crawl Engine Module
//!
//! This module contains the sequential crawl orchestrator together with the
//! result types, progress reporting and abort handling it relies on.

// Sub-modules
pub mod abort;
pub mod crawl_types;
pub mod orchestrator;
pub mod progress;

// Re-export orchestration and progress types
pub use abort::CrawlAbortHandle;
pub use orchestrator::{PageCrawler, recrawl_targets};
pub use progress::{LogProgress, NoOpProgress, ProgressReporter};

// Re-export crawl types
pub use crawl_types::{CrawlError, CrawlResult, CrawlSummary, LinkCounts, LinkScope};
