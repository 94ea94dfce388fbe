//! Configuration module for page crawling
//!
//! This module provides the `CrawlConfig` struct and its builder
//! for configuring crawl operations with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::CrawlConfigBuilder;
pub use types::CrawlConfig;
