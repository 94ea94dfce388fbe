//! JSON export

use crate::crawl_engine::{CrawlError, CrawlResult};

/// Pretty-printed JSON array of results with stable key names
///
/// # Errors
///
/// Returns `CrawlError::Serialization` if serialization fails.
pub fn results_to_json(results: &[CrawlResult]) -> Result<String, CrawlError> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Parse a JSON export back into results
///
/// # Errors
///
/// Returns `CrawlError::Serialization` if `json` is not a valid export.
pub fn results_from_json(json: &str) -> Result<Vec<CrawlResult>, CrawlError> {
    Ok(serde_json::from_str(json)?)
}
