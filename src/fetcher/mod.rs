//! Page fetching.
//!
//! A [`Fetcher`] performs exactly one HTTP GET per URL. The orchestrator is
//! generic over it so crawls can run against any transport; [`HttpFetcher`]
//! is the reqwest-backed implementation used in production.

pub mod charset;
pub mod http_fetcher;
pub mod types;

use std::future::Future;

pub use charset::{DecodedBody, charset_from_content_type, decode_body, sniff_meta_charset};
pub use http_fetcher::HttpFetcher;
pub use types::{FetchError, FetchErrorKind, FetchedPage};

/// One-shot page retrieval
pub trait Fetcher: Send + Sync {
    /// Fetch `url` once, without retries.
    ///
    /// Implementations normalize the input the same way: surrounding
    /// whitespace is trimmed and `https://` is prepended when the input has no
    /// http(s) scheme.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}
