//! reqwest-backed fetcher

use reqwest::Client;
use url::Url;

use super::Fetcher;
use super::types::{FetchError, FetchedPage};
use crate::config::CrawlConfig;
use crate::crawl_engine::CrawlError;
use crate::utils::normalize_input_url;

/// HTTP fetcher sharing one connection pool across requests
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Client` if the HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| CrawlError::Client(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Use an existing client as is
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let url = normalize_input_url(url).ok_or(FetchError::EmptyUrl)?;

        let parsed = Url::parse(&url).map_err(|e| FetchError::InvalidUrl {
            url: url.clone(),
            message: e.to_string(),
        })?;
        if parsed.host_str().is_none() {
            return Err(FetchError::InvalidUrl {
                url,
                message: "URL has no host".to_string(),
            });
        }

        log::debug!(target: "pagecrawl::fetch", "GET {url}");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, &e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, &e))?;

        log::debug!(
            target: "pagecrawl::fetch",
            "{url} -> {status} ({} bytes, final URL {final_url})",
            body.len()
        );

        Ok(FetchedPage::new(
            url,
            final_url,
            status.as_u16(),
            headers,
            body.to_vec(),
        ))
    }
}
