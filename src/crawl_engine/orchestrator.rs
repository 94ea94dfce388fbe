//! Sequential crawl orchestration
//!
//! Runs fetch → extract → (links) for each URL strictly in input order, with
//! a fixed delay between consecutive URLs. Every failure is recorded in the
//! result for its URL and never stops the remaining URLs.

use std::collections::HashSet;

use super::abort::CrawlAbortHandle;
use super::crawl_types::{CrawlError, CrawlResult, CrawlSummary, LinkScope};
use super::progress::{NoOpProgress, ProgressReporter};
use crate::config::CrawlConfig;
use crate::content_extractor::ContentExtractor;
use crate::fetcher::{FetchedPage, Fetcher, HttpFetcher};
use crate::link_extractor::{PageLinks, extract_links};

/// Crawler for explicit URL lists
#[derive(Debug, Clone)]
pub struct PageCrawler<F = HttpFetcher> {
    fetcher: F,
    extractor: ContentExtractor,
    config: CrawlConfig,
    abort: CrawlAbortHandle,
}

impl PageCrawler<HttpFetcher> {
    /// Crawler backed by an HTTP client built from `config`
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Client` if the HTTP client cannot be built, or
    /// `CrawlError::Config` if the content selector is invalid.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetcher> PageCrawler<F> {
    /// Crawler using a custom fetcher
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Config` if the content selector is invalid.
    pub fn with_fetcher(config: CrawlConfig, fetcher: F) -> Result<Self, CrawlError> {
        let extractor = ContentExtractor::with_custom_selector(config.content_selector())?;
        Ok(Self {
            fetcher,
            extractor,
            config,
            abort: CrawlAbortHandle::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Handle that aborts crawls run by this crawler
    ///
    /// An abort is sticky: every later crawl on this crawler returns no
    /// results until [`CrawlAbortHandle::reset`] is called.
    #[must_use]
    pub fn abort_handle(&self) -> CrawlAbortHandle {
        self.abort.clone()
    }

    /// Crawl `urls` in order without progress reporting
    pub async fn crawl<I, S>(&self, urls: I) -> Vec<CrawlResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.crawl_with_progress(urls, &NoOpProgress).await
    }

    /// Crawl `urls` in order, one at a time.
    ///
    /// Blank entries are skipped. Duplicates are fetched again. The configured
    /// delay is applied after every URL except the last. If the crawl is
    /// aborted, URLs not yet attempted produce no result; a crawler that was
    /// already aborted returns an empty list.
    pub async fn crawl_with_progress<I, S, P>(&self, urls: I, progress: &P) -> Vec<CrawlResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: ProgressReporter + ?Sized,
    {
        let urls: Vec<String> = urls
            .into_iter()
            .map(|url| url.as_ref().trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();

        progress.report_started(urls.len());

        let mut results = Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            if self.abort.is_aborted() {
                progress.report_aborted(urls.len() - index);
                break;
            }

            progress.report_fetching(index, url);
            let result = self.crawl_url(url).await;
            progress.report_result(index, &result);
            results.push(result);

            if index + 1 < urls.len() {
                self.pause().await;
            }
        }

        progress.report_finished(&CrawlSummary::from_results(&results));
        results
    }

    /// Wait out the configured delay, returning early on abort.
    ///
    /// Returns `false` if the crawler is aborted before or during the wait.
    pub async fn pause(&self) -> bool {
        if self.abort.is_aborted() {
            return false;
        }
        let delay = self.config.delay();
        if delay.is_zero() {
            return true;
        }
        tokio::select! {
            () = tokio::time::sleep(delay) => true,
            () = self.abort.aborted() => {
                log::debug!(target: "pagecrawl::crawl", "Delay interrupted by abort");
                false
            }
        }
    }

    /// Fetch and process a single URL
    pub async fn crawl_url(&self, url: &str) -> CrawlResult {
        match self.fetcher.fetch(url).await {
            Ok(page) => self.process_page(&page),
            Err(e) => {
                log::warn!(target: "pagecrawl::crawl", "Failed to fetch {url}: {e}");
                let failed_url = e.url().map_or_else(|| url.trim().to_string(), str::to_string);
                CrawlResult::failed(failed_url, e.to_string())
            }
        }
    }

    fn process_page(&self, page: &FetchedPage) -> CrawlResult {
        // A missing header is recorded as an empty content type
        let content_type = Some(page.content_type.clone().unwrap_or_default());

        if self.config.fail_on_http_error() && !page.is_success() {
            return CrawlResult::failed_with_status(
                page.url.clone(),
                page.status,
                content_type,
                format!("HTTP error {} for url: {}", page.status_line(), page.url),
            );
        }

        let decoded = page.decode();
        let content = self.extractor.extract(&decoded.text, self.config.mode());

        let links = self
            .config
            .discover_links()
            .then(|| self.discover_links(&decoded.text, page));

        CrawlResult::succeeded(
            page.url.clone(),
            page.status,
            content_type,
            Some(decoded.encoding.to_string()),
            content,
            links,
        )
    }

    fn discover_links(&self, html: &str, page: &FetchedPage) -> PageLinks {
        // Redirects change the base that relative links resolve against
        match extract_links(html, &page.final_url) {
            Ok(links) => links,
            Err(e) => {
                log::warn!(
                    target: "pagecrawl::links",
                    "Link discovery failed for {}: {e}",
                    page.url
                );
                PageLinks::default()
            }
        }
    }
}

/// Collect the discovered links of successful results for a follow-up crawl.
///
/// Links keep their first-seen order across results and appear once even
/// when several pages link to them.
#[must_use]
pub fn recrawl_targets(results: &[CrawlResult], scope: LinkScope) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .iter()
        .filter(|result| result.is_success())
        .filter_map(CrawlResult::links)
        .flat_map(|links| scope.select(links).iter())
        .filter(|link| seen.insert(link.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_extractor::ExtractionMode;
    use crate::fetcher::FetchError;
    use crate::utils::normalize_input_url;
    use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Fetcher serving canned pages and recording every request
    #[derive(Default)]
    struct ScriptedFetcher {
        pages: Vec<(&'static str, u16, &'static str)>,
        requests: Mutex<Vec<(String, Instant)>>,
    }

    impl ScriptedFetcher {
        fn with_pages(pages: Vec<(&'static str, u16, &'static str)>) -> Self {
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requests
                .lock()
                .expect("requests mutex poisoned")
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }
    }

    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            let url = normalize_input_url(url).ok_or(FetchError::EmptyUrl)?;
            self.requests
                .lock()
                .expect("requests mutex poisoned")
                .push((url.clone(), Instant::now()));

            let Some((_, status, body)) = self.pages.iter().find(|(u, _, _)| *u == url) else {
                return Err(FetchError::Network {
                    url,
                    message: "connection refused".to_string(),
                });
            };

            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
            Ok(FetchedPage::new(
                url.clone(),
                url,
                *status,
                headers,
                body.as_bytes().to_vec(),
            ))
        }
    }

    const PAGE: &str = r#"<html><body><nav><a href="/nav">Nav</a></nav>
        <main><p>Hello World</p><a href="/a">A</a><a href="https://other.com/x">X</a></main>
        </body></html>"#;

    fn config() -> CrawlConfig {
        CrawlConfig::builder()
            .delay_secs(0.0)
            .discover_links(true)
            .build()
            .expect("valid config")
    }

    #[tokio::test]
    async fn test_sequential_order_and_scheme_normalization() -> Result<(), CrawlError> {
        let fetcher = ScriptedFetcher::with_pages(vec![
            ("https://example.com", 200, PAGE),
            ("http://example.org", 200, PAGE),
        ]);
        let crawler = PageCrawler::with_fetcher(config(), fetcher)?;

        let results = crawler
            .crawl(["example.com", "  ", "http://example.org", "example.com"])
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(
            crawler.fetcher.requested(),
            vec!["https://example.com", "http://example.org", "https://example.com"]
        );
        assert!(results.iter().all(CrawlResult::is_success));
        assert_eq!(results[0].content(), Some("Hello World AX"));
        Ok(())
    }

    #[tokio::test]
    async fn test_links_and_counts() -> Result<(), CrawlError> {
        let fetcher = ScriptedFetcher::with_pages(vec![("https://example.com", 200, PAGE)]);
        let crawler = PageCrawler::with_fetcher(config(), fetcher)?;

        let result = crawler.crawl_url("example.com").await;
        let links = result.links().expect("links requested");
        assert_eq!(
            links.internal,
            vec!["https://example.com/nav", "https://example.com/a"]
        );
        assert_eq!(links.external, vec!["https://other.com/x"]);

        let counts = result.link_counts().expect("counts present with links");
        assert_eq!(counts.total_links_count, links.internal.len() + links.external.len());
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_is_isolated() -> Result<(), CrawlError> {
        let fetcher = ScriptedFetcher::with_pages(vec![("https://good.example", 200, PAGE)]);
        let crawler = PageCrawler::with_fetcher(config(), fetcher)?;

        let results = crawler.crawl(["down.example", "good.example"]).await;

        assert_eq!(results.len(), 2);
        assert!(!results[0].is_success());
        assert_eq!(results[0].url(), "https://down.example");
        assert!(
            results[0]
                .error()
                .is_some_and(|e| e.contains("connection refused"))
        );
        assert_eq!(results[0].content(), None);
        assert!(results[1].is_success());
        Ok(())
    }

    #[tokio::test]
    async fn test_http_error_policy() -> Result<(), CrawlError> {
        let pages = vec![("https://example.com/missing", 404, "<p>Not here</p>")];

        let lenient = PageCrawler::with_fetcher(
            config(),
            ScriptedFetcher::with_pages(pages.clone()),
        )?;
        let result = lenient.crawl_url("example.com/missing").await;
        assert!(result.is_success());
        assert_eq!(result.status_code(), Some(404));
        assert_eq!(result.content(), Some("Not here"));

        let strict_config = CrawlConfig::builder()
            .delay_secs(0.0)
            .fail_on_http_error(true)
            .build()?;
        let strict =
            PageCrawler::with_fetcher(strict_config, ScriptedFetcher::with_pages(pages))?;
        let result = strict.crawl_url("example.com/missing").await;
        assert!(!result.is_success());
        assert_eq!(result.status_code(), Some(404));
        assert_eq!(
            result.error(),
            Some("HTTP error 404 Not Found for url: https://example.com/missing")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_full_page_mode_without_links() -> Result<(), CrawlError> {
        let config = CrawlConfig::builder()
            .delay_secs(0.0)
            .mode(ExtractionMode::FullPage)
            .build()?;
        let fetcher = ScriptedFetcher::with_pages(vec![("https://example.com", 200, PAGE)]);
        let crawler = PageCrawler::with_fetcher(config, fetcher)?;

        let result = crawler.crawl_url("example.com").await;
        assert_eq!(result.content(), Some(PAGE));
        assert_eq!(result.content_length(), PAGE.chars().count());
        assert!(result.links().is_none());
        assert_eq!(result.encoding(), Some("UTF-8"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delay_only_between_urls() -> Result<(), CrawlError> {
        let config = CrawlConfig::builder().delay_secs(0.05).build()?;
        let fetcher = ScriptedFetcher::with_pages(vec![("https://example.com", 200, PAGE)]);
        let crawler = PageCrawler::with_fetcher(config, fetcher)?;

        let started = Instant::now();
        crawler
            .crawl(["example.com", "example.com", "example.com"])
            .await;
        assert!(started.elapsed() >= Duration::from_millis(100));

        let requests = crawler.fetcher.requests.lock().expect("requests mutex poisoned");
        for pair in requests.windows(2) {
            assert!(pair[1].1.duration_since(pair[0].1) >= Duration::from_millis(50));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_abort_stops_further_fetches() -> Result<(), CrawlError> {
        let config = CrawlConfig::builder().delay_secs(30.0).build()?;
        let fetcher = ScriptedFetcher::with_pages(vec![("https://example.com", 200, PAGE)]);
        let crawler = PageCrawler::with_fetcher(config, fetcher)?;
        let handle = crawler.abort_handle();

        let aborter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.abort();
        });

        let results = tokio::time::timeout(
            Duration::from_secs(5),
            crawler.crawl(["example.com", "example.com", "example.com"]),
        )
        .await
        .expect("abort should interrupt the 30s delay");
        aborter.await.expect("aborter task should not panic");

        assert_eq!(results.len(), 1);
        assert_eq!(crawler.fetcher.requested().len(), 1);
        Ok(())
    }

    /// Fetcher answering every URL with a fixed status and no headers
    struct HeaderlessFetcher {
        status: u16,
    }

    impl Fetcher for HeaderlessFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            let url = normalize_input_url(url).ok_or(FetchError::EmptyUrl)?;
            Ok(FetchedPage::new(
                url.clone(),
                url,
                self.status,
                HeaderMap::new(),
                b"<main>bare</main>".to_vec(),
            ))
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_empty_string() -> Result<(), Box<dyn std::error::Error>> {
        let crawler = PageCrawler::with_fetcher(config(), HeaderlessFetcher { status: 200 })?;
        let result = crawler.crawl_url("example.com").await;

        assert_eq!(result.content_type(), Some(""));
        let json = serde_json::to_value(&result)?;
        assert_eq!(json["content_type"], "");

        let strict_config = CrawlConfig::builder()
            .delay_secs(0.0)
            .fail_on_http_error(true)
            .build()?;
        let strict = PageCrawler::with_fetcher(strict_config, HeaderlessFetcher { status: 500 })?;
        let json = serde_json::to_value(strict.crawl_url("example.com").await)?;
        assert_eq!(json["success"], false);
        assert_eq!(json["content_type"], "");
        Ok(())
    }

    #[tokio::test]
    async fn test_abort_is_sticky_until_reset() -> Result<(), CrawlError> {
        let fetcher = ScriptedFetcher::with_pages(vec![("https://example.com", 200, PAGE)]);
        let crawler = PageCrawler::with_fetcher(config(), fetcher)?;
        let handle = crawler.abort_handle();

        handle.abort();
        assert!(crawler.crawl(["example.com"]).await.is_empty());
        assert!(crawler.crawl(["example.com"]).await.is_empty());
        assert!(crawler.fetcher.requested().is_empty());

        handle.reset();
        assert_eq!(crawler.crawl(["example.com"]).await.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_pause_is_cut_short_by_abort() -> Result<(), CrawlError> {
        let config = CrawlConfig::builder().delay_secs(30.0).build()?;
        let crawler = PageCrawler::with_fetcher(config, ScriptedFetcher::default())?;
        let handle = crawler.abort_handle();

        let aborter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.abort();
        });

        let completed = tokio::time::timeout(Duration::from_secs(5), crawler.pause())
            .await
            .expect("abort should interrupt the 30s pause");
        aborter.await.expect("aborter task should not panic");

        assert!(!completed);
        assert!(!crawler.pause().await, "an aborted crawler does not wait");
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_delay_pause_returns_immediately() -> Result<(), CrawlError> {
        let crawler = PageCrawler::with_fetcher(config(), ScriptedFetcher::default())?;
        assert!(crawler.pause().await);
        Ok(())
    }

    #[test]
    fn test_recrawl_targets_dedups_across_pages() {
        let links = |internal: &[&str], external: &[&str]| PageLinks {
            internal: internal.iter().map(|s| s.to_string()).collect(),
            external: external.iter().map(|s| s.to_string()).collect(),
            all: internal
                .iter()
                .chain(external.iter())
                .map(|s| s.to_string())
                .collect(),
        };
        let results = vec![
            CrawlResult::succeeded(
                "https://a.com",
                200,
                None,
                None,
                String::new(),
                Some(links(&["https://a.com/1", "https://a.com/2"], &["https://x.com/"])),
            ),
            CrawlResult::failed("https://b.com", "down"),
            CrawlResult::succeeded(
                "https://a.com/1",
                200,
                None,
                None,
                String::new(),
                Some(links(&["https://a.com/2", "https://a.com/3"], &["https://x.com/"])),
            ),
        ];

        assert_eq!(
            recrawl_targets(&results, LinkScope::Internal),
            vec!["https://a.com/1", "https://a.com/2", "https://a.com/3"]
        );
        assert_eq!(
            recrawl_targets(&results, LinkScope::External),
            vec!["https://x.com/"]
        );
        assert_eq!(recrawl_targets(&results, LinkScope::All).len(), 4);
    }
}
