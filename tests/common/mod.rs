//! Test utilities and helper functions for the pagecrawl test suite

use kodegen_tools_pagecrawl::CrawlConfig;
use mockito::{Mock, ServerGuard};
use tempfile::TempDir;

/// Creates a temporary directory for test output
#[allow(dead_code)]
pub fn create_test_dir() -> anyhow::Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test HTML document with specified content
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>body {{ font-family: sans-serif; }}</style>
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Page with site chrome around an article holding internal and external links
#[allow(dead_code)]
pub fn create_article_html() -> String {
    create_test_html(
        "Getting Started",
        r##"<header><a href="/">Home</a></header>
    <nav>
        <a href="/docs">Docs</a>
        <a href="/blog">Blog</a>
    </nav>
    <main>
        <h1>Getting Started</h1>
        <p>Install the tool and run it.</p>
        <p>See <a href="/docs">the docs</a> or <a href="https://github.com/example/repo">GitHub</a>.</p>
        <a href="javascript:void(0)">Print</a>
        <a href="#">Back to top</a>
        <script>trackPageView();</script>
    </main>
    <footer>
        <a href="mailto:team@example.com">Contact</a>
        <a href="https://twitter.com/example">Twitter</a>
    </footer>"##,
    )
}

/// Serve `body` as UTF-8 HTML at `path`
#[allow(dead_code)]
pub async fn mock_html(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

/// Config with no delay between URLs and a short timeout
#[allow(dead_code)]
pub fn fast_config(discover_links: bool) -> CrawlConfig {
    CrawlConfig::builder()
        .delay_secs(0.0)
        .timeout_secs(5)
        .discover_links(discover_links)
        .build()
        .expect("test config is valid")
}
