//! Tests for the HTTP fetcher against local servers

use kodegen_tools_pagecrawl::config::CrawlConfig;
use kodegen_tools_pagecrawl::{FetchError, FetchErrorKind, Fetcher, HttpFetcher};
use tokio::net::TcpListener;

mod common;

fn fetcher(timeout_secs: u64) -> HttpFetcher {
    let config = CrawlConfig::builder()
        .timeout_secs(timeout_secs)
        .user_agent("pagecrawl-test/1.0")
        .build()
        .unwrap();
    HttpFetcher::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_status_headers_and_body() {
    let mut server = mockito::Server::new_async().await;
    let html = common::create_test_html("Hello", "<main><p>Hello</p></main>");
    let mock = server
        .mock("GET", "/page")
        .match_header("user-agent", "pagecrawl-test/1.0")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(&html)
        .create_async()
        .await;

    let url = format!("{}/page", server.url());
    let page = fetcher(5).fetch(&url).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.url, url);
    assert_eq!(page.final_url, url);
    assert_eq!(page.status, 200);
    assert!(page.is_success());
    assert_eq!(page.content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert_eq!(page.charset.as_deref(), Some("utf-8"));

    let decoded = page.decode();
    assert_eq!(decoded.text, html);
    assert_eq!(decoded.encoding, "UTF-8");
    assert!(!decoded.had_errors);
}

#[tokio::test]
async fn test_fetch_decodes_declared_legacy_charset() {
    let mut server = mockito::Server::new_async().await;
    // "café" in windows-1252
    let body: &[u8] = b"<html><body><p>caf\xe9</p></body></html>";
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html; charset=iso-8859-1")
        .with_body(body)
        .create_async()
        .await;

    let page = fetcher(5).fetch(&server.url()).await.unwrap();
    let decoded = page.decode();

    assert_eq!(decoded.encoding, "windows-1252");
    assert!(decoded.text.contains("café"));
}

#[tokio::test]
async fn test_non_success_status_is_a_completed_fetch() {
    let mut server = mockito::Server::new_async().await;
    let _mock = common::mock_html(&mut server, "/missing", 404, "<p>Not here</p>").await;

    let page = fetcher(5)
        .fetch(&format!("{}/missing", server.url()))
        .await
        .unwrap();

    assert_eq!(page.status, 404);
    assert!(!page.is_success());
    assert_eq!(page.status_line(), "404 Not Found");
}

#[tokio::test]
async fn test_redirect_is_followed_and_final_url_recorded() {
    let mut server = mockito::Server::new_async().await;
    let _old = server
        .mock("GET", "/old")
        .with_status(301)
        .with_header("location", "/new/")
        .create_async()
        .await;
    let _new = common::mock_html(&mut server, "/new/", 200, "<p>moved</p>").await;

    let requested = format!("{}/old", server.url());
    let page = fetcher(5).fetch(&requested).await.unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.url, requested);
    assert_eq!(page.final_url, format!("{}/new/", server.url()));
}

#[tokio::test]
async fn test_scheme_is_prepended_before_request() {
    // Nothing listens on port 1; the error still reports the normalized URL
    let err = fetcher(5).fetch("  127.0.0.1:1/path ").await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Network);
    assert_eq!(err.url(), Some("https://127.0.0.1:1/path"));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let err = fetcher(5).fetch("http://127.0.0.1:1/").await.unwrap_err();

    assert!(matches!(err, FetchError::Network { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Network error for http://127.0.0.1:1/"));
}

#[tokio::test]
async fn test_blank_url_is_rejected_without_request() {
    let err = fetcher(5).fetch("   ").await.unwrap_err();
    assert_eq!(err, FetchError::EmptyUrl);
    assert_eq!(err.url(), None);
}

#[tokio::test]
async fn test_url_without_host_is_invalid() {
    let err = fetcher(5).fetch("http://").await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::InvalidUrl);
}

#[tokio::test]
async fn test_unresponsive_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept connections and hold them open without ever answering
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let err = fetcher(1)
        .fetch(&format!("http://{addr}/slow"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Timeout, "got {err:?}");
    server.abort();
}
