//! Fetch results and fetch errors

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

use super::charset::{DecodedBody, charset_from_content_type, decode_body};

/// Coarse classification of fetch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The input could not be turned into a requestable URL
    InvalidUrl,
    /// Connection, DNS, TLS or body read failure
    Network,
    /// The request did not complete within the configured timeout
    Timeout,
}

/// Failure to obtain a response for one URL
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("URL is empty")]
    EmptyUrl,

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} timed out: {message}")]
    Timeout { url: String, message: String },
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::EmptyUrl | Self::InvalidUrl { .. } => FetchErrorKind::InvalidUrl,
            Self::Network { .. } => FetchErrorKind::Network,
            Self::Timeout { .. } => FetchErrorKind::Timeout,
        }
    }

    /// The normalized URL the failure relates to, when there was one
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::EmptyUrl => None,
            Self::InvalidUrl { url, .. } | Self::Network { url, .. } | Self::Timeout { url, .. } => {
                Some(url)
            }
        }
    }

    /// Map a reqwest failure for `url` onto a fetch error
    #[must_use]
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let message = error_chain(err);
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                message,
            }
        } else if err.is_builder() {
            Self::InvalidUrl {
                url: url.to_string(),
                message,
            }
        } else {
            Self::Network {
                url: url.to_string(),
                message,
            }
        }
    }
}

/// Render an error with its full source chain, `outer: inner: root`
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// A received HTTP response, any status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Normalized URL that was requested
    pub url: String,
    /// URL of the final response after redirects
    pub final_url: String,
    pub status: u16,
    pub headers: HeaderMap,
    /// `Content-Type` header value, if present
    pub content_type: Option<String>,
    /// Charset declared in the `Content-Type` header
    pub charset: Option<String>,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Build a page from response parts; content type and charset are read from `headers`
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        final_url: impl Into<String>,
        status: u16,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let charset = content_type.as_deref().and_then(charset_from_content_type);

        Self {
            url: url.into(),
            final_url: final_url.into(),
            status,
            headers,
            content_type,
            charset,
            body,
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status code with its canonical reason phrase, e.g. `404 Not Found`
    #[must_use]
    pub fn status_line(&self) -> String {
        match StatusCode::from_u16(self.status) {
            Ok(status) => status.to_string(),
            Err(_) => self.status.to_string(),
        }
    }

    /// Decode the body using the declared charset, a sniffed `<meta>` charset, or UTF-8
    #[must_use]
    pub fn decode(&self) -> DecodedBody {
        decode_body(&self.body, self.charset.as_deref())
    }
}
