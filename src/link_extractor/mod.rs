//! Outbound link discovery for a single page.
//!
//! Every `<a href>` is resolved against the page URL, non-navigational
//! targets are dropped, and the remaining http(s) links are deduplicated and
//! split into internal (same host as the page) and external links.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

use crate::utils::same_host;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("BUG: hardcoded CSS selector 'a[href]' is invalid")
});

/// Schemes that never point at a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Links discovered on one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Links whose host equals the page host, first-seen order
    pub internal: Vec<String>,
    /// Links on any other host, first-seen order
    pub external: Vec<String>,
    /// Every distinct link in document order
    pub all: Vec<String>,
}

impl PageLinks {
    #[must_use]
    pub fn internal_count(&self) -> usize {
        self.internal.len()
    }

    #[must_use]
    pub fn external_count(&self) -> usize {
        self.external.len()
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.internal.len() + self.external.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Errors from link discovery
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The page URL links are resolved against is not an absolute URL
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Whether an `href` value is skipped before resolution
fn is_skipped_href(href: &str) -> bool {
    if href.is_empty() || href == "#" {
        return true;
    }
    let lower = href.get(..11).unwrap_or(href).to_ascii_lowercase();
    SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Discover the links of one HTML page.
///
/// # Errors
///
/// Returns `LinkError::InvalidBaseUrl` if `base_url` cannot be parsed as an
/// absolute URL. Individual hrefs that fail to resolve are skipped.
///
/// ```
/// use kodegen_tools_pagecrawl::link_extractor::extract_links;
///
/// let html = r#"<a href="/a">A</a><a href="/a">again</a><a href="https://other.com">O</a>"#;
/// let links = extract_links(html, "https://example.com/page").unwrap();
/// assert_eq!(links.internal, vec!["https://example.com/a"]);
/// assert_eq!(links.external, vec!["https://other.com/"]);
/// ```
pub fn extract_links(html: &str, base_url: &str) -> Result<PageLinks, LinkError> {
    let base = Url::parse(base_url).map_err(|e| LinkError::InvalidBaseUrl {
        url: base_url.to_string(),
        message: e.to_string(),
    })?;

    Ok(extract_links_from_url(html, &base))
}

/// Same as [`extract_links`] with an already parsed base URL
#[must_use]
pub fn extract_links_from_url(html: &str, base: &Url) -> PageLinks {
    let document = Html::parse_document(html);

    let mut links = PageLinks::default();
    let mut seen: HashSet<String> = HashSet::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if is_skipped_href(href) {
            continue;
        }

        let resolved = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                log::debug!(
                    target: "pagecrawl::links",
                    "Skipping unresolvable href {href:?} on {base}: {e}"
                );
                continue;
            }
        };

        if !matches!(resolved.scheme(), "http" | "https") || resolved.host_str().is_none() {
            continue;
        }

        let internal = same_host(&resolved, base);
        let link = String::from(resolved);
        if !seen.insert(link.clone()) {
            continue;
        }

        if internal {
            links.internal.push(link.clone());
        } else {
            links.external.push(link.clone());
        }
        links.all.push(link);
    }

    log::debug!(
        target: "pagecrawl::links",
        "Found {} links on {} ({} internal, {} external)",
        links.all.len(),
        base,
        links.internal.len(),
        links.external.len()
    );

    links
}
