//! Ordered content-region policy.
//!
//! The main content of a page is the first element matching, in priority
//! order: `<main>`, `<article>`, then elements whose role, id or class
//! commonly marks primary content. When nothing matches, `<body>` is used,
//! and the document root as a last resort.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use super::{EXCLUDED_TAGS, ExtractError};

/// Built-in content regions in priority order
const DEFAULT_REGIONS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "#main-content",
    ".main-content",
    "#content",
    ".content",
    ".post-content",
    ".entry-content",
    "[itemprop='articleBody']",
    ".article-body",
    ".story-body",
];

// Parsed once at first access. Hardcoded selectors failing to parse is a bug.
static DEFAULT_POLICY: LazyLock<ContentPolicy> = LazyLock::new(|| ContentPolicy {
    regions: DEFAULT_REGIONS
        .iter()
        .map(|css| {
            ContentRegion::parse(css)
                .unwrap_or_else(|e| panic!("BUG: hardcoded content selector is invalid: {e}"))
        })
        .collect(),
});

static EXCLUDED_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&EXCLUDED_TAGS.join(", "))
        .expect("BUG: hardcoded CSS selector for excluded tags is invalid")
});

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body").expect("BUG: hardcoded CSS selector 'body' is invalid")
});

/// One named candidate for the main content region
#[derive(Debug, Clone)]
pub struct ContentRegion {
    name: String,
    selector: Selector,
}

impl ContentRegion {
    /// Parse a CSS selector into a region named after it
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidSelector` if `css` is not valid CSS.
    pub fn parse(css: &str) -> Result<Self, ExtractError> {
        let selector = Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
            selector: css.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name: css.to_string(),
            selector,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First element matching this region that is not inside an excluded subtree
    fn first_match<'a>(
        &self,
        document: &'a Html,
        excluded: &HashSet<NodeId>,
    ) -> Option<ElementRef<'a>> {
        document
            .select(&self.selector)
            .find(|element| !is_within_excluded(element, excluded))
    }
}

/// Outcome of evaluating a [`ContentPolicy`] against a document
#[derive(Debug, Clone, Copy)]
pub enum RegionMatch<'a> {
    /// A policy region matched
    Region {
        name: &'a str,
        element: ElementRef<'a>,
    },
    /// No region matched; the `<body>` element is used
    Body(ElementRef<'a>),
    /// No region and no body; the document root is used
    Document(ElementRef<'a>),
}

impl<'a> RegionMatch<'a> {
    #[must_use]
    pub fn element(&self) -> ElementRef<'a> {
        match self {
            Self::Region { element, .. } => *element,
            Self::Body(element) | Self::Document(element) => *element,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Region { name, .. } => *name,
            Self::Body(_) => "body",
            Self::Document(_) => "document",
        }
    }
}

/// Ordered list of content regions, evaluated first match wins
#[derive(Debug, Clone)]
pub struct ContentPolicy {
    regions: Vec<ContentRegion>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        DEFAULT_POLICY.clone()
    }
}

impl ContentPolicy {
    /// Policy with an explicit region list (no built-in regions)
    #[must_use]
    pub fn from_regions(regions: Vec<ContentRegion>) -> Self {
        Self { regions }
    }

    /// Default policy with `css` tried before every built-in region
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidSelector` if `css` is not valid CSS.
    pub fn with_custom_selector(css: &str) -> Result<Self, ExtractError> {
        let mut regions = Vec::with_capacity(DEFAULT_REGIONS.len() + 1);
        regions.push(ContentRegion::parse(css)?);
        regions.extend(DEFAULT_POLICY.regions.iter().cloned());
        Ok(Self { regions })
    }

    #[must_use]
    pub fn regions(&self) -> &[ContentRegion] {
        &self.regions
    }

    /// Evaluate the policy against `document`, skipping candidates that sit
    /// inside excluded subtrees.
    #[must_use]
    pub fn find<'a>(&'a self, document: &'a Html, excluded: &HashSet<NodeId>) -> RegionMatch<'a> {
        for region in &self.regions {
            if let Some(element) = region.first_match(document, excluded) {
                return RegionMatch::Region {
                    name: region.name(),
                    element,
                };
            }
        }

        if let Some(body) = document.select(&BODY_SELECTOR).next() {
            return RegionMatch::Body(body);
        }

        RegionMatch::Document(document.root_element())
    }
}

/// Ids of every element whose subtree is dropped from extracted text
#[must_use]
pub fn excluded_nodes(document: &Html) -> HashSet<NodeId> {
    document
        .select(&EXCLUDED_SELECTOR)
        .map(|element| element.id())
        .collect()
}

fn is_within_excluded(element: &ElementRef<'_>, excluded: &HashSet<NodeId>) -> bool {
    excluded.contains(&element.id()) || element.ancestors().any(|node| excluded.contains(&node.id()))
}
