//! Character encoding detection and body decoding

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use std::sync::LazyLock;

/// How many leading bytes are scanned for a `<meta>` charset declaration
const META_SNIFF_LIMIT: usize = 1024;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_\-:.]+)"#)
        .expect("BUG: hardcoded meta charset regex is invalid")
});

/// Decoded response text together with the encoding that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    /// WHATWG name of the encoding used, e.g. `UTF-8` or `windows-1252`
    pub encoding: &'static str,
    /// Whether malformed sequences were replaced with U+FFFD
    pub had_errors: bool,
}

/// Extract the `charset` parameter of a `Content-Type` value
///
/// ```
/// use kodegen_tools_pagecrawl::fetcher::charset_from_content_type;
/// assert_eq!(
///     charset_from_content_type("text/html; Charset=\"utf-8\"").as_deref(),
///     Some("utf-8")
/// );
/// assert_eq!(charset_from_content_type("text/html"), None);
/// ```
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Charset declared by a `<meta charset>` or `<meta http-equiv>` tag near the
/// start of the document
#[must_use]
pub fn sniff_meta_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    let captures = META_CHARSET_RE.captures(head)?;
    let label = captures.get(1)?;
    Some(String::from_utf8_lossy(label.as_bytes()).into_owned())
}

/// Decode `body`, preferring a declared charset, then a sniffed one, then UTF-8.
///
/// Unknown labels are ignored. A byte order mark overrides every label.
#[must_use]
pub fn decode_body(body: &[u8], declared: Option<&str>) -> DecodedBody {
    let encoding = declared
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .or_else(|| {
            sniff_meta_charset(body).and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(body);

    DecodedBody {
        text: text.into_owned(),
        encoding: used.name(),
        had_errors,
    }
}
