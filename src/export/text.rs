//! Plain text export

use chrono::{DateTime, Utc};

use super::format_thousands;
use crate::crawl_engine::{CrawlResult, CrawlSummary};

const SECTION_RULE: &str =
    "================================================================================";

/// Human-readable report, one section per URL
#[must_use]
pub fn render_text(results: &[CrawlResult], generated_at: DateTime<Utc>) -> String {
    let summary = CrawlSummary::from_results(results);
    let mut out = String::new();

    out.push_str("Crawl Results\n");
    out.push_str(&format!("Generated: {}\n", generated_at.to_rfc3339()));
    out.push_str(&format!(
        "Total URLs: {} | Successful: {} | Failed: {}\n",
        summary.total, summary.successful, summary.failed
    ));
    if let Some(avg) = summary.average_content_length {
        out.push_str(&format!(
            "Average Content Length: {} characters\n",
            format_thousands(avg.round() as usize)
        ));
    }

    for (i, result) in results.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{SECTION_RULE}\n"));
        out.push_str(&format!("[{}] {}\n", i + 1, result.url()));
        out.push_str(&format!("{SECTION_RULE}\n"));

        if let Some(code) = result.status_code() {
            out.push_str(&format!("Status Code: {code}\n"));
        }

        if !result.is_success() {
            out.push_str("Result: FAILED\n");
            out.push_str(&format!("Error: {}\n", result.error().unwrap_or("Unknown error")));
            continue;
        }

        out.push_str("Result: OK\n");
        out.push_str(&format!(
            "Content Type: {}\n",
            result.content_type().filter(|ct| !ct.is_empty()).unwrap_or("N/A")
        ));
        out.push_str(&format!("Encoding: {}\n", result.encoding().unwrap_or("N/A")));
        out.push_str(&format!(
            "Content Length: {} characters\n",
            format_thousands(result.content_length())
        ));

        if let Some(links) = result.links() {
            out.push_str(&format!("Internal Links ({}):\n", links.internal_count()));
            for link in &links.internal {
                out.push_str(&format!("  - {link}\n"));
            }
            out.push_str(&format!("External Links ({}):\n", links.external_count()));
            for link in &links.external {
                out.push_str(&format!("  - {link}\n"));
            }
        }

        out.push('\n');
        out.push_str("Content:\n");
        out.push_str(&format!("{}\n", result.content().unwrap_or_default()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link_extractor::PageLinks;

    #[test]
    fn test_empty_content_type_shows_placeholder() {
        let results = vec![CrawlResult::succeeded(
            "https://example.com",
            200,
            Some(String::new()),
            None,
            "Hi".to_string(),
            None,
        )];
        let text = render_text(&results, Utc::now());

        assert!(text.contains("Content Type: N/A\nEncoding: N/A\n"));
        assert!(text.contains("Content Length: 2 characters\n"));
    }

    #[test]
    fn test_text_sections() {
        let results = vec![
            CrawlResult::succeeded(
                "https://example.com",
                200,
                Some("text/html".to_string()),
                Some("UTF-8".to_string()),
                "Hello World".to_string(),
                Some(PageLinks {
                    internal: vec!["https://example.com/a".to_string()],
                    external: vec![],
                    all: vec!["https://example.com/a".to_string()],
                }),
            ),
            CrawlResult::failed("https://down.example", "Network error for https://down.example"),
        ];
        let text = render_text(&results, Utc::now());

        assert!(text.starts_with("Crawl Results\nGenerated: "));
        assert!(text.contains("Total URLs: 2 | Successful: 1 | Failed: 1\n"));
        assert!(text.contains(
            "Status Code: 200\nResult: OK\nContent Type: text/html\nEncoding: UTF-8\n"
        ));
        assert!(text.contains("[1] https://example.com"));
        assert!(text.contains("Internal Links (1):\n  - https://example.com/a"));
        assert!(text.contains("Content:\nHello World"));
        assert!(text.contains("[2] https://down.example"));
        assert!(text.contains("Result: FAILED\nError: Network error for https://down.example\n"));
    }
}
