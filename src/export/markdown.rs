//! Markdown export

use chrono::{DateTime, Utc};

use super::format_thousands;
use crate::crawl_engine::{CrawlResult, CrawlSummary};

/// Shortest backtick fence that cannot be closed by `content`
fn code_fence(content: &str) -> String {
    let mut longest = 0;
    let mut current = 0;
    for ch in content.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

/// Markdown report with a summary table and one section per URL
#[must_use]
pub fn render_markdown(results: &[CrawlResult], generated_at: DateTime<Utc>) -> String {
    let summary = CrawlSummary::from_results(results);
    let mut out = String::new();

    out.push_str("# Crawl Results\n");
    out.push('\n');
    out.push_str(&format!("_Generated: {}_\n", generated_at.to_rfc3339()));
    out.push('\n');
    out.push_str("| Total URLs | Successful | Failed | Avg Content Length |\n");
    out.push_str("|---|---|---|---|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} |\n",
        summary.total,
        summary.successful,
        summary.failed,
        summary.average_content_length.map_or_else(
            || "N/A".to_string(),
            |avg| format!("{} chars", format_thousands(avg.round() as usize))
        )
    ));

    for (i, result) in results.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("## {}. {}\n", i + 1, result.url()));
        out.push('\n');

        if !result.is_success() {
            if let Some(code) = result.status_code() {
                out.push_str(&format!("- **Status:** {code}\n"));
            }
            out.push_str(&format!(
                "- **Error:** {}\n",
                result.error().unwrap_or("Unknown error")
            ));
            continue;
        }

        if let Some(code) = result.status_code() {
            out.push_str(&format!("- **Status:** {code}\n"));
        }
        out.push_str(&format!(
            "- **Content Type:** {}\n",
            result.content_type().filter(|ct| !ct.is_empty()).unwrap_or("N/A")
        ));
        out.push_str(&format!("- **Encoding:** {}\n", result.encoding().unwrap_or("N/A")));
        out.push_str(&format!(
            "- **Content Length:** {} characters\n",
            format_thousands(result.content_length())
        ));

        if let Some(links) = result.links() {
            for (title, list) in [("Internal", &links.internal), ("External", &links.external)] {
                out.push('\n');
                out.push_str(&format!("### {title} Links ({})\n", list.len()));
                out.push('\n');
                for link in list {
                    out.push_str(&format!("- <{link}>\n"));
                }
            }
        }

        let content = result.content().unwrap_or_default();
        let fence = code_fence(content);
        out.push('\n');
        out.push_str("### Content\n");
        out.push('\n');
        out.push_str(&format!("{fence}text\n"));
        out.push_str(&format!("{content}\n"));
        out.push_str(&format!("{fence}\n"));
    }

    out
}
