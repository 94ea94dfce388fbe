// Command-line front end for the page crawler.
//
// Crawls the given URLs sequentially, optionally re-crawls the discovered
// links once, and writes the chosen export to a file or stdout.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kodegen_tools_pagecrawl::export::{self, ExportFormat, ResultFilter};
use kodegen_tools_pagecrawl::{
    CrawlConfig, ExtractionMode, LinkScope, LogProgress, PageCrawler, recrawl_targets,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    BodyOnly,
    FullPage,
}

impl From<ModeArg> for ExtractionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::BodyOnly => Self::BodyOnly,
            ModeArg::FullPage => Self::FullPage,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Text,
    Markdown,
    Llm,
    LlmJson,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Text => Self::Text,
            FormatArg::Markdown => Self::Markdown,
            FormatArg::Llm => Self::LlmContext,
            FormatArg::LlmJson => Self::LlmJson,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShowArg {
    All,
    Successful,
    Failed,
}

impl From<ShowArg> for ResultFilter {
    fn from(arg: ShowArg) -> Self {
        match arg {
            ShowArg::All => Self::All,
            ShowArg::Successful => Self::Successful,
            ShowArg::Failed => Self::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FollowArg {
    Internal,
    External,
    All,
}

impl From<FollowArg> for LinkScope {
    fn from(arg: FollowArg) -> Self {
        match arg {
            FollowArg::Internal => Self::Internal,
            FollowArg::External => Self::External,
            FollowArg::All => Self::All,
        }
    }
}

/// Fetch pages, extract their main content and discover their links
#[derive(Parser, Debug)]
#[command(name = "kodegen-pagecrawl", version, about)]
struct Cli {
    /// URLs to crawl; `https://` is added when no scheme is given
    urls: Vec<String>,

    /// File with one URL per line (blank lines are ignored)
    #[arg(long, short = 'f', env = "PAGECRAWL_FILE")]
    file: Option<PathBuf>,

    /// What to keep from each page
    #[arg(long, short = 'm', value_enum, env = "PAGECRAWL_MODE", default_value = "body-only")]
    mode: ModeArg,

    /// Discover internal and external links on every page
    #[arg(long, short = 'l', env = "PAGECRAWL_LINKS")]
    links: bool,

    /// Seconds to wait between consecutive requests
    #[arg(long, env = "PAGECRAWL_DELAY", default_value_t = kodegen_tools_pagecrawl::utils::DEFAULT_DELAY_SECS)]
    delay: f64,

    /// Per-request timeout in seconds
    #[arg(long, env = "PAGECRAWL_TIMEOUT", default_value_t = kodegen_tools_pagecrawl::utils::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "PAGECRAWL_USER_AGENT")]
    user_agent: Option<String>,

    /// CSS selector tried before the built-in main-content regions
    #[arg(long, env = "PAGECRAWL_CONTENT_SELECTOR")]
    content_selector: Option<String>,

    /// Count non-2xx responses as failed crawls
    #[arg(long, env = "PAGECRAWL_FAIL_ON_HTTP_ERROR")]
    fail_on_http_error: bool,

    /// Re-crawl the discovered links of this category once (implies --links)
    #[arg(long, value_enum)]
    follow: Option<FollowArg>,

    /// Export format
    #[arg(long, value_enum, env = "PAGECRAWL_FORMAT", default_value = "json")]
    format: FormatArg,

    /// Which results to include in the export
    #[arg(long, value_enum, default_value = "all")]
    show: ShowArg,

    /// Write the export here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

impl Cli {
    fn build_config(&self) -> Result<CrawlConfig> {
        let mut builder = CrawlConfig::builder()
            .mode(self.mode.into())
            .discover_links(self.links || self.follow.is_some())
            .delay_secs(self.delay)
            .timeout_secs(self.timeout)
            .fail_on_http_error(self.fail_on_http_error)
            .content_selector(self.content_selector.clone());
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(builder.build()?)
    }

    async fn collect_urls(&self) -> Result<Vec<String>> {
        let mut urls = self.urls.clone();
        if let Some(path) = &self.file {
            let contents = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read URL file {}", path.display()))?;
            urls.extend(contents.lines().map(str::to_string));
        }
        urls.retain(|url| !url.trim().is_empty());
        Ok(urls)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the export
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.build_config()?;
    let urls = cli.collect_urls().await?;
    if urls.is_empty() {
        anyhow::bail!("No URLs given; pass them as arguments or with --file");
    }

    let crawler = PageCrawler::new(config.clone()).context("Failed to create crawler")?;

    let abort = crawler.abort_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, finishing the current request");
            abort.abort();
        }
    });

    let mut results = crawler.crawl_with_progress(&urls, &LogProgress).await;

    if let Some(follow) = cli.follow {
        let targets = recrawl_targets(&results, follow.into());
        if targets.is_empty() {
            log::info!("No discovered links to follow");
        } else if crawler.pause().await {
            log::info!("Following {} discovered link(s)", targets.len());
            results.extend(crawler.crawl_with_progress(&targets, &LogProgress).await);
        }
    }

    let shown = ResultFilter::from(cli.show).apply(&results);
    let rendered = export::render(&shown, cli.format.into(), config.mode())?;

    match &cli.output {
        Some(path) => export::save_export(path, &rendered).await?,
        None => println!("{rendered}"),
    }

    Ok(())
}
