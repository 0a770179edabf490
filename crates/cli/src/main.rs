use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use lemmata_core::{
    CommonWords, FeedConfig, FeedSource, FetchConfig, KeywordReport, LemmataError, ReportFormat, Summarizer,
    SummarizerConfig, WikipediaClient, WikipediaConfig, render_reports,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{print_banner, print_error, print_info, print_options, print_step, print_success, print_timing};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for keyword reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Print the significant keywords of every entry in an RSS feed
#[derive(Parser, Debug)]
#[command(name = "lemmata")]
#[command(author = "Lemmata Contributors")]
#[command(version)]
#[command(about = "Extract validated keywords from RSS feeds", long_about = None)]
struct Args {
    /// Feed name, appended to the feed base URL (prompted for when omitted)
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Keep only nouns
    #[arg(long, overrides_with = "nouns_disabled")]
    nouns_enabled: bool,

    /// Keep every part of speech (default)
    #[arg(long, overrides_with = "nouns_enabled")]
    nouns_disabled: bool,

    /// Keep only frequency outliers (IQR upper fence)
    #[arg(long, overrides_with = "iqr_disabled")]
    iqr_enabled: bool,

    /// Keep every candidate (default)
    #[arg(long, overrides_with = "iqr_enabled")]
    iqr_disabled: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Newline-delimited list of 1000 common words (default: bundled list)
    #[arg(long, value_name = "FILE")]
    common_words: Option<PathBuf>,

    /// Maximum number of concurrent knowledge-base lookups
    #[arg(long, value_name = "NUM")]
    workers: Option<usize>,

    /// Base URL feed names are resolved against
    #[arg(long, default_value = "http://feeds.feedburner.com/", value_name = "URL")]
    feed_base: String,

    /// MediaWiki API endpoint used to validate keywords
    #[arg(long, default_value = "https://en.wikipedia.org/w/api.php", value_name = "URL")]
    wiki_endpoint: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn prompt_feed_name() -> anyhow::Result<String> {
    eprint!("Enter feed name please: ");
    io::stderr().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("Failed to read feed name")?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let name = match args.name.clone() {
        Some(name) => name,
        None => prompt_feed_name()?,
    };

    if args.verbose {
        print_step(1, 3, "Initializing");
    }

    let common_words = match &args.common_words {
        Some(path) => CommonWords::from_file(path)
            .with_context(|| format!("Failed to load common words from {}", path.display()))?,
        None => CommonWords::embedded(),
    };

    let fetch = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
    };

    let feeds = FeedSource::new(FeedConfig { base_url: args.feed_base.clone(), fetch: fetch.clone() })
        .context("Invalid feed base URL")?;
    let wikipedia = WikipediaClient::new(WikipediaConfig { endpoint: args.wiki_endpoint.clone(), fetch, ..Default::default() })
        .context("Invalid knowledge-base endpoint")?;

    let mut builder = SummarizerConfig::builder().only_nouns(args.nouns_enabled).use_outlier_filter(args.iqr_enabled);
    if let Some(workers) = args.workers {
        builder = builder.max_concurrent_lookups(workers);
    }
    let config = builder.build();

    if args.verbose {
        print_options(config.only_nouns, config.use_outlier_filter, config.max_concurrent_lookups);
    }

    let summarizer = Summarizer::with_config(Arc::new(common_words), wikipedia, config);

    if args.verbose {
        print_step(2, 3, &format!("Fetching feed {}", name.bright_white()));
    }

    let documents = match feeds.documents(&name).await {
        Ok(documents) => documents,
        Err(LemmataError::EmptyFeedName) => {
            print_error("Feed name can't be empty");
            return Ok(());
        }
        Err(LemmataError::FeedNotFound(_)) => {
            print_error("Feed not found");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to fetch feed"),
    };

    if args.verbose {
        eprintln!("  {} {}\n", "Entries:".dimmed(), documents.len().to_string().bright_white());
        print_step(3, 3, "Extracting keywords");
    }

    let format = ReportFormat::from(args.format);
    let mut reports = Vec::with_capacity(documents.len());

    for document in &documents {
        let started = Instant::now();

        let keywords = match summarizer.summarize(document).await {
            Ok(keywords) => keywords,
            Err(e) => {
                print_error(&e.to_string());
                break;
            }
        };

        if args.verbose {
            print_timing(&document.url, started.elapsed());
        }

        let report = KeywordReport::new(document, keywords);
        if format == ReportFormat::Text {
            print!("{}", report.to_text());
        }
        reports.push(report);
    }

    if format == ReportFormat::Json {
        println!("{}", render_reports(&reports, format).context("Failed to render JSON")?);
    }

    if args.verbose {
        print_success(&format!("Processed {} of {} entries", reports.len(), documents.len()));
    }

    Ok(())
}
