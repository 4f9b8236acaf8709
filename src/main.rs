//! Rufus main entry point
//!
//! This is the command-line interface for the Rufus relevance-gated crawler.

use anyhow::{Context, Result};
use clap::Parser;
use rufus::config::{load_config_with_hash, Config};
use rufus::output::print_statistics;
use rufus::url::parse_seed;
use rufus::ScrapeClient;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Rufus: a relevance-gated site crawler
///
/// Rufus crawls a website from a seed URL up to a bounded depth, keeps the
/// pages relevant to your instructions and writes a summarized JSON report.
#[derive(Parser, Debug)]
#[command(name = "rufus")]
#[command(version)]
#[command(about = "A relevance-gated site crawler and summarizer", long_about = None)]
struct Cli {
    /// Starting URL for crawling
    #[arg(long)]
    url: String,

    /// Maximum crawl depth (overrides the config file)
    #[arg(long)]
    depth: Option<u32>,

    /// What to look for, e.g. "product features customer FAQs"
    #[arg(long, default_value = "")]
    instructions: String,

    /// Output file for the JSON report (overrides the config file)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Politeness delay in milliseconds (overrides the config file)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Per-fetch timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Render pages in a headless browser (requires the `render` feature)
    #[arg(long)]
    dynamic: bool,

    /// Only follow links on the seed's host
    #[arg(long)]
    same_domain: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli);
    config.validate().context("invalid settings")?;

    if cli.dry_run {
        return handle_dry_run(&config, &cli);
    }

    handle_scrape(config, config_hash, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rufus=info,warn"),
            1 => EnvFilter::new("rufus=debug,info"),
            2 => EnvFilter::new("rufus=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line flags on top of the file configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.crawler.fetch_timeout_secs = timeout_secs;
    }
    if let Some(output) = &cli.output {
        config.output.report_path = output.to_string_lossy().into_owned();
    }
    if cli.dynamic {
        config.crawler.dynamic = true;
    }
    if cli.same_domain {
        config.scope.same_domain = true;
    }
}

/// Handles the --dry-run mode: validates settings and shows what would be crawled
fn handle_dry_run(config: &Config, cli: &Cli) -> Result<()> {
    let seed = parse_seed(&cli.url).context("invalid seed URL")?;
    let crawl = config.crawl_config(&seed, &cli.instructions);

    println!("=== Rufus Dry Run ===\n");

    println!("Seed: {}", seed);
    println!("Instructions: {:?}", crawl.instructions);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", crawl.max_depth);
    println!("  Politeness delay: {:?}", crawl.delay);
    println!("  Fetch timeout: {:?}", config.crawler.fetch_timeout());
    println!("  Max concurrent fetches: {}", crawl.max_concurrent_fetches);
    println!("  Follow irrelevant links: {}", crawl.follow_irrelevant_links);
    match crawl.crawl_timeout {
        Some(timeout) => println!("  Crawl deadline: {:?}", timeout),
        None => println!("  Crawl deadline: none"),
    }
    println!(
        "  Fetcher: {}",
        if config.crawler.dynamic { "headless browser" } else { "HTTP" }
    );

    println!("\nScope:");
    if crawl.scope.is_unrestricted() {
        println!("  Any host");
    } else {
        for pattern in crawl.scope.patterns() {
            println!("  - {}", pattern);
        }
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());
    println!("Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, config_hash: Option<String>, cli: &Cli) -> Result<()> {
    let report_path = PathBuf::from(&config.output.report_path);

    let mut client = ScrapeClient::from_config(config)
        .await
        .context("failed to set up the fetcher")?;
    if let Some(hash) = config_hash {
        client = client.with_config_hash(hash);
    }

    let report = client
        .scrape(&cli.url, &cli.instructions, cli.depth)
        .await
        .with_context(|| format!("failed to scrape {}", cli.url))?;

    write(&report, &report_path)?;

    if !cli.quiet {
        println!();
        print_statistics(&report.stats);
        println!("\nRelevant pages: {}", report.pages_found);
        println!("Report saved to: {}", report_path.display());
    }

    Ok(())
}

fn write(report: &rufus::output::ScrapeReport, path: &Path) -> Result<()> {
    report
        .write_report(path)
        .with_context(|| format!("failed to write report to {}", path.display()))
}
