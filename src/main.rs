//! Sitefold main entry point
//!
//! Command-line interface for the Sitefold site mirroring crawler.

use anyhow::Context;
use clap::Parser;
use sitefold::config::load_config_with_hash;
use sitefold::crawler::crawl;
use sitefold::extract::run_extract;
use sitefold::CrawlScope;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitefold: a single-site mirroring crawler
///
/// Sitefold downloads every reachable page and image of one web site into a
/// local directory mirroring the site's structure below the seed's base
/// path, then optionally extracts product records from the mirror.
#[derive(Parser, Debug)]
#[command(name = "sitefold")]
#[command(version)]
#[command(about = "Mirror a single web site to disk", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "extract")]
    dry_run: bool,

    /// Run only the extraction pass over an existing mirror
    #[arg(long, conflicts_with = "dry_run")]
    extract: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.extract {
        handle_extract(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitefold=info,warn"),
            1 => EnvFilter::new("sitefold=debug,info"),
            2 => EnvFilter::new("sitefold=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &sitefold::config::Config) -> anyhow::Result<()> {
    let seed = url::Url::parse(&config.crawler.seed_url)?;
    let scope = CrawlScope::from_seed(&seed, config.crawler.enforce_base_path)?;

    println!("=== Sitefold Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Workers: {}", config.crawler.workers);
    println!(
        "  Politeness delay: {}ms",
        config.crawler.politeness_delay_ms
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!(
        "  Enforce base path: {}",
        config.crawler.enforce_base_path
    );

    println!("\nDerived Scope:");
    println!("  Network location: {}", scope.network_location());
    println!(
        "  Base path: /{}",
        scope.base_path_segments().join("/")
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nOutput:");
    println!("  Pages root: {}", config.output.pages_root);
    println!("  Data file: {}", config.output.data_path);
    println!("  Assets root: {}", config.output.assets_root);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --extract mode: runs the extraction pass over the mirror
fn handle_extract(config: &sitefold::config::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Extracting product records from mirror at {}",
        config.output.pages_root
    );

    let summary = run_extract(config)?;

    println!(
        "✓ {} records written to {} ({} pages skipped)",
        summary.records, config.output.data_path, summary.skipped
    );
    println!(
        "✓ {} assets collected into {}",
        summary.assets_copied, config.output.assets_root
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &sitefold::config::Config) -> anyhow::Result<()> {
    tracing::info!("Starting crawl of {}", config.crawler.seed_url);

    let snapshot = crawl(config).await?;

    println!(
        "✓ Mirrored {} pages and {} resources into {} ({} skipped, {} failures)",
        snapshot.pages_saved,
        snapshot.resources_saved,
        config.output.pages_root,
        snapshot.skips,
        snapshot.failures
    );

    Ok(())
}
