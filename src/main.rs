//! Docshelf main entry point
//!
//! This is the command-line interface for the docshelf document harvester.

use anyhow::Context;
use clap::Parser;
use docshelf::config::{default_config, load_config_with_hash, Config};
use docshelf::pipeline::harvest;
use docshelf::report::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Docshelf: a document harvesting and integrity pipeline
///
/// Docshelf downloads every document of a target type referenced from a
/// single web page, stores the results under canonical deduplicated names,
/// and removes any stored document that fails a structural check.
#[derive(Parser, Debug)]
#[command(name = "docshelf")]
#[command(version)]
#[command(about = "Harvest and validate documents referenced from a web page", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration and planned actions without
    /// touching the network
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration. A failure here is a setup failure
    // and exits non-zero; per-document failures later never do.
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            default_config().context("built-in defaults failed validation")?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docshelf=info,warn"),
            1 => EnvFilter::new("docshelf=debug,info"),
            2 => EnvFilter::new("docshelf=trace,debug"),
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

/// Handles the --dry-run mode: shows what a run would do
fn handle_dry_run(config: &Config) {
    println!("=== Docshelf Dry Run ===\n");

    println!("Source:");
    println!("  Index page: {}", config.source.index_url);
    println!("  Page cache: {}", config.source.page_cache_path);

    println!("\nStore:");
    println!("  Root directory: {}", config.store.root_dir);
    println!("  Target extension: {}", config.store.target_extension);

    println!("\nFetch:");
    println!(
        "  Max concurrent downloads: {}",
        config.fetch.max_concurrent_downloads
    );
    println!(
        "  Request timeout: {}s",
        config.fetch.request_timeout_secs
    );
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\n✓ Configuration is valid");

    let cached = std::path::Path::new(&config.source.page_cache_path).exists();
    if cached {
        println!("✓ Would reuse the cached index page");
    } else {
        println!("✓ Would fetch the index page from the network");
    }
    println!(
        "✓ Would download documents into '{}', then validate and clean up",
        config.store.root_dir
    );
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> anyhow::Result<()> {
    tracing::info!("Harvesting documents from {}", config.source.index_url);

    let summary = harvest(config).await.context("harvest run failed")?;

    print_summary(&summary);
    Ok(())
}
