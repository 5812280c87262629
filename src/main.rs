//! Deal-Scout main entry point
//!
//! This is the command-line interface for the Deal-Scout crawler.

use clap::Parser;
use deal_scout::config::{load_config_with_hash, validate, Config};
use deal_scout::crawler::crawl;
use deal_scout::output::{print_summary, CrawlSummary, DealWriter, TextFileWriter};
use deal_scout::query::Query;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Deal-Scout: finds discounted listings across brand searches
///
/// Each brand becomes one search; with no brands, a single default results
/// page is crawled. Listings at or above the discount threshold are written
/// to a plain-text deal list.
#[derive(Parser, Debug)]
#[command(name = "deal-scout")]
#[command(version = "1.0.0")]
#[command(about = "Finds discounted listings across brand searches", long_about = None)]
struct Cli {
    /// Brands to search for (default results page if none)
    #[arg(value_name = "BRAND")]
    brands: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Minimum discount percentage to keep a listing
    #[arg(long, value_name = "PERCENT")]
    min_discount: Option<Decimal>,

    /// Deals per query after which pagination stops
    #[arg(long, value_name = "COUNT")]
    target: Option<usize>,

    /// Maximum result pages per query
    #[arg(long, value_name = "PAGES")]
    max_pages: Option<u32>,

    /// Directory for the deal list
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the query plan without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &cli.brands)?;
    } else {
        handle_crawl(config, &cli.brands).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("deal_scout=info,warn"),
            1 => EnvFilter::new("deal_scout=debug,info"),
            2 => EnvFilter::new("deal_scout=trace,debug"),
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

/// Loads the configuration file if given, then applies command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(min_discount) = cli.min_discount {
        config.crawler.min_discount = min_discount;
    }
    if let Some(target) = cli.target {
        config.crawler.target_deal_count = target;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows thresholds and the derived queries
fn handle_dry_run(config: &Config, brands: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Deal-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Minimum discount: {}%", config.crawler.min_discount);
    println!("  Target deals per query: {}", config.crawler.target_deal_count);
    println!("  Max pages per query: {}", config.crawler.max_pages);
    println!("  Results timeout: {}ms", config.crawler.results_timeout_ms);
    println!(
        "  Pacing: {}ms + up to {}ms",
        config.crawler.pacing_base_ms, config.crawler.pacing_jitter_ms
    );

    println!("\nOutput:");
    println!(
        "  {}",
        TextFileWriter::new(&config.output).path().display()
    );

    let queries = Query::queue_from_terms(brands, &config.site)?;
    println!("\nQueries ({}):", queries.len());
    for query in &queries {
        println!("  - {}", query);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, brands: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    if brands.is_empty() {
        tracing::info!("Starting crawler... Mode: Default Top Brands");
    } else {
        tracing::info!("Starting crawler... Mode: Specific Brands: {}", brands.join(", "));
    }

    let writer = TextFileWriter::new(&config.output);

    let result = match crawl(config, brands).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let path = match writer.write(&result.deals) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Failed to write deals: {}", e);
            return Err(e.into());
        }
    };

    let summary = CrawlSummary::from_result(&result);
    print_summary(&summary);
    println!(
        "Done! Found {} total deals. Saved to {}.",
        summary.total_deals,
        path.display()
    );

    if let Some(reason) = result.aborted {
        tracing::error!("Crawl aborted before finishing the queue: {}", reason);
        return Err(deal_scout::DealError::Aborted(reason).into());
    }

    Ok(())
}
