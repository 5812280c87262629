//! Deal-Scout: a discounted-listing crawler
//!
//! This crate walks the paginated search results of a storefront for one or
//! more queries, extracts listing fragments, rejects "N in 1" bundles, keeps
//! listings discounted at or above a threshold, and writes the aggregate to a
//! plain-text deal list.

pub mod config;
pub mod crawler;
pub mod listing;
pub mod navigator;
pub mod output;
pub mod query;
pub mod state;

use thiserror::Error;

/// Main error type for Deal-Scout operations
#[derive(Debug, Error)]
pub enum DealError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] navigator::NavigationError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl aborted: {0}")]
    Aborted(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Deal-Scout operations
pub type Result<T> = std::result::Result<T, DealError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOrchestrator, CrawlResult};
pub use listing::{Deal, ListingCandidate, RawListing};
pub use navigator::{HttpNavigator, Navigator};
pub use query::Query;
pub use state::{DoneReason, PaginationState};
