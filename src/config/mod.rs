//! Configuration module for Deal-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a default, so a crawl can run without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use deal_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("deal-scout.toml")).unwrap();
//! println!("Minimum discount: {}%", config.crawler.min_discount);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
