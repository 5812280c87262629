//! Output module for the deal list and run summary
//!
//! This module handles:
//! - Writing accepted deals as a plain-text list
//! - Summarizing per-query outcomes at the end of a run

pub mod stats;
mod text;
mod traits;

pub use stats::{print_summary, CrawlSummary};
pub use text::{format_deal, format_deals, TextFileWriter, SEPARATOR};
pub use traits::{DealWriter, OutputError, OutputResult};
