//! Crawler module for query traversal
//!
//! This module contains the core crawling logic, including:
//! - Per-query pagination state machine
//! - Single-query execution and reporting
//! - Queue orchestration across queries
//! - Randomized pacing between result pages

mod coordinator;
mod pacing;
mod pagination;
mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{CrawlOrchestrator, CrawlResult};
pub use pacing::Pacer;
pub use pagination::{PaginationController, PaginationOutcome};
pub use runner::{QueryOutcome, QueryReport, QueryRunner, QueryStatus};

use crate::config::Config;
use crate::navigator::HttpNavigator;
use crate::query::Query;
use crate::DealError;
use std::time::Duration;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the query queue from `terms` (or the default query)
/// 2. Acquire an HTTP navigator
/// 3. Warm up the session and run every query
/// 4. Release the navigator
///
/// Failing to acquire the navigator is the only error; query failures are
/// reported inside the returned [`CrawlResult`].
pub async fn crawl(config: Config, terms: &[String]) -> Result<CrawlResult, DealError> {
    let queries = Query::queue_from_terms(terms, &config.site)?;

    let mut navigator = HttpNavigator::new(
        &config.user_agent,
        Duration::from_secs(config.crawler.navigation_timeout_secs),
    )?;

    let orchestrator = CrawlOrchestrator::new(config);
    Ok(orchestrator.run(&mut navigator, &queries).await)
}
