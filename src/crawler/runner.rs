//! Runs a single query end-to-end

use crate::config::{CrawlerConfig, SelectorConfig};
use crate::crawler::pacing::Pacer;
use crate::crawler::pagination::PaginationController;
use crate::listing::Deal;
use crate::navigator::{NavigationError, Navigator};
use crate::query::{Query, QueryKind};
use crate::state::DoneReason;
use std::fmt;

/// How a query ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// Pagination reached a terminal state
    Completed(DoneReason),

    /// The first result page could not be loaded
    Failed(String),
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(reason) => write!(f, "{}", reason),
            Self::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Per-query line of the run summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    pub label: String,
    pub url: String,
    pub pages_scanned: u32,
    pub deals_found: usize,
    pub status: QueryStatus,
}

/// Result of running one query
#[derive(Debug)]
pub struct QueryOutcome {
    pub deals: Vec<Deal>,
    pub report: QueryReport,

    /// Set when the navigator became unusable during this query
    pub fatal: Option<NavigationError>,
}

/// Loads a query's first result page and paginates it to completion
pub struct QueryRunner<'a> {
    crawler: &'a CrawlerConfig,
    selectors: &'a SelectorConfig,
    pacer: Pacer,
}

impl<'a> QueryRunner<'a> {
    pub fn new(crawler: &'a CrawlerConfig, selectors: &'a SelectorConfig, pacer: Pacer) -> Self {
        Self {
            crawler,
            selectors,
            pacer,
        }
    }

    /// Runs `query` on `navigator`
    ///
    /// A failed initial load is reported in the outcome with no deals; it
    /// never aborts the caller's queue unless the navigator itself is gone.
    pub async fn run<N: Navigator + ?Sized>(&self, navigator: &mut N, query: &Query) -> QueryOutcome {
        match &query.kind {
            QueryKind::Brand(brand) => tracing::info!("Searching for brand: {}", brand),
            QueryKind::Default => tracing::info!("Searching default results page"),
        }

        if let Err(e) = navigator.navigate(&query.url).await {
            tracing::error!("Failed to load results for {}: {}", query.label(), e);
            return QueryOutcome {
                deals: Vec::new(),
                report: QueryReport {
                    label: query.label().to_string(),
                    url: query.url.to_string(),
                    pages_scanned: 0,
                    deals_found: 0,
                    status: QueryStatus::Failed(e.to_string()),
                },
                fatal: e.is_fatal().then_some(e),
            };
        }

        let outcome =
            PaginationController::new(navigator, self.crawler, self.selectors, self.pacer)
                .run()
                .await;

        tracing::info!(
            "Query {} finished ({}): {} deals over {} pages",
            query.label(),
            outcome.reason,
            outcome.deals.len(),
            outcome.pages_scanned
        );

        QueryOutcome {
            report: QueryReport {
                label: query.label().to_string(),
                url: query.url.to_string(),
                pages_scanned: outcome.pages_scanned,
                deals_found: outcome.deals.len(),
                status: QueryStatus::Completed(outcome.reason),
            },
            deals: outcome.deals,
            fatal: outcome.fatal,
        }
    }
}
