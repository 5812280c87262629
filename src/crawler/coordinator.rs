//! Crawl orchestrator - runs the query queue
//!
//! This module contains the top-level crawl loop that:
//! - Warms up the navigator session on the site's home page
//! - Runs every query in order on the single shared navigator
//! - Concatenates accepted deals in query order
//! - Releases the navigator on every exit path

use crate::config::Config;
use crate::crawler::pacing::Pacer;
use crate::crawler::runner::{QueryReport, QueryRunner};
use crate::listing::Deal;
use crate::navigator::Navigator;
use crate::query::Query;
use chrono::{DateTime, Utc};
use std::time::Duration;
use url::Url;

/// Aggregate of a whole crawl run
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Deals in query order, then page order, then in-page order
    pub deals: Vec<Deal>,

    /// One report per query that was started
    pub reports: Vec<QueryReport>,

    /// Reason the queue was abandoned early, if it was
    pub aborted: Option<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Runs a queue of queries against one navigator
pub struct CrawlOrchestrator {
    config: Config,
    pacer: Pacer,
}

impl CrawlOrchestrator {
    /// Creates an orchestrator using the configured pacing
    pub fn new(config: Config) -> Self {
        let pacer = Pacer::from_config(&config.crawler);
        Self { config, pacer }
    }

    /// Replaces the pause used between result pages
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Runs every query in order and closes the navigator afterwards
    ///
    /// Query-level failures are recorded in the reports and the queue moves
    /// on. Only a navigator that can no longer be used stops the queue; the
    /// deals gathered up to that point are still returned.
    pub async fn run<N: Navigator + ?Sized>(&self, navigator: &mut N, queries: &[Query]) -> CrawlResult {
        let started_at = Utc::now();
        tracing::info!("Starting crawl with {} queries", queries.len());

        let (deals, reports, aborted) = self.run_queue(navigator, queries).await;

        navigator.close().await;

        let finished_at = Utc::now();
        tracing::info!(
            "Crawl finished: {} deals from {} queries in {}s",
            deals.len(),
            reports.len(),
            (finished_at - started_at).num_seconds()
        );

        CrawlResult {
            deals,
            reports,
            aborted,
            started_at,
            finished_at,
        }
    }

    async fn run_queue<N: Navigator + ?Sized>(
        &self,
        navigator: &mut N,
        queries: &[Query],
    ) -> (Vec<Deal>, Vec<QueryReport>, Option<String>) {
        self.warm_up(navigator).await;

        let runner = QueryRunner::new(
            &self.config.crawler,
            &self.config.site.selectors,
            self.pacer,
        );

        let mut deals = Vec::new();
        let mut reports = Vec::with_capacity(queries.len());

        for query in queries {
            let outcome = runner.run(navigator, query).await;
            deals.extend(outcome.deals);
            reports.push(outcome.report);

            if let Some(fatal) = outcome.fatal {
                tracing::error!(
                    "Navigator unusable after query {}, abandoning remaining queue: {}",
                    query.label(),
                    fatal
                );
                return (deals, reports, Some(fatal.to_string()));
            }
        }

        (deals, reports, None)
    }

    /// Visits the home page once so later requests carry session cookies
    ///
    /// Failure is logged and otherwise ignored.
    async fn warm_up<N: Navigator + ?Sized>(&self, navigator: &mut N) {
        let home = match Url::parse(&self.config.site.home_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping warm-up, invalid home URL: {}", e);
                return;
            }
        };

        tracing::info!("Navigating to {} to set cookies...", home);
        match navigator.navigate(&home).await {
            Ok(()) => {
                let settle = Duration::from_millis(self.config.crawler.warmup_settle_ms);
                if !settle.is_zero() {
                    tokio::time::sleep(settle).await;
                }
            }
            Err(e) => tracing::warn!("Warm-up navigation failed, continuing: {}", e),
        }
    }
}
