//! Run summary
//!
//! This module condenses a [`CrawlResult`] into the figures printed at the
//! end of a run.

use crate::crawler::{CrawlResult, QueryReport, QueryStatus};
use chrono::{DateTime, Utc};

/// Crawl run summary
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_deals: usize,
    pub total_pages: u32,
    pub failed_queries: usize,

    /// Queries cut short by a page that failed to load after the first
    pub degraded_queries: usize,
    pub queries: Vec<QueryReport>,
    pub aborted: Option<String>,
}

impl CrawlSummary {
    /// Builds a summary from a finished crawl
    pub fn from_result(result: &CrawlResult) -> Self {
        Self {
            started_at: result.started_at,
            finished_at: result.finished_at,
            total_deals: result.deals.len(),
            total_pages: result.reports.iter().map(|r| r.pages_scanned).sum(),
            failed_queries: result
                .reports
                .iter()
                .filter(|r| matches!(r.status, QueryStatus::Failed(_)))
                .count(),
            degraded_queries: result
                .reports
                .iter()
                .filter(|r| matches!(r.status, QueryStatus::Completed(reason) if reason.is_degraded()))
                .count(),
            queries: result.reports.clone(),
            aborted: result.aborted.clone(),
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Average accepted deals per scanned page
    pub fn deals_per_page(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.total_deals as f64 / self.total_pages as f64
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Overview:");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Duration: {}s", summary.duration_seconds());
    println!("  Deals found: {}", summary.total_deals);
    println!("  Pages scanned: {}", summary.total_pages);
    println!("  Deals per page: {:.2}", summary.deals_per_page());
    println!();

    println!("Queries ({}):", summary.queries.len());
    for report in &summary.queries {
        println!(
            "  {}: {} deals, {} pages, {}",
            report.label, report.deals_found, report.pages_scanned, report.status
        );
    }
    println!();

    if summary.failed_queries > 0 {
        println!("Failed queries: {}", summary.failed_queries);
    }

    if summary.degraded_queries > 0 {
        println!(
            "Queries stopped early by a page load problem: {}",
            summary.degraded_queries
        );
    }

    if let Some(reason) = &summary.aborted {
        println!("Run aborted: {}", reason);
    }
}
