//! Per-query pagination state machine
//!
//! The controller scans the current page, folds accepted deals into the
//! query's accumulator, then either stops or follows the next-page control:
//!
//! ```text
//! Scanning(1) -> [target met]      -> Done(target-met)
//!             -> [page >= cap]     -> Done(page-cap-reached)
//!             -> [no next control] -> Done(no-next-page)
//!             -> Advancing(1) -> [loaded] -> Scanning(2) -> ...
//!                             -> [timeout] -> Done(results-timeout)
//!                             -> [failed]  -> Done(advance-failed)
//! ```

use crate::config::{CrawlerConfig, SelectorConfig};
use crate::crawler::pacing::Pacer;
use crate::listing::{extract_candidates, filter_page, Deal};
use crate::navigator::{NavigationError, Navigator};
use crate::state::{DoneReason, PaginationState};
use std::time::Duration;

/// What a finished traversal produced
#[derive(Debug)]
pub struct PaginationOutcome {
    /// Accepted deals in page order, then in-page order
    pub deals: Vec<Deal>,

    /// Number of pages scanned (the last page number reached)
    pub pages_scanned: u32,

    /// Why the traversal stopped
    pub reason: DoneReason,

    /// Set when the navigator became unusable; the run must stop
    pub fatal: Option<NavigationError>,
}

/// Drives one query's traversal over successive result pages
pub struct PaginationController<'a, N: Navigator + ?Sized> {
    navigator: &'a mut N,
    crawler: &'a CrawlerConfig,
    selectors: &'a SelectorConfig,
    pacer: Pacer,
    deals: Vec<Deal>,
    pages_scanned: u32,
    fatal: Option<NavigationError>,
}

impl<'a, N: Navigator + ?Sized> PaginationController<'a, N> {
    pub fn new(
        navigator: &'a mut N,
        crawler: &'a CrawlerConfig,
        selectors: &'a SelectorConfig,
        pacer: Pacer,
    ) -> Self {
        Self {
            navigator,
            crawler,
            selectors,
            pacer,
            deals: Vec::new(),
            pages_scanned: 0,
            fatal: None,
        }
    }

    /// Runs from `Scanning(page=1)` to a `Done` state
    ///
    /// The navigator must already show the first result page.
    pub async fn run(mut self) -> PaginationOutcome {
        let mut state = PaginationState::start();

        loop {
            state = match state {
                PaginationState::Scanning { page } => {
                    self.scan(page).await;
                    self.decide(page)
                }
                PaginationState::Advancing { from } => self.advance(from).await,
                PaginationState::Done(reason) => {
                    return PaginationOutcome {
                        deals: self.deals,
                        pages_scanned: self.pages_scanned,
                        reason,
                        fatal: self.fatal,
                    };
                }
            };
            tracing::trace!("Pagination state: {}", state);
        }
    }

    /// Waits for fragments, then runs the extract/filter pipeline
    async fn scan(&mut self, page: u32) {
        tracing::info!("Scanning page {}...", page);

        let timeout = Duration::from_millis(self.crawler.results_timeout_ms);
        let ready = tokio::time::timeout(
            timeout,
            self.navigator.wait_for_fragments(&self.selectors.result),
        )
        .await
        .unwrap_or(false);

        if !ready {
            tracing::warn!("Timeout waiting for results on page {}", page);
        }

        let fragments = self.navigator.extract_fragments(self.selectors);
        let candidates = extract_candidates(&fragments);
        let accepted = filter_page(&candidates, self.crawler.min_discount);

        tracing::info!(
            "Found {} potential deals on page {} ({} listings)",
            accepted.len(),
            page,
            fragments.len()
        );

        self.deals.extend(accepted);
        self.pages_scanned = page;
    }

    fn decide(&self, page: u32) -> PaginationState {
        if self.deals.len() >= self.crawler.target_deal_count {
            return PaginationState::Done(DoneReason::TargetMet);
        }

        if page >= self.crawler.max_pages {
            return PaginationState::Done(DoneReason::PageCapReached);
        }

        if !self.navigator.has_next_page(&self.selectors.next_page) {
            tracing::info!("No more pages.");
            return PaginationState::Done(DoneReason::NoNextPage);
        }

        PaginationState::Advancing { from: page }
    }

    async fn advance(&mut self, from: u32) -> PaginationState {
        match self.navigator.advance_page(&self.selectors.next_page).await {
            Ok(()) => {
                self.pacer.pause().await;
                PaginationState::Scanning { page: from + 1 }
            }
            Err(e) if e.is_fatal() => {
                tracing::error!("Navigator lost while leaving page {}: {}", from, e);
                self.fatal = Some(e);
                PaginationState::Done(DoneReason::AdvanceFailed)
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!("Page {} did not load in time: {}", from + 1, e);
                PaginationState::Done(DoneReason::ResultsTimeout)
            }
            Err(e) => {
                tracing::warn!("Failed to advance past page {}: {}", from, e);
                PaginationState::Done(DoneReason::AdvanceFailed)
            }
        }
    }
}
