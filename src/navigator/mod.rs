//! Page navigation collaborator
//!
//! The crawl core never fetches or renders pages itself. It drives a single
//! [`Navigator`], which owns the one navigable page of the run:
//! - loading a URL into the page
//! - waiting for result fragments to appear
//! - evaluating the fragments into [`RawListing`] proxies
//! - locating and following the "next page" control
//!
//! [`HttpNavigator`] is the bundled implementation: it fetches static HTML
//! with reqwest and evaluates it with scraper.

mod http;
mod parser;

pub use http::{build_http_client, HttpNavigator};
pub use parser::{count_fragments, extract_listings, next_page_url};

use crate::config::SelectorConfig;
use crate::listing::RawListing;
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors raised by a navigator
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Page load timed out for {url}")]
    Timeout { url: String },

    #[error("No page has been loaded")]
    NoPageLoaded,

    #[error("No enabled next-page control on the current page")]
    NoNextPage,

    #[error("Navigator session is closed")]
    SessionClosed,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl NavigationError {
    /// Returns true if the page did not load within its time limit
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if the navigator can no longer be used for this run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SessionClosed | Self::Client(_))
    }
}

/// The single navigable page a crawl run drives
///
/// Implementations are used strictly sequentially: every method completes
/// before the next one is called.
#[async_trait]
pub trait Navigator: Send {
    /// Loads `url` into the page and waits for it to finish loading
    async fn navigate(&mut self, url: &Url) -> Result<(), NavigationError>;

    /// Resolves once at least one element matches `selector`
    ///
    /// Returns false if the current page cannot produce a match. Callers bound
    /// this with a timeout; an implementation may wait indefinitely.
    async fn wait_for_fragments(&mut self, selector: &str) -> bool;

    /// Evaluates every result item on the current page
    fn extract_fragments(&self, selectors: &SelectorConfig) -> Vec<RawListing>;

    /// Returns true if an enabled control matching `selector` is present
    fn has_next_page(&self, selector: &str) -> bool;

    /// Follows the next-page control and waits for the new page to load
    async fn advance_page(&mut self, selector: &str) -> Result<(), NavigationError>;

    /// Releases the page. Further navigation fails with `SessionClosed`.
    async fn close(&mut self);
}
