//! In-memory navigator for exercising the crawl state machine

use crate::config::SelectorConfig;
use crate::listing::RawListing;
use crate::navigator::{NavigationError, Navigator};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use url::Url;

/// One scripted result page
#[derive(Debug, Clone, Default)]
pub struct ScriptedPage {
    pub listings: Vec<RawListing>,
}

pub fn page(listings: Vec<RawListing>) -> ScriptedPage {
    ScriptedPage { listings }
}

/// A listing at 50% off
pub fn deal_listing(title: &str) -> RawListing {
    RawListing {
        title: Some(title.to_string()),
        link: Some(format!("https://shop.example.com/dp/{}", title)),
        current_price: Some("$50.00".to_string()),
        list_price: Some("$100.00".to_string()),
    }
}

/// A listing at 10% off
pub fn rejected_listing(title: &str) -> RawListing {
    RawListing {
        title: Some(title.to_string()),
        link: Some(format!("https://shop.example.com/dp/{}", title)),
        current_price: Some("$90.00".to_string()),
        list_price: Some("$100.00".to_string()),
    }
}

/// Serves scripted pages keyed by the URL of their first page
///
/// Unknown URLs load as an empty page with no next control.
#[derive(Default)]
pub struct ScriptedNavigator {
    sites: HashMap<String, Vec<ScriptedPage>>,
    failing: HashSet<String>,
    advance_error: Option<fn() -> NavigationError>,
    never_ready: bool,
    current: Option<(String, usize)>,
    navigations: Vec<String>,
    scanned: Vec<usize>,
    advances: usize,
    closed: bool,
}

impl ScriptedNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, url: &str, pages: Vec<ScriptedPage>) -> Self {
        self.sites.insert(url.to_string(), pages);
        self
    }

    /// Makes navigation to `url` fail with HTTP 503
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn fail_advance_with(mut self, error: fn() -> NavigationError) -> Self {
        self.advance_error = Some(error);
        self
    }

    /// Fragment waits never resolve, so callers always hit their timeout
    pub fn never_ready(mut self) -> Self {
        self.never_ready = true;
        self
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Page indices in the order they were scanned
    pub fn scanned_pages(&self) -> Vec<usize> {
        self.scanned.clone()
    }

    pub fn advances(&self) -> usize {
        self.advances
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn current_page(&self) -> Option<&ScriptedPage> {
        let (url, index) = self.current.as_ref()?;
        self.sites.get(url)?.get(*index)
    }

    fn has_more(&self) -> bool {
        match &self.current {
            Some((url, index)) => self
                .sites
                .get(url)
                .is_some_and(|pages| index + 1 < pages.len()),
            None => false,
        }
    }
}

#[async_trait]
impl Navigator for ScriptedNavigator {
    async fn navigate(&mut self, url: &Url) -> Result<(), NavigationError> {
        if self.closed {
            return Err(NavigationError::SessionClosed);
        }
        self.navigations.push(url.to_string());
        self.current = None;

        if self.failing.contains(url.as_str()) {
            return Err(NavigationError::Status {
                url: url.to_string(),
                status: 503,
            });
        }

        self.current = Some((url.to_string(), 0));
        Ok(())
    }

    async fn wait_for_fragments(&mut self, _selector: &str) -> bool {
        if let Some((_, index)) = &self.current {
            self.scanned.push(*index);
        }
        if self.never_ready {
            std::future::pending::<()>().await;
        }
        self.current_page()
            .is_some_and(|page| !page.listings.is_empty())
    }

    fn extract_fragments(&self, _selectors: &SelectorConfig) -> Vec<RawListing> {
        self.current_page()
            .map(|page| page.listings.clone())
            .unwrap_or_default()
    }

    fn has_next_page(&self, _selector: &str) -> bool {
        self.has_more()
    }

    async fn advance_page(&mut self, _selector: &str) -> Result<(), NavigationError> {
        if self.closed {
            return Err(NavigationError::SessionClosed);
        }
        if let Some(error) = self.advance_error {
            return Err(error());
        }
        if !self.has_more() {
            return Err(NavigationError::NoNextPage);
        }
        if let Some((_, index)) = self.current.as_mut() {
            *index += 1;
        }
        self.advances += 1;
        Ok(())
    }

    async fn close(&mut self) {
        self.closed = true;
        self.current = None;
    }
}
