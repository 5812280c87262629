//! HTTP navigator implementation
//!
//! This module loads result pages with reqwest, including:
//! - Building an HTTP client with a browser-like identity and a cookie store
//! - GET requests for search and follow-up pages
//! - Error classification (timeouts vs. other failures)
//!
//! Pages are static HTML, so "waiting" for fragments reduces to checking
//! whether the loaded document contains any.

use super::parser::{count_fragments, extract_listings, next_page_url};
use super::{NavigationError, Navigator};
use crate::config::{SelectorConfig, UserAgentConfig};
use crate::listing::RawListing;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// A loaded document and the URL it was served from
#[derive(Debug, Clone)]
struct LoadedPage {
    url: Url,
    body: String,
}

/// Navigator backed by plain HTTP fetches
pub struct HttpNavigator {
    client: Client,
    current: Option<LoadedPage>,
    closed: bool,
}

/// Builds an HTTP client with the configured identity
///
/// The cookie store keeps whatever the warm-up navigation received, so
/// later search requests belong to the same session.
///
/// # Example
///
/// ```no_run
/// use deal_scout::config::UserAgentConfig;
/// use deal_scout::navigator::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(60)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, NavigationError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    let language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| NavigationError::Client(format!("invalid accept-language: {}", e)))?;
    headers.insert(ACCEPT_LANGUAGE, language);

    Client::builder()
        .user_agent(config.value.clone())
        .default_headers(headers)
        .cookie_store(true)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(|e| NavigationError::Client(e.to_string()))
}

impl HttpNavigator {
    /// Creates a navigator with no page loaded
    pub fn new(user_agent: &UserAgentConfig, timeout: Duration) -> Result<Self, NavigationError> {
        Ok(Self::with_client(build_http_client(user_agent, timeout)?))
    }

    /// Creates a navigator around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            current: None,
            closed: false,
        }
    }

    fn loaded(&self) -> Result<&LoadedPage, NavigationError> {
        if self.closed {
            return Err(NavigationError::SessionClosed);
        }
        self.current.as_ref().ok_or(NavigationError::NoPageLoaded)
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    async fn navigate(&mut self, url: &Url) -> Result<(), NavigationError> {
        if self.closed {
            return Err(NavigationError::SessionClosed);
        }

        tracing::debug!("Loading {}", url);
        // A failed load leaves no usable page behind
        self.current = None;
        self.current = Some(fetch_page(&self.client, url).await?);
        Ok(())
    }

    async fn wait_for_fragments(&mut self, selector: &str) -> bool {
        match self.loaded() {
            Ok(page) => count_fragments(&page.body, selector) > 0,
            Err(_) => false,
        }
    }

    fn extract_fragments(&self, selectors: &SelectorConfig) -> Vec<RawListing> {
        match self.loaded() {
            Ok(page) => extract_listings(&page.body, &page.url, selectors),
            Err(_) => Vec::new(),
        }
    }

    fn has_next_page(&self, selector: &str) -> bool {
        match self.loaded() {
            Ok(page) => next_page_url(&page.body, &page.url, selector).is_some(),
            Err(_) => false,
        }
    }

    async fn advance_page(&mut self, selector: &str) -> Result<(), NavigationError> {
        let page = self.loaded()?;
        let next = next_page_url(&page.body, &page.url, selector).ok_or(NavigationError::NoNextPage)?;
        self.navigate(&next).await
    }

    async fn close(&mut self) {
        if !self.closed {
            tracing::debug!("Closing HTTP navigator");
        }
        self.closed = true;
        self.current = None;
    }
}

/// Fetches one page
///
/// Non-2xx responses are errors; the body of a successful response is kept
/// regardless of its content type.
async fn fetch_page(client: &Client, url: &Url) -> Result<LoadedPage, NavigationError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(NavigationError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(LoadedPage {
        url: final_url,
        body,
    })
}

fn classify_error(url: &Url, error: reqwest::Error) -> NavigationError {
    if error.is_timeout() {
        NavigationError::Timeout {
            url: url.to_string(),
        }
    } else {
        NavigationError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
