//! Search queries and their result-page URLs
//!
//! A crawl runs either one query per brand, or a single default query when no
//! brands were given.

use crate::config::SiteConfig;
use crate::DealError;
use std::fmt;
use url::Url;

/// Label used for the default query
pub const DEFAULT_QUERY_LABEL: &str = "default";

/// What a query searches for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// The configured default results page
    Default,

    /// A brand-specific search
    Brand(String),
}

/// One search to run, with the URL of its first result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: QueryKind,
    pub url: Url,
}

impl Query {
    /// Builds the default query from the site configuration
    pub fn default_query(site: &SiteConfig) -> Result<Self, DealError> {
        Ok(Self {
            kind: QueryKind::Default,
            url: Url::parse(&site.default_url)?,
        })
    }

    /// Builds a brand query
    ///
    /// The search string is `"<query-prefix> <brand>"`, passed as the
    /// configured search parameter.
    ///
    /// # Example
    ///
    /// ```
    /// use deal_scout::config::SiteConfig;
    /// use deal_scout::query::Query;
    ///
    /// let query = Query::brand("Coleman", &SiteConfig::default()).unwrap();
    /// assert_eq!(query.url.as_str(), "https://www.amazon.com/s?k=Outdoor+Gear+Coleman");
    /// ```
    pub fn brand(brand: &str, site: &SiteConfig) -> Result<Self, DealError> {
        let brand = brand.trim();
        let search = if site.query_prefix.trim().is_empty() {
            brand.to_string()
        } else {
            format!("{} {}", site.query_prefix.trim(), brand)
        };

        let url = Url::parse_with_params(&site.search_url, &[(site.search_param.as_str(), search)])?;

        Ok(Self {
            kind: QueryKind::Brand(brand.to_string()),
            url,
        })
    }

    /// Builds the query queue for a list of brand terms
    ///
    /// Blank terms are ignored. If nothing is left, the queue holds exactly
    /// the default query.
    pub fn queue_from_terms(terms: &[String], site: &SiteConfig) -> Result<Vec<Self>, DealError> {
        let queue = terms
            .iter()
            .filter(|term| !term.trim().is_empty())
            .map(|term| Self::brand(term, site))
            .collect::<Result<Vec<_>, _>>()?;

        if queue.is_empty() {
            return Ok(vec![Self::default_query(site)?]);
        }

        Ok(queue)
    }

    /// Human-readable label: the brand name, or "default"
    pub fn label(&self) -> &str {
        match &self.kind {
            QueryKind::Default => DEFAULT_QUERY_LABEL,
            QueryKind::Brand(brand) => brand,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.url)
    }
}
