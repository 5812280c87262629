use rust_decimal::Decimal;
use serde::Deserialize;

/// Main configuration structure for Deal-Scout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl thresholds, caps and pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Minimum discount percentage (inclusive) for a listing to count as a deal
    pub min_discount: Decimal,

    /// Accepted deals per query after which pagination stops
    pub target_deal_count: usize,

    /// Maximum result pages scanned per query
    pub max_pages: u32,

    /// How long to wait for listing fragments on a freshly loaded page (milliseconds)
    pub results_timeout_ms: u64,

    /// Fixed part of the delay after each page advance (milliseconds)
    pub pacing_base_ms: u64,

    /// Upper bound of the random part of the delay after each page advance (milliseconds)
    pub pacing_jitter_ms: u64,

    /// Pause after the warm-up navigation (milliseconds)
    pub warmup_settle_ms: u64,

    /// Timeout for a single page load (seconds)
    pub navigation_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            min_discount: Decimal::from(25),
            target_deal_count: 15,
            max_pages: 5,
            results_timeout_ms: 10_000,
            pacing_base_ms: 2_000,
            pacing_jitter_ms: 2_000,
            warmup_settle_ms: 3_000,
            navigation_timeout_secs: 60,
        }
    }
}

/// Storefront endpoints and query derivation
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Page visited once before the queue to establish session cookies
    pub home_url: String,

    /// Search endpoint for brand queries
    pub search_url: String,

    /// Query parameter carrying the search string
    pub search_param: String,

    /// Text prepended to every brand to form the search string
    pub query_prefix: String,

    /// Results page used when no brands are given
    pub default_url: String,

    pub selectors: SelectorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_url: "https://www.amazon.com".to_string(),
            search_url: "https://www.amazon.com/s".to_string(),
            search_param: "k".to_string(),
            query_prefix: "Outdoor Gear".to_string(),
            default_url: "https://www.amazon.com/s?k=Outdoor+Gear&rh=n%3A3375251%2Cp_89%3ATop+Brands&dc&_encoding=UTF8&rnid=2528832011&ref=sr_nr_p_89_1".to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// CSS selectors locating listing fragments and their slots
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// One search result item
    pub result: String,

    /// Title text, relative to a result item
    pub title: String,

    /// Product link, relative to a result item
    pub link: String,

    /// Current/offer price text, relative to a result item
    pub current_price: String,

    /// Struck-through list price text, relative to a result item
    pub list_price: String,

    /// Enabled "next page" control
    pub next_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            result: r#"[data-component-type="s-search-result"]"#.to_string(),
            title: "h2 span".to_string(),
            link: ".a-link-normal".to_string(),
            current_price: ".a-price .a-offscreen".to_string(),
            list_price: ".a-text-price .a-offscreen".to_string(),
            next_page: ".s-pagination-next:not(.s-pagination-disabled)".to_string(),
        }
    }
}

/// Identity presented to the storefront
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// User-Agent header value
    pub value: String,

    /// Accept-Language header value
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory holding the deal list, created if absent
    pub directory: String,

    /// File name of the deal list inside `directory`
    pub file_name: String,

    /// Fixed line written under every deal
    pub annotation: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "Deals".to_string(),
            file_name: "deals.txt".to_string(),
            annotation: "Is Top Brand? Yes (Filtered by Amazon/User)".to_string(),
        }
    }
}
