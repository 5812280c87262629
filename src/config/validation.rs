use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use rust_decimal::Decimal;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates thresholds, caps and timeouts
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.min_discount < Decimal::ZERO || config.min_discount > Decimal::ONE_HUNDRED {
        return Err(ConfigError::Validation(format!(
            "min_discount must be between 0 and 100, got {}",
            config.min_discount
        )));
    }

    if config.target_deal_count < 1 {
        return Err(ConfigError::Validation(
            "target_deal_count must be >= 1".to_string(),
        ));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.results_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "results_timeout_ms must be > 0".to_string(),
        ));
    }

    if config.navigation_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "navigation_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates site URLs and selectors
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("home_url", &config.home_url)?;
    validate_http_url("search_url", &config.search_url)?;
    validate_http_url("default_url", &config.default_url)?;

    if config.search_param.is_empty() {
        return Err(ConfigError::Validation(
            "search_param cannot be empty".to_string(),
        ));
    }

    validate_selectors(&config.selectors)
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(())
}

/// Every selector must parse, otherwise extraction would silently find nothing
fn validate_selectors(selectors: &SelectorConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("result", &selectors.result),
        ("title", &selectors.title),
        ("link", &selectors.link),
        ("current_price", &selectors.current_price),
        ("list_price", &selectors.list_price),
        ("next_page", &selectors.next_page),
    ] {
        if Selector::parse(value).is_err() {
            return Err(ConfigError::InvalidSelector(format!(
                "{} selector '{}' does not parse",
                name, value
            )));
        }
    }
    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent value cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.file_name.is_empty() {
        return Err(ConfigError::Validation(
            "output file_name cannot be empty".to_string(),
        ));
    }

    Ok(())
}
