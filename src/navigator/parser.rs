//! In-page evaluation of result HTML
//!
//! This module handles parsing a result page to extract:
//! - One [`RawListing`] per result item
//! - The URL behind the enabled "next page" control

use crate::config::SelectorConfig;
use crate::listing::RawListing;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts every result item of a page
///
/// Each slot takes the first matching element inside the item. Slots that
/// are missing or contain only whitespace are `None`; links are resolved
/// against `page_url`.
///
/// # Example
///
/// ```
/// use deal_scout::config::SelectorConfig;
/// use deal_scout::navigator::extract_listings;
/// use url::Url;
///
/// let html = r#"<div data-component-type="s-search-result">
///     <h2><span>Tent</span></h2>
///     <a class="a-link-normal" href="/dp/1">view</a>
///     <span class="a-price"><span class="a-offscreen">$75.00</span></span>
///     <span class="a-price a-text-price"><span class="a-offscreen">$100.00</span></span>
/// </div>"#;
/// let page = Url::parse("https://shop.example.com/s?k=tent").unwrap();
/// let listings = extract_listings(html, &page, &SelectorConfig::default());
/// assert_eq!(listings[0].link.as_deref(), Some("https://shop.example.com/dp/1"));
/// assert_eq!(listings[0].list_price.as_deref(), Some("$100.00"));
/// ```
pub fn extract_listings(html: &str, page_url: &Url, selectors: &SelectorConfig) -> Vec<RawListing> {
    let Some(result) = parse_selector(&selectors.result) else {
        return Vec::new();
    };
    let title = parse_selector(&selectors.title);
    let link = parse_selector(&selectors.link);
    let current_price = parse_selector(&selectors.current_price);
    let list_price = parse_selector(&selectors.list_price);

    let document = Html::parse_document(html);

    document
        .select(&result)
        .map(|item| RawListing {
            title: title.as_ref().and_then(|s| first_text(&item, s)),
            link: link.as_ref().and_then(|s| first_link(&item, s, page_url)),
            current_price: current_price.as_ref().and_then(|s| first_text(&item, s)),
            list_price: list_price.as_ref().and_then(|s| first_text(&item, s)),
        })
        .collect()
}

/// Counts the elements matching `selector` on a page
pub fn count_fragments(html: &str, selector: &str) -> usize {
    match parse_selector(selector) {
        Some(selector) => Html::parse_document(html).select(&selector).count(),
        None => 0,
    }
}

/// Resolves the target of the first enabled next-page control
///
/// Returns `None` if no element matches, the element has no usable `href`,
/// or the href resolves to a non-HTTP URL.
pub fn next_page_url(html: &str, page_url: &Url, selector: &str) -> Option<Url> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);

    let control = document.select(&selector).next()?;
    let href = control.value().attr("href")?;
    resolve_link(href, page_url)
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}

/// Visible text of the first match, whitespace collapsed
fn first_text(item: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
}

fn first_link(item: &ElementRef<'_>, selector: &Selector, page_url: &Url) -> Option<String> {
    let href = item.select(selector).next()?.value().attr("href")?;
    resolve_link(href, page_url).map(String::from)
}

/// Resolves an href against the page URL, keeping only HTTP(S) targets
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }

    match page_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
