//! Conversion of raw listing fragments into typed candidates

use super::{ListingCandidate, RawListing};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Title used when a fragment has no title slot
pub const UNKNOWN_TITLE: &str = "Unknown Product";

/// Converts the fragments of one page into listing candidates
///
/// Fragments without a link have no identity and are skipped. Price slots
/// that are missing, unparsable or non-positive become `None` so that the
/// discount stage rejects the candidate later.
pub fn extract_candidates(fragments: &[RawListing]) -> Vec<ListingCandidate> {
    fragments
        .iter()
        .enumerate()
        .filter_map(|(index, fragment)| {
            let candidate = extract_candidate(fragment);
            if candidate.is_none() {
                tracing::debug!("Fragment {} skipped: no link", index);
            }
            candidate
        })
        .collect()
}

fn extract_candidate(fragment: &RawListing) -> Option<ListingCandidate> {
    let link = fragment
        .link
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())?
        .to_string();

    let title = fragment
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    Some(ListingCandidate {
        title,
        link: Some(link),
        current_price: fragment.current_price.as_deref().and_then(parse_price),
        list_price: fragment.list_price.as_deref().and_then(parse_price),
    })
}

/// Parses a displayed price into a positive decimal
///
/// Every character other than ASCII digits and `.` is stripped first, so
/// currency symbols and thousands separators are ignored. What remains must
/// be a single decimal number: text with more than one `.`, such as a price
/// range collapsed to `12.9915.99`, is unparsable rather than truncated to a
/// leading number.
///
/// # Example
///
/// ```
/// use deal_scout::listing::parse_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_price("$1,299.99"), Some(Decimal::new(129999, 2)));
/// assert_eq!(parse_price("See price in cart"), None);
/// ```
pub fn parse_price(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .ok()
        .filter(|price| *price > Decimal::ZERO)
}
