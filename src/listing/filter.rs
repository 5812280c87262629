//! Bundle exclusion and discount threshold

use super::{Deal, ListingCandidate};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::LazyLock;

/// "5 in 1", "3-in-1", "10in1" anywhere in a title
static BUNDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+[\s-]*in[\s-]*1").expect("valid bundle regex"));

/// Broader kit/bundle wording. Never used to reject a listing.
static KIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+\s*in\s*1|kit|bundle").expect("valid kit regex"));

/// Returns true if the title advertises a numeric "N in 1" bundle
pub fn is_bundle(title: &str) -> bool {
    BUNDLE_PATTERN.is_match(title)
}

/// Returns true if the title mentions kits or bundles in any form
///
/// Informational only: kit wording alone does not exclude a listing, since
/// plenty of single products ("Survival Kit") carry it.
pub fn looks_like_kit(title: &str) -> bool {
    KIT_PATTERN.is_match(title)
}

/// Computes the discount of a candidate and accepts it if it meets `min_discount`
///
/// Returns `None` when either price is missing or non-positive, when the
/// candidate has no link, when the arithmetic leaves the `Decimal` range, or
/// when the rounded discount is below the threshold. The threshold is
/// inclusive and applies to the value rounded to two places.
pub fn evaluate_discount(candidate: &ListingCandidate, min_discount: Decimal) -> Option<Deal> {
    let current = candidate.current_price.filter(|p| *p > Decimal::ZERO)?;
    let list = candidate.list_price.filter(|p| *p > Decimal::ZERO)?;
    let link = candidate.link.as_ref()?;

    let discount = list
        .checked_sub(current)
        .and_then(|saved| saved.checked_div(list))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if discount < min_discount {
        return None;
    }

    Some(Deal {
        title: candidate.title.clone(),
        link: link.clone(),
        current_price: current,
        list_price: list,
        discount_percent: discount,
    })
}

/// Runs the bundle and discount filters over one page of candidates
///
/// Accepted deals keep the in-page order of their candidates.
pub fn filter_page(candidates: &[ListingCandidate], min_discount: Decimal) -> Vec<Deal> {
    let mut deals = Vec::new();

    for candidate in candidates {
        if is_bundle(&candidate.title) {
            tracing::debug!("{}: skipped (bundle detected)", candidate.title);
            continue;
        }

        if looks_like_kit(&candidate.title) {
            tracing::debug!("{}: kit wording, kept", candidate.title);
        }

        match evaluate_discount(candidate, min_discount) {
            Some(deal) => {
                tracing::debug!("{}: accepted at {}% off", deal.title, deal.discount_percent);
                deals.push(deal);
            }
            None => tracing::trace!("{}: rejected by discount filter", candidate.title),
        }
    }

    deals
}
