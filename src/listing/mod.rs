//! Listing records and the per-page filtering pipeline
//!
//! Fragments delivered by a [`Navigator`](crate::navigator::Navigator) flow
//! through three pure stages:
//!
//! - [`extract_candidates`]: raw slot texts to typed candidates
//! - [`is_bundle`]: strict "N in 1" rejection
//! - [`evaluate_discount`]: discount math and threshold check

mod extractor;
mod filter;

pub use extractor::{extract_candidates, parse_price, UNKNOWN_TITLE};
pub use filter::{evaluate_discount, filter_page, is_bundle, looks_like_kit};

use rust_decimal::Decimal;

/// One result item as evaluated in the rendered page
///
/// Every slot is optional: storefront markup is inconsistent and a missing
/// slot is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    /// Title text
    pub title: Option<String>,

    /// Absolute product URL
    pub link: Option<String>,

    /// Text of the current/offer price slot, e.g. "$74.99"
    pub current_price: Option<String>,

    /// Text of the struck-through list price slot
    pub list_price: Option<String>,
}

/// A listing with parsed prices, not yet filtered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCandidate {
    pub title: String,
    pub link: Option<String>,
    pub current_price: Option<Decimal>,
    pub list_price: Option<Decimal>,
}

/// A listing that passed the bundle and discount filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub title: String,
    pub link: String,
    pub current_price: Decimal,
    pub list_price: Decimal,
    /// Percentage off the list price, rounded to two decimals
    pub discount_percent: Decimal,
}
