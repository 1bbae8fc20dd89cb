//! Listing filter/page state and its query-string form.
//!
//! The canonical query string carries only non-default fields, in the
//! order `category`, `status`, `page`, so identical states always produce
//! identical links.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub mod state;

pub use state::{reduce, FilterAction, ListingState, StatusFilter, ALL};

/// Everything but RFC 3986 unreserved characters gets escaped, so a space
/// becomes `%20` rather than `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build listing state from already-decoded query parameters.
pub fn decode(params: &HashMap<String, String>) -> ListingState {
    let category = params
        .get("category")
        .filter(|c| !c.is_empty() && c.as_str() != ALL)
        .cloned();
    let status = params
        .get("status")
        .map(|s| StatusFilter::from_name(s))
        .unwrap_or_default();
    let page = params
        .get("page")
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);

    ListingState { category, status, page }
}

/// Canonical query string for `state`, without the leading `?`.
pub fn encode(state: &ListingState) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(category) = state.category.as_deref().filter(|c| !c.is_empty() && *c != ALL) {
        parts.push(format!("category={}", utf8_percent_encode(category, QUERY_VALUE)));
    }
    if state.status != StatusFilter::All {
        parts.push(format!("status={}", utf8_percent_encode(state.status.name(), QUERY_VALUE)));
    }
    if state.page > 1 {
        parts.push(format!("page={}", state.page));
    }
    parts.join("&")
}

/// Target of the detail page's back link: the listing URL recorded on the
/// way in, verbatim, or the bare index route.
pub fn build_back_url(previous_listing_url: Option<&str>, index_url: &str) -> String {
    previous_listing_url
        .filter(|url| !url.is_empty())
        .unwrap_or(index_url)
        .to_string()
}

/// Whether `url` is the index route, with or without a query string.
pub fn is_listing_url(url: &str, index_url: &str) -> bool {
    match url.strip_prefix(index_url) {
        Some(rest) => rest.is_empty() || rest.starts_with('?'),
        None => false,
    }
}
