//! Evidence sources and the extractors they rely on.
//!
//! | Source | Module | Method | Filtered by relevance |
//! |--------|--------|--------|-----------------------|
//! | Google News | [`google_news`] | RSS search feed | yes |
//! | Fact-check sites (Snopes, Alt News) | [`fact_check`] | HTML search page | no |
//!
//! Each source module exports:
//! - `search_url(..)`: Builds the search URL for a query
//! - an evidence function that fetches, extracts and returns an `EvidenceSet`
//!
//! A source that cannot be fetched contributes an empty set; its failure is
//! logged and never reaches the caller.

pub mod fact_check;
pub mod google_news;
pub mod html;
pub mod rss;

use itertools::Itertools;

/// Percent-encode each word of `query` and join the words with `+`.
pub fn query_terms(query: &str) -> String {
    query
        .split_whitespace()
        .map(urlencoding::encode)
        .join("+")
}
