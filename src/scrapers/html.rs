//! Heading extraction from fact-check search result pages.
//!
//! Result pages list each report as a heading wrapping a link. The first
//! `limit` headings are inspected in document order; a heading without an
//! anchor (or with an anchor lacking `href`) still uses up one of the
//! `limit` slots but produces no record.

use crate::models::EvidenceItem;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Extract `(heading text, first anchor href)` records from `body`.
///
/// Relative links are resolved against `page_url`.
pub fn extract_headings(body: &str, page_url: &Url, tag: &str, limit: usize) -> Vec<EvidenceItem> {
    let heading_selector = match Selector::parse(tag) {
        Ok(selector) => selector,
        Err(e) => {
            warn!(%tag, error = %e, "Invalid heading selector");
            return Vec::new();
        }
    };
    let anchor_selector = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(e) => {
            warn!(error = %e, "Invalid anchor selector");
            return Vec::new();
        }
    };

    let document = Html::parse_document(body);
    document
        .select(&heading_selector)
        .take(limit)
        .filter_map(|heading| heading_record(heading, &anchor_selector, page_url))
        .collect()
}

fn heading_record(heading: ElementRef<'_>, anchor: &Selector, page_url: &Url) -> Option<EvidenceItem> {
    let title = heading.text().collect::<Vec<_>>().join(" ");
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");

    let Some(href) = heading
        .select(anchor)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
    else {
        debug!(%title, "Skipping heading without a link");
        return None;
    };

    if title.is_empty() {
        debug!(%href, "Skipping heading without text");
        return None;
    }

    match page_url.join(href) {
        Ok(link) => Some(EvidenceItem::new(title, link.to_string())),
        Err(e) => {
            debug!(%href, error = %e, "Skipping heading with unusable link");
            None
        }
    }
}
