//! Google News RSS search.
//!
//! The search feed is queried with the headline's words joined by `+`,
//! optionally narrowed to a recency window (`when:90d` by default). Only the
//! first `news_limit` feed items are considered, and of those only the ones
//! whose title is similar enough to the headline are kept.

use super::{query_terms, rss};
use crate::error::FetchFailure;
use crate::fetch::Fetch;
use crate::models::EvidenceSet;
use crate::relevance::{RelevanceFilter, score};
use crate::settings::Settings;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Build the RSS search URL for `query`.
pub fn search_url(settings: &Settings, query: &str) -> Result<Url, FetchFailure> {
    let mut url = Url::parse(&settings.news_feed_url)
        .map_err(|e| FetchFailure::InvalidUrl(format!("{}: {e}", settings.news_feed_url)))?;

    let mut q = format!("q={}", query_terms(query));
    if let Some(window) = settings.news_window.as_deref().filter(|w| !w.trim().is_empty()) {
        q.push_str("+when:");
        q.push_str(&urlencoding::encode(window.trim()));
    }
    url.set_query(Some(&q));
    Ok(url)
}

/// Fetch the news feed for `query` and keep the relevant items.
#[instrument(level = "info", skip(fetcher, settings))]
pub async fn news_evidence<F: Fetch>(fetcher: &F, settings: &Settings, query: &str) -> EvidenceSet {
    let url = match search_url(settings, query) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Cannot build Google News url");
            return EvidenceSet::new();
        }
    };

    let body = match fetcher.fetch(&url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(%url, error = %e, "Google News fetch failed; no news evidence");
            return EvidenceSet::new();
        }
    };

    let xml = String::from_utf8_lossy(&body);
    let filter = RelevanceFilter::new(settings.relevance_threshold);
    let candidates = rss::extract(&xml, settings.news_limit);
    let candidate_count = candidates.len();

    let kept: EvidenceSet = candidates
        .into_iter()
        .filter(|item| {
            let keep = filter.keep(query, &item.title);
            debug!(title = %item.title, score = score(query, &item.title), keep, "Scored news title");
            keep
        })
        .take(settings.news_limit)
        .collect();

    info!(
        candidates = candidate_count,
        kept = kept.len(),
        threshold = filter.threshold(),
        "Collected news evidence"
    );
    kept
}
