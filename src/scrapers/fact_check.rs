//! Fact-checking site search (Snopes, Alt News, or any configured site).
//!
//! Each site's search page is fetched once and its first few headings are
//! taken as-is: no relevance filter is applied here, since the site's own
//! search already did the matching.

use super::{html, query_terms};
use crate::error::FetchFailure;
use crate::fetch::Fetch;
use crate::models::EvidenceSet;
use crate::settings::{FactCheckSource, Settings};
use futures::future::join_all;
use itertools::Itertools;
use tracing::{info, instrument, warn};
use url::Url;

/// Build `{search_url}?s={terms}` for one site.
pub fn search_url(source: &FactCheckSource, query: &str) -> Result<Url, FetchFailure> {
    let mut url = Url::parse(&source.search_url)
        .map_err(|e| FetchFailure::InvalidUrl(format!("{}: {e}", source.search_url)))?;
    url.set_query(Some(&format!("s={}", query_terms(query))));
    Ok(url)
}

/// Headings from one site's search results; empty when the site is unreachable.
#[instrument(level = "info", skip(fetcher, settings, source), fields(source = %source.name))]
pub async fn source_evidence<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    source: &FactCheckSource,
    query: &str,
) -> EvidenceSet {
    let url = match search_url(source, query) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Cannot build fact-check url");
            return EvidenceSet::new();
        }
    };

    match fetcher.fetch(&url).await {
        Ok(body) => {
            let page = String::from_utf8_lossy(&body);
            let records = html::extract_headings(
                &page,
                &url,
                &settings.heading_tag,
                settings.headings_per_source,
            );
            info!(count = records.len(), "Collected fact-check headings");
            records
        }
        Err(e) => {
            warn!(%url, error = %e, "Fact-check fetch failed; source skipped");
            EvidenceSet::new()
        }
    }
}

/// Fact-check evidence from every configured site, in declaration order.
///
/// Sites are fetched concurrently; a failing site contributes nothing and
/// does not affect the others.
#[instrument(level = "info", skip(fetcher, settings))]
pub async fn fact_check_evidence<F: Fetch>(fetcher: &F, settings: &Settings, query: &str) -> EvidenceSet {
    let per_source = join_all(
        settings
            .fact_check_sources
            .iter()
            .map(|source| source_evidence(fetcher, settings, source, query)),
    )
    .await;

    let combined = per_source.into_iter().flatten();
    let results: EvidenceSet = if settings.dedupe_fact_checks {
        combined.unique_by(|item| item.link.clone()).collect()
    } else {
        combined.collect()
    };

    info!(count = results.len(), "Collected fact-check evidence");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests_support::StubFetcher;

    fn page(links: &[(&str, &str)]) -> String {
        let headings: String = links
            .iter()
            .map(|(title, href)| format!("<h2><a href=\"{href}\">{title}</a></h2>"))
            .collect();
        format!("<html><body>{headings}</body></html>")
    }

    fn url_for(settings: &Settings, index: usize, query: &str) -> String {
        search_url(&settings.fact_check_sources[index], query)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_search_urls() {
        let settings = Settings::default();
        assert_eq!(
            url_for(&settings, 0, "moon landing"),
            "https://www.snopes.com/?s=moon+landing"
        );
        assert_eq!(
            url_for(&settings, 1, "moon landing"),
            "https://www.altnews.in/?s=moon+landing"
        );
    }

    #[tokio::test]
    async fn test_concatenates_in_declaration_order() {
        let settings = Settings::default();
        let query = "moon landing";
        let fetcher = StubFetcher::default()
            .with_body(
                &url_for(&settings, 1, query),
                page(&[("Alt one", "https://www.altnews.in/one/")]),
            )
            .with_body(
                &url_for(&settings, 0, query),
                page(&[
                    ("Snopes one", "https://www.snopes.com/one/"),
                    ("Snopes two", "https://www.snopes.com/two/"),
                ]),
            );

        let results = fact_check_evidence(&fetcher, &settings, query).await;
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Snopes one", "Snopes two", "Alt one"]);
    }

    #[tokio::test]
    async fn test_no_relevance_filter_and_three_per_source() {
        let settings = Settings::default();
        let query = "moon landing";
        let fetcher = StubFetcher::default().with_body(
            &url_for(&settings, 0, query),
            page(&[
                ("Totally unrelated", "/a"),
                ("Also unrelated", "/b"),
                ("Still unrelated", "/c"),
                ("Fourth", "/d"),
            ]),
        );

        let results = fact_check_evidence(&fetcher, &settings, query).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].link, "https://www.snopes.com/a");
    }

    #[tokio::test]
    async fn test_one_failing_source_keeps_the_other() {
        let settings = Settings::default();
        let query = "moon landing";
        let fetcher = StubFetcher::default().with_body(
            &url_for(&settings, 1, query),
            page(&[("Alt one", "https://www.altnews.in/one/")]),
        );

        let results = fact_check_evidence(&fetcher, &settings, query).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Alt one");
        assert_eq!(fetcher.requested.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_all_sources_unreachable() {
        let fetcher = StubFetcher::default();
        let results = fact_check_evidence(&fetcher, &Settings::default(), "moon").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_dedupe_by_link_when_enabled() {
        let query = "moon landing";
        let shared = "https://mirror.example.com/moon/";
        let mut settings = Settings::default();
        let build = |settings: &Settings| {
            StubFetcher::default()
                .with_body(&url_for(settings, 0, query), page(&[("Snopes copy", shared)]))
                .with_body(&url_for(settings, 1, query), page(&[("Alt copy", shared)]))
        };

        let plain = fact_check_evidence(&build(&settings), &settings, query).await;
        assert_eq!(plain.len(), 2);

        settings.dedupe_fact_checks = true;
        let deduped = fact_check_evidence(&build(&settings), &settings, query).await;
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].title, "Snopes copy");
    }
}
