//! Evidence aggregation across all sources.
//!
//! [`Aggregator::aggregate`] is the first of the two entry points the
//! presentation layer calls. It never fails: each source that cannot be
//! reached simply contributes nothing.

use crate::fetch::Fetch;
use crate::models::Evidence;
use crate::scrapers::{fact_check, google_news};
use crate::settings::Settings;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Runs every evidence source for a query.
#[derive(Debug)]
pub struct Aggregator<'a, F> {
    fetcher: F,
    settings: &'a Settings,
}

impl<'a, F: Fetch> Aggregator<'a, F> {
    pub fn new(fetcher: F, settings: &'a Settings) -> Self {
        Self { fetcher, settings }
    }

    /// Gather news evidence and fact-check evidence for `query`.
    ///
    /// The news feed and the fact-check sites are fetched concurrently; the
    /// result order only depends on source declaration order.
    #[instrument(level = "info", skip(self))]
    pub async fn aggregate(&self, query: &str) -> Evidence {
        let t0 = Instant::now();
        let (news, fact_checks) = futures::join!(
            google_news::news_evidence(&self.fetcher, self.settings, query),
            fact_check::fact_check_evidence(&self.fetcher, self.settings, query),
        );

        info!(
            news = news.len(),
            fact_checks = fact_checks.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Aggregation complete"
        );
        let evidence = Evidence { news, fact_checks };
        if evidence.is_empty() {
            warn!("No online evidence found for query");
        }
        evidence
    }
}
