//! Verdict engine: the second entry point the presentation layer calls.
//!
//! Per query the engine visits exactly one strategy:
//!
//! ```text
//! evidence found   -> Reasoning        -> Verdict
//! no evidence      -> LocalClassifying -> Verdict
//! ```
//!
//! Both collaborators are built once in `main` and injected as a
//! [`Capability`], so a missing API config or model file shows up as an
//! explicit `Unavailable` state instead of a crash at query time.

pub mod classifier;
pub mod parse;
pub mod prompt;

use crate::api::AskAsync;
use crate::models::{EvidenceItem, Verdict, VerdictSource};
use crate::utils::truncate_for_log;
use classifier::{SequenceClassifier, label_from_logits};
use std::fmt;
use tracing::{info, instrument, warn};

/// Shown when the local classifier cannot produce a label.
pub const CANNOT_ANALYZE: &str = "Local classifier unavailable; cannot analyze this headline.";

/// An injected collaborator that either loaded or failed to load.
pub enum Capability<T> {
    Ready(T),
    /// Initialization failed; the string says why.
    Unavailable(String),
}

impl<T> Capability<T> {
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Capability::Ready(value),
            Err(e) => Capability::Unavailable(e.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Capability::Ready(_))
    }
}

impl<T> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Ready(_) => write!(f, "Ready"),
            Capability::Unavailable(why) => write!(f, "Unavailable({why})"),
        }
    }
}

/// Chooses and runs a verdict strategy for one query.
#[derive(Debug)]
pub struct VerdictEngine<R, C> {
    reasoner: Capability<R>,
    classifier: Capability<C>,
}

impl<R: AskAsync, C: SequenceClassifier> VerdictEngine<R, C> {
    pub fn new(reasoner: Capability<R>, classifier: Capability<C>) -> Self {
        Self { reasoner, classifier }
    }

    /// Produce a verdict for `query` from the gathered evidence.
    ///
    /// The reasoning service is used whenever any evidence exists; the local
    /// classifier only runs when both lists are empty. Never fails: every
    /// failure becomes an `Unknown` verdict with an explanatory reason.
    #[instrument(level = "info", skip_all, fields(news = news.len(), fact_checks = fact_checks.len()))]
    pub async fn classify(&self, query: &str, news: &[EvidenceItem], fact_checks: &[EvidenceItem]) -> Verdict {
        let verdict = if news.is_empty() && fact_checks.is_empty() {
            info!(state = "local_classifying", "No evidence found; using local classifier");
            self.classify_locally(query)
        } else {
            info!(state = "reasoning", "Evidence found; asking reasoning service");
            self.reason(query, news, fact_checks).await
        };
        info!(label = %verdict.label, source = ?verdict.source, "Verdict reached");
        verdict
    }

    async fn reason(&self, query: &str, news: &[EvidenceItem], fact_checks: &[EvidenceItem]) -> Verdict {
        let reasoner = match &self.reasoner {
            Capability::Ready(reasoner) => reasoner,
            Capability::Unavailable(why) => {
                warn!(%why, "Reasoning service not configured");
                return Verdict::unavailable(format!("Reasoning service unavailable: {why}"));
            }
        };

        let prompt = prompt::render_prompt(query, news, fact_checks);
        match reasoner.ask(&prompt).await {
            Ok(answer) => {
                let parsed = parse::parse(&answer);
                if parsed.verdict.is_none() {
                    warn!(
                        response_preview = %truncate_for_log(&answer, 300),
                        "Model answer has no Verdict line"
                    );
                }
                parsed.into_verdict()
            }
            Err(e) => {
                warn!(error = %e, "Reasoning service failed");
                Verdict::unavailable(format!("Reasoning service unavailable: {e}"))
            }
        }
    }

    fn classify_locally(&self, query: &str) -> Verdict {
        let classifier = match &self.classifier {
            Capability::Ready(classifier) => classifier,
            Capability::Unavailable(why) => {
                warn!(%why, "Local classifier not loaded");
                return Verdict::unavailable(CANNOT_ANALYZE);
            }
        };

        match classifier.logits(query).and_then(|logits| label_from_logits(&logits)) {
            Ok((label, confidence)) => Verdict {
                label,
                label_text: None,
                reason: format!(
                    "No related reports were found online; the local classifier rates this headline {label} with {:.0}% confidence.",
                    confidence * 100.0
                ),
                source: VerdictSource::LocalClassifier,
            },
            Err(e) => {
                warn!(error = %e, "Local classification failed");
                Verdict::unavailable(CANNOT_ANALYZE)
            }
        }
    }
}
