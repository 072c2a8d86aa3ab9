//! Data models for retrieved evidence and the final verdict.
//!
//! This module defines the core data structures used throughout the application:
//! - [`EvidenceItem`]: One scraped (title, link) record with an optional summary
//! - [`Evidence`]: News evidence and fact-check evidence for one query
//! - [`Verdict`]: The Real/Fake/Unknown label plus its justification
//! - [`FactCheckReport`]: Everything shown to the user for one query
//!
//! All of them live only as long as a single query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A retrieved record believed relevant to the query.
///
/// Produced by the RSS and HTML extractors, filtered by the relevance
/// filter, and rendered as one card by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EvidenceItem {
    /// Headline text as published by the source.
    pub title: String,
    /// Absolute URL of the article or fact-check report.
    pub link: String,
    /// Plain-text description, when the source publishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl EvidenceItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }
}

/// Ordered, size-bounded list of evidence. Insertion order is source order.
pub type EvidenceSet = Vec<EvidenceItem>;

/// Both evidence lists gathered for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Evidence {
    /// Google News items that passed the relevance filter.
    pub news: EvidenceSet,
    /// Fact-check headings, concatenated in source declaration order.
    pub fact_checks: EvidenceSet,
}

impl Evidence {
    /// `true` when neither source produced anything.
    pub fn is_empty(&self) -> bool {
        self.news.is_empty() && self.fact_checks.is_empty()
    }
}

/// The verdict category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum VerdictLabel {
    Real,
    Fake,
    Unknown,
}

impl VerdictLabel {
    /// Classify a free-form label by case-insensitive containment.
    ///
    /// `real` is checked before `fake`, so text containing both is `Real`.
    /// Anything else, including the empty string, is `Unknown`.
    pub fn from_label_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("real") {
            VerdictLabel::Real
        } else if lower.contains("fake") {
            VerdictLabel::Fake
        } else {
            VerdictLabel::Unknown
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictLabel::Real => write!(f, "Real"),
            VerdictLabel::Fake => write!(f, "Fake"),
            VerdictLabel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Which path produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// The external reasoning service answered.
    Reasoning,
    /// The local classifier ran over the query alone.
    LocalClassifier,
    /// Neither collaborator could produce an answer.
    Unavailable,
}

/// The final classification plus a justification string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    /// The label exactly as the reasoning service wrote it, e.g. `Unverified`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
    pub reason: String,
    pub source: VerdictSource,
}

impl Verdict {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            label: VerdictLabel::Unknown,
            label_text: None,
            reason: reason.into(),
            source: VerdictSource::Unavailable,
        }
    }

    /// The service's own wording when it gave one, otherwise the category.
    pub fn display_label(&self) -> String {
        match self.label_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.label.to_string(),
        }
    }
}

/// Everything produced for one query, in the order it is shown.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FactCheckReport {
    /// The headline exactly as the user typed it.
    pub query: String,
    /// RFC 3339 timestamp of when the check ran.
    pub checked_at: String,
    pub news: EvidenceSet,
    pub fact_checks: EvidenceSet,
    pub verdict: Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_item_creation() {
        let item = EvidenceItem::new("Title", "https://example.com/a");
        assert_eq!(item.title, "Title");
        assert_eq!(item.link, "https://example.com/a");
        assert_eq!(item.summary, None);
    }

    #[test]
    fn test_evidence_item_serialization_skips_missing_summary() {
        let item = EvidenceItem::new("Title", "https://example.com/a");
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("summary"));

        let with = item.with_summary(Some("Short blurb".to_string()));
        let json = serde_json::to_string(&with).unwrap();
        assert!(json.contains("Short blurb"));
    }

    #[test]
    fn test_evidence_is_empty() {
        let mut evidence = Evidence::default();
        assert!(evidence.is_empty());
        evidence
            .fact_checks
            .push(EvidenceItem::new("Claim", "https://example.com"));
        assert!(!evidence.is_empty());
    }

    #[test]
    fn test_label_real_and_fake() {
        assert_eq!(VerdictLabel::from_label_text("Real"), VerdictLabel::Real);
        assert_eq!(VerdictLabel::from_label_text("FAKE"), VerdictLabel::Fake);
        assert_eq!(
            VerdictLabel::from_label_text("Likely fake news"),
            VerdictLabel::Fake
        );
    }

    #[test]
    fn test_label_real_wins_over_fake() {
        assert_eq!(
            VerdictLabel::from_label_text("Real/Fake"),
            VerdictLabel::Real
        );
    }

    #[test]
    fn test_label_unknown() {
        assert_eq!(VerdictLabel::from_label_text(""), VerdictLabel::Unknown);
        assert_eq!(
            VerdictLabel::from_label_text("Unverified"),
            VerdictLabel::Unknown
        );
    }

    #[test]
    fn test_report_serialization() {
        let report = FactCheckReport {
            query: "Moon made of cheese".to_string(),
            checked_at: "2025-05-06T20:30:00Z".to_string(),
            news: vec![],
            fact_checks: vec![EvidenceItem::new("Is the moon cheese?", "https://snopes.com/x")],
            verdict: Verdict {
                label: VerdictLabel::Fake,
                label_text: Some("Fake".to_string()),
                reason: "No credible source".to_string(),
                source: VerdictSource::Reasoning,
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"label\":\"Fake\""));
        assert!(json.contains("\"source\":\"reasoning\""));

        let back: FactCheckReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fact_checks.len(), 1);
        assert_eq!(back.verdict.label, VerdictLabel::Fake);
        assert_eq!(back.verdict.label_text.as_deref(), Some("Fake"));
    }

    #[test]
    fn test_display_label_prefers_service_wording() {
        let mut verdict = Verdict::unavailable("service down");
        assert_eq!(verdict.display_label(), "Unknown");
        assert!(!serde_json::to_string(&verdict).unwrap().contains("label_text"));

        verdict.label_text = Some("Unverified".to_string());
        assert_eq!(verdict.display_label(), "Unverified");

        verdict.label_text = Some("  ".to_string());
        assert_eq!(verdict.display_label(), "Unknown");
    }
}
