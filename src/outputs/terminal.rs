//! Plain-text rendering of a report for the terminal.

use crate::models::{EvidenceItem, FactCheckReport, VerdictLabel};
use std::fmt::Write;

pub const NO_NEWS_MESSAGE: &str = "No relevant news articles found.";
pub const NO_FACT_CHECKS_MESSAGE: &str = "No existing fact-check reports found online.";

/// Render the three sections (news, fact-checks, verdict) as text cards.
pub fn render_report(report: &FactCheckReport) -> String {
    let mut out = String::new();

    writeln!(out, "Headline: {}\n", report.query).unwrap();
    render_section(&mut out, "📰 Related News Sources", &report.news, NO_NEWS_MESSAGE);
    render_section(
        &mut out,
        "✅ Fact-Checking Reports",
        &report.fact_checks,
        NO_FACT_CHECKS_MESSAGE,
    );

    writeln!(out, "🧠 AI Fact-Check Verdict").unwrap();
    writeln!(out, "{}", "-".repeat(40)).unwrap();
    writeln!(
        out,
        "{} Verdict: {}",
        verdict_marker(report.verdict.label),
        report.verdict.display_label()
    )
    .unwrap();
    writeln!(out, "   Reason: {}", report.verdict.reason).unwrap();
    out
}

fn render_section(out: &mut String, heading: &str, items: &[EvidenceItem], empty: &str) {
    writeln!(out, "{heading}").unwrap();
    writeln!(out, "{}", "-".repeat(40)).unwrap();
    if items.is_empty() {
        writeln!(out, "ℹ️  {empty}").unwrap();
    }
    for (i, item) in items.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, item.title).unwrap();
        writeln!(out, "   {}", item.link).unwrap();
    }
    writeln!(out).unwrap();
}

/// Real and Fake get their own marker; Unknown gets a neutral one.
pub fn verdict_marker(label: VerdictLabel) -> &'static str {
    match label {
        VerdictLabel::Real => "✅",
        VerdictLabel::Fake => "❌",
        VerdictLabel::Unknown => "⚠️",
    }
}
