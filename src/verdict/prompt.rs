//! Prompt rendering for the reasoning service.

use crate::models::EvidenceItem;

pub const NO_NEWS: &str = "No related news found.";
pub const NO_FACT_CHECKS: &str = "No direct fact-check reports found.";

/// One `- title: link` line per item, or `empty` when there are none.
pub fn render_evidence(items: &[EvidenceItem], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}: {}", item.title, item.link))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the fact-checking template with the headline and both evidence lists.
pub fn render_prompt(headline: &str, news: &[EvidenceItem], fact_checks: &[EvidenceItem]) -> String {
    let news_summary = render_evidence(news, NO_NEWS);
    let fact_summary = render_evidence(fact_checks, NO_FACT_CHECKS);

    format!(
        r#"You are an expert fact-checking AI.
Analyze the following headline and related evidence to determine if it's likely REAL or FAKE.
Be concise and evidence-based.

Headline: "{headline}"

Related News Articles:
{news_summary}

Fact-Checking Sources:
{fact_summary}

Respond strictly in this format:
Verdict: (Real/Fake)
Reason: <brief reason>
"#
    )
}
