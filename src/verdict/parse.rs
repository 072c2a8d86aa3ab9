//! Line-oriented parser for the reasoning service's answer.
//!
//! Grammar, applied to each line independently:
//!
//! ```text
//! line  := ws* mark? key mark? ws* ':' ws* mark? value ws*
//! key   := "verdict" | "reason"      (case-insensitive)
//! mark  := "*"+                      (markdown emphasis, ignored)
//! ```
//!
//! Lines that do not match are ignored. For each key the first matching line
//! wins; a key that never appears stays `None`.

use crate::models::{Verdict, VerdictLabel, VerdictSource};
use once_cell::sync::Lazy;
use regex::Regex;

static LABELED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*\**\s*(verdict|reason)\s*\**\s*:\s*\**\s*(.*?)\s*$")
        .expect("labeled line pattern is valid")
});

/// The two optional fields found in a model answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedVerdict {
    pub verdict: Option<String>,
    pub reason: Option<String>,
}

impl ParsedVerdict {
    /// Category of the `Verdict:` field; `Unknown` when it is absent.
    pub fn label(&self) -> VerdictLabel {
        VerdictLabel::from_label_text(self.verdict.as_deref().unwrap_or_default())
    }

    pub fn into_verdict(self) -> Verdict {
        Verdict {
            label: self.label(),
            label_text: self.verdict.filter(|text| !text.is_empty()),
            reason: self.reason.unwrap_or_default(),
            source: VerdictSource::Reasoning,
        }
    }
}

/// Scan `output` line by line for the `Verdict:` and `Reason:` fields.
pub fn parse(output: &str) -> ParsedVerdict {
    let mut parsed = ParsedVerdict::default();
    for line in output.lines() {
        let Some(caps) = LABELED_LINE.captures(line) else {
            continue;
        };
        let value = caps[2].trim_end_matches('*').trim().to_string();
        let slot = if caps[1].eq_ignore_ascii_case("verdict") {
            &mut parsed.verdict
        } else {
            &mut parsed.reason
        };
        if slot.is_none() {
            *slot = Some(value);
        }
        if parsed.verdict.is_some() && parsed.reason.is_some() {
            break;
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_answer() {
        let verdict = parse("Verdict: Real\nReason: matches official record").into_verdict();
        assert_eq!(verdict.label, VerdictLabel::Real);
        assert_eq!(verdict.reason, "matches official record");
        assert_eq!(verdict.source, VerdictSource::Reasoning);
    }

    #[test]
    fn test_no_recognized_lines() {
        let parsed = parse("I cannot determine that.\nSorry!");
        assert_eq!(parsed, ParsedVerdict::default());
        let verdict = parsed.into_verdict();
        assert_eq!(verdict.label, VerdictLabel::Unknown);
        assert_eq!(verdict.reason, "");
    }

    #[test]
    fn test_case_insensitive_keys_and_surrounding_text() {
        let output = "Here is my analysis.\n\nVERDICT: fake\nreason:   No outlet reported it.  \nThanks";
        let parsed = parse(output);
        assert_eq!(parsed.verdict.as_deref(), Some("fake"));
        assert_eq!(parsed.reason.as_deref(), Some("No outlet reported it."));
        assert_eq!(parsed.label(), VerdictLabel::Fake);
    }

    #[test]
    fn test_first_line_wins() {
        let parsed = parse("Verdict: Fake\nVerdict: Real\nReason: first\nReason: second");
        assert_eq!(parsed.verdict.as_deref(), Some("Fake"));
        assert_eq!(parsed.reason.as_deref(), Some("first"));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let parsed = parse("Reason: Reuters reported: \"confirmed\"");
        assert_eq!(parsed.reason.as_deref(), Some("Reuters reported: \"confirmed\""));
        assert_eq!(parsed.verdict, None);
    }

    #[test]
    fn test_markdown_emphasis_and_indentation() {
        let parsed = parse("    **Verdict:** Real\n  **Reason**: Widely reported.");
        assert_eq!(parsed.verdict.as_deref(), Some("Real"));
        assert_eq!(parsed.reason.as_deref(), Some("Widely reported."));
    }

    #[test]
    fn test_windows_line_endings() {
        let parsed = parse("Verdict: Real\r\nReason: ok\r\n");
        assert_eq!(parsed.verdict.as_deref(), Some("Real"));
        assert_eq!(parsed.reason.as_deref(), Some("ok"));
    }

    #[test]
    fn test_service_wording_is_kept() {
        let verdict = parse("Verdict: Unverified\nReason: Only one blog carries it").into_verdict();
        assert_eq!(verdict.label, VerdictLabel::Unknown);
        assert_eq!(verdict.label_text.as_deref(), Some("Unverified"));
        assert_eq!(verdict.display_label(), "Unverified");

        let verdict = parse("Reason: nothing else").into_verdict();
        assert_eq!(verdict.label_text, None);
    }

    #[test]
    fn test_missing_reason_only() {
        let verdict = parse("Verdict: Fake").into_verdict();
        assert_eq!(verdict.label, VerdictLabel::Fake);
        assert_eq!(verdict.reason, "");
    }

    #[test]
    fn test_key_must_lead_the_line() {
        let parsed = parse("My verdict: Real");
        assert_eq!(parsed.verdict, None);
    }

    #[test]
    fn test_template_echo_and_unclear_labels() {
        // A model that echoes the template line gives "(Real/Fake)", which
        // classifies as Real since "real" is checked first.
        assert_eq!(parse("Verdict: (Real/Fake)").label(), VerdictLabel::Real);
        assert_eq!(parse("Verdict: unclear").label(), VerdictLabel::Unknown);
    }
}
