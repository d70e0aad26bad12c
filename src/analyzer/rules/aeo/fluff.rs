//! Filler-language detection

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::AeoThresholds;
use crate::document::{text, Document};
use crate::CheckKind;
use regex::Regex;
use std::sync::OnceLock;

/// Meta-commentary patterns counted on top of the configured phrase list
fn generic_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\bit'?s important to (note|understand|remember)\b",
            r"\bas (you )?(can|may) (know|see|imagine)\b",
            r"\bin (this|our) (blog post|article|guide)\b",
            r"\b(let'?s|we'?ll|we will) (take a look|explore|dive into|discuss)\b",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Fluff occurrences in `text`, as matched lowercase snippets in order.
///
/// Overlapping matches (a configured phrase that is also a generic pattern)
/// count once.
pub fn fluff_hits(text: &str, phrases: &[String]) -> Vec<String> {
    let haystack = normalize(text);
    let mut spans: Vec<(usize, usize)> = Vec::new();

    for phrase in phrases {
        let needle = normalize(phrase.trim());
        if needle.is_empty() {
            continue;
        }
        spans.extend(
            haystack
                .match_indices(needle.as_str())
                .map(|(start, m)| (start, start + m.len())),
        );
    }
    for pattern in generic_patterns() {
        spans.extend(pattern.find_iter(&haystack).map(|m| (m.start(), m.end())));
    }

    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged
        .into_iter()
        .map(|(start, end)| haystack[start..end].to_string())
        .collect()
}

pub struct FluffDetectionRule {
    phrases: Vec<String>,
    fail_density: f64,
}

impl FluffDetectionRule {
    pub fn new(thresholds: &AeoThresholds) -> Self {
        Self {
            phrases: thresholds.fluff_phrases.clone(),
            fail_density: thresholds.fluff_fail_density,
        }
    }
}

impl Default for FluffDetectionRule {
    fn default() -> Self {
        Self::new(&AeoThresholds::default())
    }
}

impl CheckRule for FluffDetectionRule {
    fn kind(&self) -> CheckKind {
        CheckKind::FluffDetection
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation = "Cut filler phrases. Start paragraphs with direct statements. Remove meta-commentary about the article itself.";
        let Some(paragraphs) = document.paragraphs.as_deref() else {
            return CheckOutcome::missing("paragraph", recommendation);
        };

        let body = paragraphs.join(" ");
        let hits = fluff_hits(&body, &self.phrases);
        if hits.is_empty() {
            return CheckOutcome::pass(
                "Content is direct and value-focused with no filler phrases.",
                "Maintain this concise, direct style. AI engines prefer substance over style.",
            );
        }

        let words = text::word_count(&body).max(1);
        let density = hits.len() as f64 * 100.0 / words as f64;

        let mut examples = hits.clone();
        examples.dedup();

        if density > self.fail_density {
            CheckOutcome::fail(
                format!(
                    "Detected {} instances of fluffy, generic language ({:.2} per 100 words). This dilutes answer quality.",
                    hits.len(),
                    density
                ),
                recommendation,
            )
            .with_examples(examples)
        } else {
            CheckOutcome::warning(
                format!(
                    "Detected {} instance(s) of fluffy language ({:.2} per 100 words).",
                    hits.len(),
                    density
                ),
                "Remove unnecessary phrases. Get to the point faster. AI engines skip filler content.",
            )
            .with_examples(examples)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckStatus;

    fn phrases() -> Vec<String> {
        AeoThresholds::default().fluff_phrases
    }

    fn with_body(body: String) -> Document {
        Document {
            paragraphs: Some(vec![body]),
            ..Document::new("https://example.com")
        }
    }

    fn filler(words: usize) -> String {
        vec!["soil"; words].join(" ")
    }

    #[test]
    fn test_hits_are_case_insensitive_and_counted() {
        let hits = fluff_hits(
            "In Today's World compost matters. Needless to say, in today's world it does.",
            &phrases(),
        );
        assert_eq!(
            hits,
            vec!["in today's world", "needless to say", "in today's world"]
        );
    }

    #[test]
    fn test_curly_apostrophes_match() {
        let hits = fluff_hits("In today\u{2019}s world, we compost.", &phrases());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_overlapping_matches_count_once() {
        let hits = fluff_hits("Now let's explore the options.", &phrases());
        assert_eq!(hits, vec!["let's explore"]);
    }

    #[test]
    fn test_generic_patterns() {
        let hits = fluff_hits("In this guide we will discuss worms.", &[]);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_density_bands() {
        let rule = FluffDetectionRule::default();
        assert_eq!(
            rule.evaluate(&with_body(filler(200))).status,
            CheckStatus::Pass
        );

        // 1 hit in ~203 words: 0.49 per 100
        let light = format!("Needless to say {}", filler(200));
        let outcome = rule.evaluate(&with_body(light));
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.examples, vec!["needless to say"]);

        // 3 hits in ~109 words: 2.75 per 100
        let heavy = format!(
            "Needless to say {} at the end of the day it goes without saying",
            filler(100)
        );
        assert_eq!(rule.evaluate(&with_body(heavy)).status, CheckStatus::Fail);
    }

    #[test]
    fn test_missing_paragraphs_fail() {
        let outcome = FluffDetectionRule::default().evaluate(&Document::new("https://a.test"));
        assert_eq!(outcome.status, CheckStatus::Fail);
    }
}
