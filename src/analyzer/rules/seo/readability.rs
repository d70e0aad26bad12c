//! Readability from sentence and paragraph length

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::SeoThresholds;
use crate::document::{text, Document};
use crate::CheckKind;

pub struct ReadabilityRule {
    sentence_warn: f64,
    sentence_fail: f64,
    paragraph_warn: f64,
}

impl ReadabilityRule {
    pub fn new(thresholds: &SeoThresholds) -> Self {
        Self {
            sentence_warn: thresholds.sentence_warn_words,
            sentence_fail: thresholds.sentence_fail_words,
            paragraph_warn: thresholds.paragraph_warn_words,
        }
    }

    /// Longest sentences above the warning threshold, longest first
    fn long_sentences<'a>(&self, paragraphs: &[&'a str]) -> Vec<&'a str> {
        let mut long: Vec<(usize, &str)> = paragraphs
            .iter()
            .flat_map(|p| text::sentences(*p))
            .map(|s| (text::word_count(s), s))
            .filter(|(n, _)| *n as f64 > self.sentence_warn)
            .collect();
        long.sort_by(|a, b| b.0.cmp(&a.0));
        long.into_iter().map(|(_, s)| s).collect()
    }
}

impl Default for ReadabilityRule {
    fn default() -> Self {
        Self::new(&SeoThresholds::default())
    }
}

impl CheckRule for ReadabilityRule {
    fn kind(&self) -> CheckKind {
        CheckKind::Readability
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation =
            "Break content into clear paragraphs. Each paragraph should cover one main idea.";
        if document.paragraphs.is_none() {
            return CheckOutcome::missing("paragraph", recommendation);
        }

        let paragraphs: Vec<&str> = document
            .paragraphs_or_empty()
            .iter()
            .map(|p| p.trim())
            .filter(|p| text::word_count(p) > 0)
            .collect();

        let Some(avg_sentence) = text::average_sentence_length(paragraphs.iter().copied()) else {
            return CheckOutcome::fail("No paragraph structure detected.", recommendation);
        };
        let avg_paragraph = paragraphs.iter().map(|p| text::word_count(p)).sum::<usize>() as f64
            / paragraphs.len() as f64;

        let examples = self
            .long_sentences(&paragraphs)
            .into_iter()
            .map(|s| text::truncate(s, 160));

        if avg_sentence > self.sentence_fail {
            CheckOutcome::fail(
                format!(
                    "Average sentence length is {:.1} words. Long sentences are hard to scan and quote.",
                    avg_sentence
                ),
                format!(
                    "Split long sentences so the average stays under {:.0} words.",
                    self.sentence_warn
                ),
            )
            .with_examples(examples)
        } else if avg_sentence > self.sentence_warn {
            CheckOutcome::warning(
                format!(
                    "Average sentence length is {:.1} words, slightly above the {:.0}-word target.",
                    avg_sentence, self.sentence_warn
                ),
                "Shorten the longest sentences and prefer one idea per sentence.",
            )
            .with_examples(examples)
        } else if avg_paragraph > self.paragraph_warn {
            CheckOutcome::warning(
                format!(
                    "Average paragraph length is high ({:.0} words). Long paragraphs reduce readability.",
                    avg_paragraph
                ),
                "Break long paragraphs into shorter ones (40-60 words ideal). Use bullet points and subheadings.",
            )
        } else {
            CheckOutcome::pass(
                format!(
                    "Sentences average {:.1} words and paragraphs {:.0} words; structure supports good readability.",
                    avg_sentence, avg_paragraph
                ),
                "Readability structure is good. Continue using short paragraphs, bullet points, and clear headings.",
            )
        }
    }
}
