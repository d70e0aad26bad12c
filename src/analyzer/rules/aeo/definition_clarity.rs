//! Opening definition in the first paragraph

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::AeoThresholds;
use crate::document::{text, Document};
use crate::CheckKind;
use regex::Regex;
use std::sync::OnceLock;

/// Copular phrasing that introduces a definition ("X is ...", "X refers to ...")
fn definition_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"(?i)\b(is defined as|refers to|is|are|means|describes|represents)\b").ok()
        })
        .as_ref()
}

pub struct DefinitionClarityRule {
    window: usize,
}

impl DefinitionClarityRule {
    pub fn new(thresholds: &AeoThresholds) -> Self {
        Self {
            window: thresholds.definition_window_words,
        }
    }
}

impl Default for DefinitionClarityRule {
    fn default() -> Self {
        Self::new(&AeoThresholds::default())
    }
}

impl CheckRule for DefinitionClarityRule {
    fn kind(&self) -> CheckKind {
        CheckKind::DefinitionClarity
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation = "Start with a direct definition: '[Topic] is [clear definition]'. Then elaborate in following paragraphs.";
        if document.paragraphs.is_none() {
            return CheckOutcome::missing("paragraph", recommendation);
        }
        let Some(sentence) = document.first_paragraph().and_then(text::first_sentence) else {
            return CheckOutcome::fail("No paragraph content found.", recommendation);
        };
        let example = text::truncate(sentence, 160);

        if sentence.ends_with('?') {
            return CheckOutcome::fail(
                "The page opens with a question instead of a definition. AI engines prefer immediate clarity.",
                recommendation,
            )
            .with_examples([example]);
        }

        // The copula needs a subject in front of it
        let subject_first = definition_pattern().and_then(|re| {
            re.find_iter(sentence)
                .find(|m| text::word_count(&sentence[..m.start()]) >= 1)
        });
        let Some(found) = subject_first else {
            return CheckOutcome::fail(
                "The opening sentence doesn't provide a clear definition. AI engines prefer immediate clarity.",
                recommendation,
            )
            .with_examples([example]);
        };

        // Zero-based word position of the copula
        let position = text::word_count(&sentence[..found.start()]);
        if position < self.window {
            CheckOutcome::pass(
                "The opening sentence provides a clear, concise definition - ideal for AI extraction.",
                "Maintain this pattern. Clear definitions help AI engines generate accurate summaries.",
            )
        } else {
            CheckOutcome::warning(
                format!(
                    "The opening sentence has definition language, but only after {} words.",
                    position
                ),
                format!(
                    "Move the definition into the first {} words. Be more direct and specific.",
                    self.window
                ),
            )
            .with_examples([example])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckStatus;

    fn status(first: &str) -> CheckStatus {
        let doc = Document {
            paragraphs: Some(vec![first.to_string(), "Second paragraph.".to_string()]),
            ..Document::new("https://example.com")
        };
        DefinitionClarityRule::default().evaluate(&doc).status
    }

    #[test]
    fn test_early_definition_passes() {
        assert_eq!(
            status("Composting is the controlled decomposition of organic matter."),
            CheckStatus::Pass
        );
        assert_eq!(
            status("Vermicompost refers to compost produced by worms."),
            CheckStatus::Pass
        );
    }

    #[test]
    fn test_late_definition_warns() {
        let filler = vec!["garden"; 20].join(" ");
        assert_eq!(
            status(&format!("{} compost is decomposed matter.", filler)),
            CheckStatus::Warning
        );
    }

    #[test]
    fn test_definition_in_second_sentence_does_not_count() {
        assert_eq!(
            status("Welcome to our garden blog. Compost is decomposed matter."),
            CheckStatus::Fail
        );
    }

    #[test]
    fn test_question_opening_is_not_a_definition() {
        assert_eq!(
            status("Is composting hard? Many people wonder about it."),
            CheckStatus::Fail
        );
        assert_eq!(status("What is compost?"), CheckStatus::Fail);
    }

    #[test]
    fn test_copula_needs_a_subject() {
        assert_eq!(status("Is this worth doing at all."), CheckStatus::Fail);
        assert_eq!(
            status("Are worms useful when compost is the goal."),
            CheckStatus::Pass
        );
    }

    #[test]
    fn test_word_boundaries() {
        // "this" and "island" contain "is" but are not copulas
        assert_eq!(status("On this island we garden."), CheckStatus::Fail);
    }

    #[test]
    fn test_missing_and_empty_paragraphs() {
        let rule = DefinitionClarityRule::default();
        assert_eq!(
            rule.evaluate(&Document::new("https://a.test")).status,
            CheckStatus::Fail
        );
        let empty = Document {
            paragraphs: Some(vec!["  ".to_string()]),
            ..Document::new("https://a.test")
        };
        assert_eq!(rule.evaluate(&empty).status, CheckStatus::Fail);
    }
}
