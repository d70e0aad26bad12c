//! Question-phrased headings

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::AeoThresholds;
use crate::document::{text, Document};
use crate::CheckKind;

pub struct QuestionHeadingsRule {
    min_questions: usize,
}

impl QuestionHeadingsRule {
    pub fn new(thresholds: &AeoThresholds) -> Self {
        Self {
            min_questions: thresholds.question_headings_min,
        }
    }
}

impl Default for QuestionHeadingsRule {
    fn default() -> Self {
        Self::new(&AeoThresholds::default())
    }
}

impl CheckRule for QuestionHeadingsRule {
    fn kind(&self) -> CheckKind {
        CheckKind::QuestionHeadings
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation = "Rewrite headings to address specific user questions. Examples: 'What is [topic]?', 'How to [task]?', 'Why [concept]?'";
        let Some(headings) = document.headings.as_deref() else {
            return CheckOutcome::missing("heading", recommendation);
        };

        let questions: Vec<&str> = headings
            .iter()
            .map(|h| h.text.trim())
            .filter(|t| text::is_question(t))
            .collect();

        match questions.len() {
            0 if headings.is_empty() => CheckOutcome::fail(
                "No headings found. AI engines look for question-based headings.",
                recommendation,
            ),
            0 => CheckOutcome::fail(
                format!(
                    "None of your {} headings are question-based. AI engines prioritize content that directly answers questions.",
                    headings.len()
                ),
                recommendation,
            ),
            n if n < self.min_questions => CheckOutcome::warning(
                format!(
                    "Only {}/{} headings are question-based.",
                    n,
                    headings.len()
                ),
                format!(
                    "Use at least {} question-based headings. Structure content around common user questions.",
                    self.min_questions
                ),
            )
            .with_examples(questions),
            n => CheckOutcome::pass(
                format!(
                    "{}/{} headings are question-based - good for AI engines.",
                    n,
                    headings.len()
                ),
                "Continue using question-based headings. Ensure they match real user search queries.",
            )
            .with_examples(questions),
        }
    }
}
