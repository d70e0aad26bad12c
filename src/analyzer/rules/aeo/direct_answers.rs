//! Direct answers under question headings
//!
//! Each question heading should be followed by a quotable answer of the
//! configured length. Pages without question headings fall back to their
//! FAQ pairs.

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::AeoThresholds;
use crate::document::{text, Document};
use crate::CheckKind;

pub struct DirectAnswersRule {
    min_words: usize,
    max_words: usize,
}

/// Why an answer was not considered direct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerProblem {
    Missing,
    TooShort(usize),
    TooLong(usize),
    OpensWithQuestion,
}

impl DirectAnswersRule {
    pub fn new(thresholds: &AeoThresholds) -> Self {
        Self {
            min_words: thresholds.answer_min_words,
            max_words: thresholds.answer_max_words,
        }
    }

    fn judge(&self, answer: Option<&str>) -> Option<AnswerProblem> {
        let Some(answer) = answer.map(str::trim).filter(|a| !a.is_empty()) else {
            return Some(AnswerProblem::Missing);
        };
        let words = text::word_count(answer);
        if words < self.min_words {
            return Some(AnswerProblem::TooShort(words));
        }
        if words > self.max_words {
            return Some(AnswerProblem::TooLong(words));
        }
        if text::first_sentence(answer).is_some_and(|s| s.ends_with('?')) {
            return Some(AnswerProblem::OpensWithQuestion);
        }
        None
    }

    fn describe(&self, question: &str, problem: AnswerProblem) -> String {
        let question = text::truncate(question, 60);
        match problem {
            AnswerProblem::Missing => format!("\"{}\": no answer paragraph follows", question),
            AnswerProblem::TooShort(n) => format!(
                "\"{}\": answer is {} words (under {})",
                question, n, self.min_words
            ),
            AnswerProblem::TooLong(n) => format!(
                "\"{}\": answer is {} words (over {})",
                question, n, self.max_words
            ),
            AnswerProblem::OpensWithQuestion => {
                format!("\"{}\": answer opens with another question", question)
            }
        }
    }
}

impl Default for DirectAnswersRule {
    fn default() -> Self {
        Self::new(&AeoThresholds::default())
    }
}

impl CheckRule for DirectAnswersRule {
    fn kind(&self) -> CheckKind {
        CheckKind::DirectAnswers
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation = format!(
            "Start each section with a direct answer of {}-{} words, then elaborate. Format: [Question heading] → [Direct answer] → [Details].",
            self.min_words, self.max_words
        );

        let paragraphs = document.paragraphs_or_empty();
        let pairs: Vec<(&str, Option<&str>)> = document
            .headings_or_empty()
            .iter()
            .filter(|h| text::is_question(&h.text))
            .map(|h| {
                let answer = h
                    .next_paragraph
                    .and_then(|i| paragraphs.get(i))
                    .map(String::as_str);
                (h.text.as_str(), answer)
            })
            .collect();

        let (source, pairs) = if !pairs.is_empty() {
            ("question headings", pairs)
        } else if !document.faq_pairs.is_empty() {
            (
                "FAQ answers",
                document
                    .faq_pairs
                    .iter()
                    .map(|f| (f.question.as_str(), Some(f.answer.as_str())))
                    .collect(),
            )
        } else {
            return CheckOutcome::fail(
                "No question headings or FAQ pairs found, so there are no direct answers for AI engines to quote.",
                recommendation,
            );
        };

        let problems: Vec<String> = pairs
            .iter()
            .filter_map(|(q, a)| self.judge(*a).map(|p| self.describe(q, p)))
            .collect();
        let total = pairs.len();
        let good = total - problems.len();

        if good == total {
            CheckOutcome::pass(
                format!(
                    "All {} {} are followed by direct, quotable answers.",
                    total, source
                ),
                "Good use of direct answers. Ensure every major section starts with a clear, quotable answer.",
            )
        } else if good > 0 {
            CheckOutcome::warning(
                format!(
                    "{} of {} {} have a direct answer of the right length.",
                    good, total, source
                ),
                recommendation,
            )
            .with_fraction(good as f64 / total as f64)
            .with_examples(problems)
        } else {
            CheckOutcome::fail(
                format!(
                    "None of the {} {} have a direct answer of the right length. Answers seem buried in paragraphs.",
                    total, source
                ),
                recommendation,
            )
            .with_examples(problems)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::Credit;
    use crate::document::{FaqPair, Heading};
    use crate::CheckStatus;

    fn words(n: usize) -> String {
        format!("{}.", vec!["compost"; n].join(" "))
    }

    #[test]
    fn test_all_direct_answers_pass() {
        let doc = Document {
            headings: Some(vec![
                Heading::new(1, "Composting"),
                Heading::new(2, "What is compost?").followed_by(0),
                Heading::new(2, "How long does it take?").followed_by(1),
            ]),
            paragraphs: Some(vec![words(60), words(45)]),
            ..Document::new("https://example.com")
        };
        let outcome = DirectAnswersRule::default().evaluate(&doc);
        assert_eq!(outcome.status, CheckStatus::Pass);
    }

    #[test]
    fn test_partial_answers_warn_with_ratio() {
        let doc = Document {
            headings: Some(vec![
                Heading::new(2, "What is compost?").followed_by(0),
                Heading::new(2, "Why compost?").followed_by(1),
                Heading::new(2, "Where to start?").followed_by(2),
                Heading::new(2, "Who should compost?"),
            ]),
            paragraphs: Some(vec![words(60), words(10), words(200)]),
            ..Document::new("https://example.com")
        };
        let outcome = DirectAnswersRule::default().evaluate(&doc);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.credit, Credit::Fraction(0.25));
        assert_eq!(outcome.examples.len(), 3);
        assert!(outcome.examples[0].contains("under 40"));
        assert!(outcome.examples[1].contains("over 80"));
        assert!(outcome.examples[2].contains("no answer paragraph"));
    }

    #[test]
    fn test_answer_opening_with_question_is_penalized() {
        let answer = format!("Wondering why? {}", words(50));
        let doc = Document {
            headings: Some(vec![Heading::new(2, "Why compost?").followed_by(0)]),
            paragraphs: Some(vec![answer]),
            ..Document::new("https://example.com")
        };
        let outcome = DirectAnswersRule::default().evaluate(&doc);
        assert_eq!(outcome.status, CheckStatus::Fail);
    }

    #[test]
    fn test_faq_fallback() {
        let doc = Document {
            headings: Some(vec![Heading::new(1, "Composting")]),
            faq_pairs: vec![FaqPair {
                question: "Is compost safe?".to_string(),
                answer: words(50),
            }],
            ..Document::new("https://example.com")
        };
        let outcome = DirectAnswersRule::default().evaluate(&doc);
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert!(outcome.explanation.contains("FAQ"));
    }

    #[test]
    fn test_nothing_to_answer_fails() {
        let outcome = DirectAnswersRule::default().evaluate(&Document::new("https://a.test"));
        assert_eq!(outcome.status, CheckStatus::Fail);
    }
}
