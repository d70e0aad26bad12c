//! Visible word count

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::SeoThresholds;
use crate::document::Document;
use crate::CheckKind;

pub struct WordCountRule {
    min_words: usize,
    ideal_words: usize,
}

impl WordCountRule {
    pub fn new(thresholds: &SeoThresholds) -> Self {
        Self {
            min_words: thresholds.min_words,
            ideal_words: thresholds.ideal_words,
        }
    }
}

impl Default for WordCountRule {
    fn default() -> Self {
        Self::new(&SeoThresholds::default())
    }
}

impl CheckRule for WordCountRule {
    fn kind(&self) -> CheckKind {
        CheckKind::WordCount
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let words = document.word_count;
        if words < self.min_words {
            CheckOutcome::fail(
                format!(
                    "Content is too short ({} words). Search engines prefer substantial content.",
                    words
                ),
                format!(
                    "Expand content to at least {} words. Aim for {}+ words for competitive topics.",
                    self.min_words, self.ideal_words
                ),
            )
        } else if words <= self.ideal_words {
            CheckOutcome::warning(
                format!(
                    "Content length ({} words) is adequate but could be more comprehensive.",
                    words
                ),
                format!(
                    "Consider expanding past {} words with more detailed information, examples, or use cases.",
                    self.ideal_words
                ),
            )
        } else {
            CheckOutcome::pass(
                format!(
                    "Content length ({} words) is substantial and comprehensive.",
                    words
                ),
                "Content length is good. Focus on maintaining quality and relevance throughout.",
            )
        }
    }
}
