//! Page title presence and length

use crate::analyzer::rules::{length_credit, CheckOutcome, CheckRule};
use crate::config::SeoThresholds;
use crate::document::Document;
use crate::CheckKind;

/// Rule for the `<title>` tag
pub struct TitleRule {
    min: usize,
    max: usize,
    floor: f64,
    ceiling: f64,
}

impl TitleRule {
    pub fn new(thresholds: &SeoThresholds) -> Self {
        Self {
            min: thresholds.title_min_length,
            max: thresholds.title_max_length,
            floor: thresholds.partial_credit_floor,
            ceiling: thresholds.partial_credit_ceiling,
        }
    }
}

impl Default for TitleRule {
    fn default() -> Self {
        Self::new(&SeoThresholds::default())
    }
}

impl CheckRule for TitleRule {
    fn kind(&self) -> CheckKind {
        CheckKind::Title
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let Some(title) = document.title_text() else {
            return CheckOutcome::fail(
                "No title tag found on the page.",
                format!(
                    "Add a descriptive title tag between {}-{} characters that includes your target keyword.",
                    self.min, self.max
                ),
            );
        };

        let length = title.chars().count();
        let credit = length_credit(length, self.min, self.max, self.floor, self.ceiling);

        if length < self.min {
            CheckOutcome::warning(
                format!(
                    "Title is too short ({} characters). Search engines may not find it descriptive enough.",
                    length
                ),
                format!(
                    "Expand title to at least {} characters while keeping it under {}.",
                    self.min, self.max
                ),
            )
            .with_fraction(credit)
            .with_examples([title])
        } else if length > self.max {
            CheckOutcome::warning(
                format!(
                    "Title is too long ({} characters). It will be truncated in search results.",
                    length
                ),
                format!(
                    "Shorten title to {} characters or less while keeping the most important keywords at the start.",
                    self.max
                ),
            )
            .with_fraction(credit)
            .with_examples([title])
        } else {
            CheckOutcome::pass(
                format!("Title length is optimal ({} characters).", length),
                "Title length is good. Ensure it accurately describes the page content and includes target keywords.",
            )
        }
    }
}
