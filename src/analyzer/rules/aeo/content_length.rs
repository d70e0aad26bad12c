//! Focused page length for answer engines

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::AeoThresholds;
use crate::document::Document;
use crate::CheckKind;

/// Same word count as the SEO check, judged against AEO bands that
/// favor concise pages
pub struct ContentLengthRule {
    pass_min: usize,
    pass_max: usize,
    warn_min: usize,
    warn_max: usize,
}

impl ContentLengthRule {
    pub fn new(thresholds: &AeoThresholds) -> Self {
        Self {
            pass_min: thresholds.content_pass_min,
            pass_max: thresholds.content_pass_max,
            warn_min: thresholds.content_warn_min,
            warn_max: thresholds.content_warn_max,
        }
    }
}

impl Default for ContentLengthRule {
    fn default() -> Self {
        Self::new(&AeoThresholds::default())
    }
}

impl CheckRule for ContentLengthRule {
    fn kind(&self) -> CheckKind {
        CheckKind::ContentLength
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let words = document.word_count;
        let target = format!(
            "Keep the page focused at {}-{} words.",
            self.pass_min, self.pass_max
        );

        if (self.pass_min..=self.pass_max).contains(&words) {
            CheckOutcome::pass(
                format!(
                    "Content length ({} words) is focused enough for AI engines to extract answers.",
                    words
                ),
                "Length is in the sweet spot. Keep each section tight and on-topic.",
            )
        } else if words < self.pass_min && words >= self.warn_min {
            CheckOutcome::warning(
                format!(
                    "Content is a little thin ({} words) to fully answer the topic.",
                    words
                ),
                format!("Add supporting detail. {}", target),
            )
        } else if words > self.pass_max && words <= self.warn_max {
            CheckOutcome::warning(
                format!(
                    "Content is long ({} words); answers may be hard to isolate.",
                    words
                ),
                format!("Split secondary topics onto their own pages. {}", target),
            )
        } else if words < self.warn_min {
            CheckOutcome::fail(
                format!(
                    "Content is far too short ({} words) to answer questions.",
                    words
                ),
                format!("Expand the page with direct answers. {}", target),
            )
        } else {
            CheckOutcome::fail(
                format!(
                    "Content is far too long ({} words) for answer extraction.",
                    words
                ),
                format!("Break the page into focused pages. {}", target),
            )
        }
    }
}
