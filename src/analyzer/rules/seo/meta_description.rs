//! Meta description presence and length

use crate::analyzer::rules::{length_credit, CheckOutcome, CheckRule};
use crate::config::SeoThresholds;
use crate::document::Document;
use crate::CheckKind;

/// Rule for `<meta name="description">`
pub struct MetaDescriptionRule {
    min: usize,
    max: usize,
    floor: f64,
    ceiling: f64,
}

impl MetaDescriptionRule {
    pub fn new(thresholds: &SeoThresholds) -> Self {
        Self {
            min: thresholds.meta_min_length,
            max: thresholds.meta_max_length,
            floor: thresholds.partial_credit_floor,
            ceiling: thresholds.partial_credit_ceiling,
        }
    }
}

impl Default for MetaDescriptionRule {
    fn default() -> Self {
        Self::new(&SeoThresholds::default())
    }
}

impl CheckRule for MetaDescriptionRule {
    fn kind(&self) -> CheckKind {
        CheckKind::MetaDescription
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let Some(meta) = document.meta_description_text() else {
            return CheckOutcome::fail(
                "No meta description found.",
                format!(
                    "Add a compelling meta description between {}-{} characters that summarizes the page and encourages clicks.",
                    self.min, self.max
                ),
            );
        };

        let length = meta.chars().count();
        let credit = length_credit(length, self.min, self.max, self.floor, self.ceiling);

        if length < self.min {
            CheckOutcome::warning(
                format!("Meta description is too short ({} characters).", length),
                format!(
                    "Expand to at least {} characters to maximize search snippet space.",
                    self.min
                ),
            )
            .with_fraction(credit)
        } else if length > self.max {
            CheckOutcome::warning(
                format!(
                    "Meta description is too long ({} characters) and will be cut off.",
                    length
                ),
                format!(
                    "Trim to {} characters, placing key information at the beginning.",
                    self.max
                ),
            )
            .with_fraction(credit)
        } else {
            CheckOutcome::pass(
                format!("Meta description length is optimal ({} characters).", length),
                "Meta description length is good. Ensure it's compelling and includes a call-to-action.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::Credit;
    use crate::CheckStatus;

    fn with_meta(meta: Option<String>) -> Document {
        Document {
            meta_description: meta,
            ..Document::new("https://example.com")
        }
    }

    #[test]
    fn test_missing_meta_fails() {
        let outcome = MetaDescriptionRule::default().evaluate(&with_meta(None));
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert_eq!(outcome.explanation, "No meta description found.");
    }

    #[test]
    fn test_meta_in_band_passes() {
        let outcome = MetaDescriptionRule::default().evaluate(&with_meta(Some("m".repeat(140))));
        assert_eq!(outcome.status, CheckStatus::Pass);
    }

    #[test]
    fn test_long_meta_credit_is_proportional() {
        // 160 / 320 = 0.5
        let outcome = MetaDescriptionRule::default().evaluate(&with_meta(Some("m".repeat(320))));
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.credit, Credit::Fraction(0.5));
    }

    #[test]
    fn test_nearly_right_meta_capped_below_full() {
        let outcome = MetaDescriptionRule::default().evaluate(&with_meta(Some("m".repeat(119))));
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.credit, Credit::Fraction(0.9));
    }
}
