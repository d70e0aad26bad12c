//! Open Graph tags for social sharing

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::SeoThresholds;
use crate::document::{Document, OPEN_GRAPH_TAGS};
use crate::CheckKind;

pub struct OpenGraphRule {
    warn_at: usize,
    pass_at: usize,
}

impl OpenGraphRule {
    pub fn new(thresholds: &SeoThresholds) -> Self {
        Self {
            warn_at: thresholds.open_graph_warn_at,
            pass_at: thresholds.open_graph_pass_at,
        }
    }
}

impl Default for OpenGraphRule {
    fn default() -> Self {
        Self::new(&SeoThresholds::default())
    }
}

impl CheckRule for OpenGraphRule {
    fn kind(&self) -> CheckKind {
        CheckKind::OpenGraph
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation = format!(
            "Add Open Graph meta tags ({}) to control how your page appears when shared on social media.",
            OPEN_GRAPH_TAGS.join(", ")
        );
        let Some(tags) = document.open_graph.as_ref() else {
            return CheckOutcome::missing("Open Graph", recommendation);
        };

        let (present, missing): (Vec<&str>, Vec<&str>) = OPEN_GRAPH_TAGS
            .iter()
            .partition(|tag| tags.get(**tag).copied().unwrap_or(false));
        let count = present.len();

        if count >= self.pass_at {
            CheckOutcome::pass(
                format!(
                    "{} of {} Open Graph tags are configured for social sharing.",
                    count,
                    OPEN_GRAPH_TAGS.len()
                ),
                "Ensure the og:image is at least 1200x630px for best display on social platforms.",
            )
        } else if count >= self.warn_at {
            CheckOutcome::warning(
                format!(
                    "Some Open Graph tags present but incomplete ({} of {}).",
                    count,
                    OPEN_GRAPH_TAGS.len()
                ),
                format!("Add the missing tags: {}.", missing.join(", ")),
            )
            .with_examples(missing)
        } else {
            CheckOutcome::fail(
                format!(
                    "Only {} of {} Open Graph tags found.",
                    count,
                    OPEN_GRAPH_TAGS.len()
                ),
                recommendation,
            )
            .with_examples(missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckStatus;
    use std::collections::BTreeMap;

    fn with_tags(tags: &[(&str, bool)]) -> Document {
        Document {
            open_graph: Some(
                tags.iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..Document::new("https://example.com")
        }
    }

    #[test]
    fn test_counts() {
        let rule = OpenGraphRule::default();
        assert_eq!(rule.evaluate(&with_tags(&[])).status, CheckStatus::Fail);
        assert_eq!(
            rule.evaluate(&with_tags(&[("og:title", true)])).status,
            CheckStatus::Fail
        );
        let partial = rule.evaluate(&with_tags(&[
            ("og:title", true),
            ("og:description", true),
            ("og:image", false),
        ]));
        assert_eq!(partial.status, CheckStatus::Warning);
        assert_eq!(partial.examples, vec!["og:image", "og:url"]);
        assert_eq!(
            rule.evaluate(&with_tags(&[
                ("og:title", true),
                ("og:description", true),
                ("og:image", true),
                ("og:url", true),
            ]))
            .status,
            CheckStatus::Pass
        );
    }

    #[test]
    fn test_unscored_tags_ignored() {
        let outcome = OpenGraphRule::default().evaluate(&with_tags(&[
            ("og:type", true),
            ("og:site_name", true),
            ("og:locale", true),
        ]));
        assert_eq!(outcome.status, CheckStatus::Fail);
    }
}
