//! Internal linking

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::SeoThresholds;
use crate::document::Document;
use crate::CheckKind;

pub struct InternalLinksRule {
    min_links: usize,
}

impl InternalLinksRule {
    pub fn new(thresholds: &SeoThresholds) -> Self {
        Self {
            min_links: thresholds.internal_links_min,
        }
    }
}

impl Default for InternalLinksRule {
    fn default() -> Self {
        Self::new(&SeoThresholds::default())
    }
}

impl CheckRule for InternalLinksRule {
    fn kind(&self) -> CheckKind {
        CheckKind::InternalLinks
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation = format!(
            "Add at least {} relevant internal links to related pages or resources on your site.",
            self.min_links
        );
        let Some(links) = document.links else {
            return CheckOutcome::missing("link", recommendation);
        };

        match links.internal_count {
            0 => CheckOutcome::fail(
                "No internal links found. Internal linking helps SEO and user navigation.",
                recommendation,
            ),
            n if n < self.min_links => CheckOutcome::warning(
                format!(
                    "Only {} internal link(s) found. Internal linking helps SEO and user navigation.",
                    n
                ),
                recommendation,
            ),
            n => CheckOutcome::pass(
                format!(
                    "Good internal linking ({} links) helps distribute page authority.",
                    n
                ),
                "Internal linking is solid. Ensure anchor text is descriptive and links are contextually relevant.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LinkCounts;
    use crate::CheckStatus;

    fn status(internal: usize) -> CheckStatus {
        let doc = Document {
            links: Some(LinkCounts {
                internal_count: internal,
                external_count: 4,
            }),
            ..Document::new("https://example.com")
        };
        InternalLinksRule::default().evaluate(&doc).status
    }

    #[test]
    fn test_bands() {
        assert_eq!(status(0), CheckStatus::Fail);
        assert_eq!(status(1), CheckStatus::Warning);
        assert_eq!(status(2), CheckStatus::Warning);
        assert_eq!(status(3), CheckStatus::Pass);
    }

    #[test]
    fn test_missing_links_fail() {
        let outcome = InternalLinksRule::default().evaluate(&Document::new("https://example.com"));
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert!(outcome.explanation.contains("link"));
    }
}
