//! Image alt-text coverage and lazy-loading of heavy images

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::config::SeoThresholds;
use crate::document::Document;
use crate::CheckKind;

pub struct ImagesRule {
    fail_below: f64,
    pass_at: f64,
    large_bytes: u64,
}

impl ImagesRule {
    pub fn new(thresholds: &SeoThresholds) -> Self {
        Self {
            fail_below: thresholds.alt_fail_below,
            pass_at: thresholds.alt_pass_at,
            large_bytes: thresholds.large_image_bytes,
        }
    }
}

impl Default for ImagesRule {
    fn default() -> Self {
        Self::new(&SeoThresholds::default())
    }
}

impl CheckRule for ImagesRule {
    fn kind(&self) -> CheckKind {
        CheckKind::Images
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let Some(images) = document.images.as_deref() else {
            return CheckOutcome::missing(
                "image",
                "Add descriptive alt text to every image and lazy-load large images.",
            );
        };

        if images.is_empty() {
            return CheckOutcome::warning(
                "No images detected on the page.",
                "Consider adding relevant images with descriptive alt text to enhance engagement.",
            );
        }

        let total = images.len();
        let with_alt = images.iter().filter(|i| i.has_alt).count();
        let missing_alt = total - with_alt;
        let coverage = with_alt as f64 / total as f64;

        let heavy_eager = images
            .iter()
            .filter(|i| !i.lazy_loaded && i.size_bytes.is_some_and(|b| b > self.large_bytes))
            .count();
        let lazy_note = if heavy_eager > 0 {
            format!(
                " {} image(s) over {}KB are not lazy-loaded.",
                heavy_eager,
                self.large_bytes / 1024
            )
        } else {
            String::new()
        };
        let lazy_fix = if heavy_eager > 0 {
            " Add loading=\"lazy\" to large images below the fold."
        } else {
            ""
        };

        if coverage < self.fail_below {
            CheckOutcome::fail(
                format!(
                    "{} of {} images are missing alt text ({:.0}% coverage).{}",
                    missing_alt,
                    total,
                    coverage * 100.0,
                    lazy_note
                ),
                format!(
                    "Add alt text to all images. Use descriptive text that explains the image content.{}",
                    lazy_fix
                ),
            )
        } else if coverage < self.pass_at {
            CheckOutcome::warning(
                format!(
                    "{} of {} images are missing alt text ({:.0}% coverage).{}",
                    missing_alt,
                    total,
                    coverage * 100.0,
                    lazy_note
                ),
                format!(
                    "Add descriptive alt text to all images for accessibility and SEO.{}",
                    lazy_fix
                ),
            )
            .with_fraction(coverage)
        } else {
            CheckOutcome::pass(
                format!(
                    "{} of {} images have alt text.{}",
                    with_alt, total, lazy_note
                ),
                format!(
                    "Continue adding descriptive alt text to all images.{}",
                    lazy_fix
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::Credit;
    use crate::document::ImageInfo;
    use crate::CheckStatus;

    fn image(has_alt: bool) -> ImageInfo {
        ImageInfo {
            has_alt,
            size_bytes: Some(20_000),
            lazy_loaded: false,
        }
    }

    fn with_images(images: Vec<ImageInfo>) -> Document {
        Document {
            images: Some(images),
            ..Document::new("https://example.com")
        }
    }

    #[test]
    fn test_coverage_bands() {
        let rule = ImagesRule::default();
        let fail = with_images(vec![image(true), image(false), image(false)]);
        assert_eq!(rule.evaluate(&fail).status, CheckStatus::Fail);

        let warn = with_images(vec![image(true), image(true), image(true), image(false)]);
        let outcome = rule.evaluate(&warn);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.credit, Credit::Fraction(0.75));

        let mut all = vec![image(true); 9];
        all.push(image(false));
        assert_eq!(rule.evaluate(&with_images(all)).status, CheckStatus::Pass);
    }

    #[test]
    fn test_half_coverage_is_warning() {
        let doc = with_images(vec![image(true), image(false)]);
        assert_eq!(ImagesRule::default().evaluate(&doc).status, CheckStatus::Warning);
    }

    #[test]
    fn test_empty_and_missing() {
        let rule = ImagesRule::default();
        assert_eq!(rule.evaluate(&with_images(vec![])).status, CheckStatus::Warning);
        assert_eq!(
            rule.evaluate(&Document::new("https://example.com")).status,
            CheckStatus::Fail
        );
    }

    #[test]
    fn test_heavy_images_flagged_without_affecting_status() {
        let heavy = ImageInfo {
            has_alt: true,
            size_bytes: Some(500_000),
            lazy_loaded: false,
        };
        let lazy_heavy = ImageInfo {
            lazy_loaded: true,
            ..heavy.clone()
        };
        let outcome = ImagesRule::default().evaluate(&with_images(vec![heavy, lazy_heavy]));
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert!(outcome.explanation.contains("1 image(s) over 100KB"));
    }
}
