//! Check rules for both engines
//!
//! Every check is an independent, pure rule over a [`Document`]. Rules never
//! know their weight; the aggregator converts an outcome's [`Credit`] into
//! points using the configured weight table.

pub mod aeo;
pub mod seo;

use crate::config::{AeoThresholds, SeoThresholds};
use crate::document::Document;
use crate::{CheckKind, CheckStatus};

/// Share of a check's weight that an outcome earns
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Credit {
    Full,
    None,
    /// Half the weight; the default for a warning
    Midpoint,
    /// A proportional share, kept strictly between 0 and 1 by the aggregator
    Fraction(f64),
}

/// What a rule observed, before weighting
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub credit: Credit,
    pub explanation: String,
    pub recommendation: String,
    pub examples: Vec<String>,
}

impl CheckOutcome {
    pub fn pass(explanation: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            credit: Credit::Full,
            explanation: explanation.into(),
            recommendation: recommendation.into(),
            examples: Vec::new(),
        }
    }

    pub fn warning(explanation: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            credit: Credit::Midpoint,
            explanation: explanation.into(),
            recommendation: recommendation.into(),
            examples: Vec::new(),
        }
    }

    pub fn fail(explanation: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            credit: Credit::None,
            explanation: explanation.into(),
            recommendation: recommendation.into(),
            examples: Vec::new(),
        }
    }

    /// The document never carried the signal this check needs
    pub fn missing(signal: &str, recommendation: impl Into<String>) -> Self {
        Self::fail(
            format!("No {} data was provided for this page.", signal),
            recommendation,
        )
    }

    /// Replace midpoint credit on a warning with a proportional share
    pub fn with_fraction(mut self, fraction: f64) -> Self {
        if self.status == CheckStatus::Warning {
            self.credit = Credit::Fraction(fraction);
        }
        self
    }

    /// Attach up to three illustrative snippets
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples
            .into_iter()
            .map(Into::into)
            .take(MAX_EXAMPLES)
            .collect();
        self
    }
}

pub const MAX_EXAMPLES: usize = 3;

/// Trait for check rules
pub trait CheckRule: Send + Sync {
    /// Which check this rule implements
    fn kind(&self) -> CheckKind;

    /// Evaluate the document; absent data is a fail, never a panic
    fn evaluate(&self, document: &Document) -> CheckOutcome;
}

/// The 13 SEO rules, in report order
pub fn seo_rules(thresholds: &SeoThresholds) -> Vec<Box<dyn CheckRule>> {
    vec![
        Box::new(seo::TitleRule::new(thresholds)),
        Box::new(seo::MetaDescriptionRule::new(thresholds)),
        Box::new(seo::HeadingsRule::new()),
        Box::new(seo::WordCountRule::new(thresholds)),
        Box::new(seo::InternalLinksRule::new(thresholds)),
        Box::new(seo::ReadabilityRule::new(thresholds)),
        Box::new(seo::MobileViewportRule::new()),
        Box::new(seo::CanonicalUrlRule::new()),
        Box::new(seo::HttpsRule::new()),
        Box::new(seo::XmlSitemapRule::new()),
        Box::new(seo::ImagesRule::new(thresholds)),
        Box::new(seo::OpenGraphRule::new(thresholds)),
        Box::new(seo::SchemaMarkupRule::new()),
    ]
}

/// The 6 AEO rules, in report order
pub fn aeo_rules(thresholds: &AeoThresholds) -> Vec<Box<dyn CheckRule>> {
    vec![
        Box::new(aeo::QuestionHeadingsRule::new(thresholds)),
        Box::new(aeo::DirectAnswersRule::new(thresholds)),
        Box::new(aeo::DefinitionClarityRule::new(thresholds)),
        Box::new(aeo::ContentLengthRule::new(thresholds)),
        Box::new(aeo::StructuredContentRule::new()),
        Box::new(aeo::FluffDetectionRule::new(thresholds)),
    ]
}

/// Proportional credit for a length outside `[min, max]`, clamped to `[floor, ceiling]`
pub(crate) fn length_credit(len: usize, min: usize, max: usize, floor: f64, ceiling: f64) -> f64 {
    let raw = if len < min {
        len as f64 / min as f64
    } else if len > max && len > 0 {
        max as f64 / len as f64
    } else {
        1.0
    };
    raw.clamp(floor, ceiling)
}
