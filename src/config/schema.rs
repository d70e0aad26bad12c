//! Config schema, defaults, and validation

use super::ConfigError;
use crate::{CheckKind, Engine, Grade};
use serde::{Deserialize, Serialize};

/// Root config structure for .pagegraderc.json
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Extend another config file (path relative to this config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum SEO and AEO score for the CLI (exit 1 if either is below)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    pub seo: SeoConfig,
    pub aeo: AeoConfig,
    pub grading: GradeBoundaries,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoConfig {
    pub weights: SeoWeights,
    pub thresholds: SeoThresholds,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AeoConfig {
    pub weights: AeoWeights,
    pub thresholds: AeoThresholds,
}

/// SEO point budget per check; must sum to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoWeights {
    pub title: u32,
    pub meta_description: u32,
    pub headings: u32,
    pub word_count: u32,
    pub internal_links: u32,
    pub readability: u32,
    pub mobile_viewport: u32,
    pub canonical_url: u32,
    pub https: u32,
    pub xml_sitemap: u32,
    pub images: u32,
    pub open_graph: u32,
    pub schema_markup: u32,
}

impl Default for SeoWeights {
    fn default() -> Self {
        Self {
            title: 10,
            meta_description: 8,
            headings: 8,
            word_count: 6,
            internal_links: 6,
            readability: 8,
            mobile_viewport: 8,
            canonical_url: 6,
            https: 10,
            xml_sitemap: 8,
            images: 8,
            open_graph: 7,
            schema_markup: 7,
        }
    }
}

impl SeoWeights {
    /// Weight for an SEO check, `None` for AEO checks
    pub fn get(&self, kind: CheckKind) -> Option<u32> {
        let weight = match kind {
            CheckKind::Title => self.title,
            CheckKind::MetaDescription => self.meta_description,
            CheckKind::Headings => self.headings,
            CheckKind::WordCount => self.word_count,
            CheckKind::InternalLinks => self.internal_links,
            CheckKind::Readability => self.readability,
            CheckKind::MobileViewport => self.mobile_viewport,
            CheckKind::CanonicalUrl => self.canonical_url,
            CheckKind::Https => self.https,
            CheckKind::XmlSitemap => self.xml_sitemap,
            CheckKind::Images => self.images,
            CheckKind::OpenGraph => self.open_graph,
            CheckKind::SchemaMarkup => self.schema_markup,
            _ => return None,
        };
        Some(weight)
    }

    pub fn total(&self) -> u64 {
        CheckKind::SEO
            .iter()
            .filter_map(|k| self.get(*k))
            .map(u64::from)
            .sum()
    }
}

/// AEO point budget per check; must sum to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AeoWeights {
    pub question_headings: u32,
    pub direct_answers: u32,
    pub definition_clarity: u32,
    pub content_length: u32,
    pub structured_content: u32,
    pub fluff_detection: u32,
}

impl Default for AeoWeights {
    fn default() -> Self {
        Self {
            question_headings: 20,
            direct_answers: 25,
            definition_clarity: 15,
            content_length: 15,
            structured_content: 15,
            fluff_detection: 10,
        }
    }
}

impl AeoWeights {
    /// Weight for an AEO check, `None` for SEO checks
    pub fn get(&self, kind: CheckKind) -> Option<u32> {
        let weight = match kind {
            CheckKind::QuestionHeadings => self.question_headings,
            CheckKind::DirectAnswers => self.direct_answers,
            CheckKind::DefinitionClarity => self.definition_clarity,
            CheckKind::ContentLength => self.content_length,
            CheckKind::StructuredContent => self.structured_content,
            CheckKind::FluffDetection => self.fluff_detection,
            _ => return None,
        };
        Some(weight)
    }

    pub fn total(&self) -> u64 {
        CheckKind::AEO
            .iter()
            .filter_map(|k| self.get(*k))
            .map(u64::from)
            .sum()
    }
}

/// SEO status bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoThresholds {
    pub title_min_length: usize,
    pub title_max_length: usize,
    pub meta_min_length: usize,
    pub meta_max_length: usize,
    /// Below this many words the page fails
    pub min_words: usize,
    /// Above this many words the page passes
    pub ideal_words: usize,
    pub internal_links_min: usize,
    /// Average words per sentence above which readability warns
    pub sentence_warn_words: f64,
    /// Average words per sentence above which readability fails
    pub sentence_fail_words: f64,
    /// Average words per paragraph above which readability warns
    pub paragraph_warn_words: f64,
    /// Alt-text coverage below this fails (0-1)
    pub alt_fail_below: f64,
    /// Alt-text coverage at or above this passes (0-1)
    pub alt_pass_at: f64,
    /// Images larger than this should be lazy-loaded
    pub large_image_bytes: u64,
    /// Open Graph tags needed for a warning
    pub open_graph_warn_at: usize,
    /// Open Graph tags needed to pass
    pub open_graph_pass_at: usize,
    /// Clamp for proportional partial credit on length checks
    pub partial_credit_floor: f64,
    pub partial_credit_ceiling: f64,
}

impl Default for SeoThresholds {
    fn default() -> Self {
        Self {
            title_min_length: 30,
            title_max_length: 60,
            meta_min_length: 120,
            meta_max_length: 160,
            min_words: 300,
            ideal_words: 500,
            internal_links_min: 3,
            sentence_warn_words: 20.0,
            sentence_fail_words: 25.0,
            paragraph_warn_words: 100.0,
            alt_fail_below: 0.5,
            alt_pass_at: 0.9,
            large_image_bytes: 100 * 1024,
            open_graph_warn_at: 2,
            open_graph_pass_at: 4,
            partial_credit_floor: 0.25,
            partial_credit_ceiling: 0.9,
        }
    }
}

/// AEO status bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AeoThresholds {
    /// Question headings needed to pass; at least one but fewer warns
    pub question_headings_min: usize,
    pub answer_min_words: usize,
    pub answer_max_words: usize,
    /// The copular pattern must start within this many words
    pub definition_window_words: usize,
    pub content_pass_min: usize,
    pub content_pass_max: usize,
    pub content_warn_min: usize,
    pub content_warn_max: usize,
    /// Fluff phrases per 100 words above which the check fails
    pub fluff_fail_density: f64,
    pub fluff_phrases: Vec<String>,
}

impl Default for AeoThresholds {
    fn default() -> Self {
        Self {
            question_headings_min: 2,
            answer_min_words: 40,
            answer_max_words: 80,
            definition_window_words: 15,
            content_pass_min: 300,
            content_pass_max: 1500,
            content_warn_min: 150,
            content_warn_max: 3000,
            fluff_fail_density: 1.0,
            fluff_phrases: [
                "in today's world",
                "it goes without saying",
                "needless to say",
                "at the end of the day",
                "dive deep",
                "let's explore",
                "without further ado",
                "when it comes to",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Minimum score for each letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeBoundaries {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
}

impl Default for GradeBoundaries {
    fn default() -> Self {
        Self {
            a: 90,
            b: 80,
            c: 70,
            d: 60,
        }
    }
}

impl GradeBoundaries {
    pub fn grade_for(&self, score: u8) -> Grade {
        match score {
            s if s >= self.a => Grade::A,
            s if s >= self.b => Grade::B,
            s if s >= self.c => Grade::C,
            s if s >= self.d => Grade::D,
            _ => Grade::F,
        }
    }
}

impl EngineConfig {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        self
    }

    /// Weight of any check in its engine's table
    pub fn weight(&self, kind: CheckKind) -> u32 {
        match kind.engine() {
            Engine::Seo => self.seo.weights.get(kind).unwrap_or(0),
            Engine::Aeo => self.aeo.weights.get(kind).unwrap_or(0),
        }
    }

    /// Reject configurations the engine must never run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_weights("seo", &CheckKind::SEO, |k| self.seo.weights.get(k))?;
        check_weights("aeo", &CheckKind::AEO, |k| self.aeo.weights.get(k))?;
        self.seo.thresholds.validate()?;
        self.aeo.thresholds.validate()?;

        let g = &self.grading;
        if !(g.a <= 100 && g.a > g.b && g.b > g.c && g.c > g.d && g.d >= 1) {
            return Err(ConfigError::GradeBoundaries(format!(
                "expected 100 >= A > B > C > D >= 1, got A={} B={} C={} D={}",
                g.a, g.b, g.c, g.d
            )));
        }

        if let Some(threshold) = self.threshold {
            if threshold > 100 {
                return Err(threshold_error("threshold", "must be at most 100"));
            }
        }

        Ok(())
    }
}

fn check_weights(
    table: &'static str,
    kinds: &[CheckKind],
    get: impl Fn(CheckKind) -> Option<u32>,
) -> Result<(), ConfigError> {
    let mut sum: u64 = 0;
    for &kind in kinds {
        let weight = get(kind).unwrap_or(0);
        if weight == 0 {
            return Err(ConfigError::ZeroWeight { table, check: kind });
        }
        sum += u64::from(weight);
    }
    if sum != 100 {
        return Err(ConfigError::WeightSum { table, sum });
    }
    Ok(())
}

fn threshold_error(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Threshold {
        field,
        reason: reason.into(),
    }
}

fn ratio_in_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(threshold_error(field, format!("{} is not within 0..=1", value)));
    }
    Ok(())
}

impl SeoThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.title_min_length == 0 || self.title_min_length > self.title_max_length {
            return Err(threshold_error(
                "seo.thresholds.titleMinLength",
                "must be positive and not exceed titleMaxLength",
            ));
        }
        if self.meta_min_length == 0 || self.meta_min_length > self.meta_max_length {
            return Err(threshold_error(
                "seo.thresholds.metaMinLength",
                "must be positive and not exceed metaMaxLength",
            ));
        }
        if self.min_words > self.ideal_words {
            return Err(threshold_error(
                "seo.thresholds.minWords",
                "must not exceed idealWords",
            ));
        }
        if self.internal_links_min < 2 {
            return Err(threshold_error(
                "seo.thresholds.internalLinksMin",
                "must be at least 2 so a warning band exists",
            ));
        }
        if !(self.sentence_warn_words > 0.0 && self.sentence_warn_words <= self.sentence_fail_words)
        {
            return Err(threshold_error(
                "seo.thresholds.sentenceWarnWords",
                "must be positive and not exceed sentenceFailWords",
            ));
        }
        if self.paragraph_warn_words <= 0.0 {
            return Err(threshold_error(
                "seo.thresholds.paragraphWarnWords",
                "must be positive",
            ));
        }
        ratio_in_unit("seo.thresholds.altFailBelow", self.alt_fail_below)?;
        ratio_in_unit("seo.thresholds.altPassAt", self.alt_pass_at)?;
        if self.alt_fail_below > self.alt_pass_at {
            return Err(threshold_error(
                "seo.thresholds.altFailBelow",
                "must not exceed altPassAt",
            ));
        }
        if self.open_graph_warn_at == 0
            || self.open_graph_warn_at > self.open_graph_pass_at
            || self.open_graph_pass_at > crate::document::OPEN_GRAPH_TAGS.len()
        {
            return Err(threshold_error(
                "seo.thresholds.openGraphWarnAt",
                "expected 1 <= openGraphWarnAt <= openGraphPassAt <= 4",
            ));
        }
        if !(self.partial_credit_floor > 0.0
            && self.partial_credit_floor <= self.partial_credit_ceiling
            && self.partial_credit_ceiling < 1.0)
        {
            return Err(threshold_error(
                "seo.thresholds.partialCreditFloor",
                "expected 0 < floor <= ceiling < 1",
            ));
        }
        Ok(())
    }
}

impl AeoThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.question_headings_min < 2 {
            return Err(threshold_error(
                "aeo.thresholds.questionHeadingsMin",
                "must be at least 2 so a warning band exists",
            ));
        }
        if self.answer_min_words == 0 || self.answer_min_words > self.answer_max_words {
            return Err(threshold_error(
                "aeo.thresholds.answerMinWords",
                "must be positive and not exceed answerMaxWords",
            ));
        }
        if self.definition_window_words == 0 {
            return Err(threshold_error(
                "aeo.thresholds.definitionWindowWords",
                "must be positive",
            ));
        }
        if !(self.content_warn_min <= self.content_pass_min
            && self.content_pass_min <= self.content_pass_max
            && self.content_pass_max <= self.content_warn_max)
        {
            return Err(threshold_error(
                "aeo.thresholds.contentPassMin",
                "expected contentWarnMin <= contentPassMin <= contentPassMax <= contentWarnMax",
            ));
        }
        if self.fluff_fail_density <= 0.0 {
            return Err(threshold_error(
                "aeo.thresholds.fluffFailDensity",
                "must be positive",
            ));
        }
        if self.fluff_phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(threshold_error(
                "aeo.thresholds.fluffPhrases",
                "must not contain empty phrases",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seo.weights.total(), 100);
        assert_eq!(config.aeo.weights.total(), 100);
    }

    #[test]
    fn test_weight_lookup() {
        let config = EngineConfig::default();
        assert_eq!(config.weight(CheckKind::Https), 10);
        assert_eq!(config.weight(CheckKind::DirectAnswers), 25);
        assert_eq!(config.seo.weights.get(CheckKind::DirectAnswers), None);
    }

    #[test]
    fn test_weight_sum_rejected() {
        let mut config = EngineConfig::default();
        config.seo.weights.title = 20;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightSum { table: "seo", sum: 110 })
        ));
    }

    #[test]
    fn test_oversized_weights_do_not_wrap() {
        let mut config = EngineConfig::default();
        config.seo.weights = SeoWeights {
            title: u32::MAX,
            meta_description: 90,
            headings: 1,
            word_count: 1,
            internal_links: 1,
            readability: 1,
            mobile_viewport: 1,
            canonical_url: 1,
            https: 1,
            xml_sitemap: 1,
            images: 1,
            open_graph: 1,
            schema_markup: 1,
        };
        let expected = u64::from(u32::MAX) + 101;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightSum { table: "seo", sum }) if sum == expected
        ));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut config = EngineConfig::default();
        config.aeo.weights.fluff_detection = 0;
        config.aeo.weights.direct_answers = 35;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroWeight {
                table: "aeo",
                check: CheckKind::FluffDetection
            })
        ));
    }

    #[test]
    fn test_grade_boundaries_must_descend() {
        let mut config = EngineConfig::default();
        config.grading.b = 90;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GradeBoundaries(_))
        ));
    }

    #[test]
    fn test_inverted_bands_rejected() {
        let mut config = EngineConfig::default();
        config.seo.thresholds.title_min_length = 80;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Threshold { .. })
        ));

        let mut config = EngineConfig::default();
        config.aeo.thresholds.content_warn_max = 1000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Threshold { .. })
        ));
    }

    #[test]
    fn test_custom_grade_boundaries() {
        let g = GradeBoundaries {
            a: 95,
            b: 85,
            c: 75,
            d: 65,
        };
        assert_eq!(g.grade_for(94), Grade::B);
        assert_eq!(g.grade_for(95), Grade::A);
        assert_eq!(g.grade_for(64), Grade::F);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "seo": { "thresholds": { "titleMinLength": 20 } } }"#)
                .unwrap();
        assert_eq!(config.seo.thresholds.title_min_length, 20);
        assert_eq!(config.seo.thresholds.title_max_length, 60);
        assert_eq!(config.seo.weights, SeoWeights::default());
    }

    #[test]
    fn test_merge_with_cli() {
        let config = EngineConfig {
            threshold: Some(60),
            ..EngineConfig::default()
        };
        assert_eq!(config.clone().merge_with_cli(Some(80)).threshold, Some(80));
        assert_eq!(config.merge_with_cli(None).threshold, Some(60));
    }
}
