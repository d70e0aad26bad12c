//! Pagegrade: deterministic SEO and answer-engine scoring
//!
//! This library scores a pre-parsed web page (a [`Document`]) with two
//! independent rule engines, one for classic search signals and one for
//! answer-readiness, and composes the results into a single report with
//! keyword analysis and a prioritized action checklist.

pub mod analyzer;
pub mod config;
pub mod document;
pub mod reporter;
pub mod rewrite;

pub use analyzer::{AnalyzeError, Analyzer, ComparisonEntry};
pub use config::{ConfigError, EngineConfig};
pub use document::Document;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete, transport-agnostic result of analyzing one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// URL of the analyzed page
    pub url: String,
    /// Traditional search score
    pub seo: ScoreReport,
    /// Answer-engine score
    pub aeo: ScoreReport,
    /// Keyword candidates and placement facts
    pub keywords: KeywordReport,
    /// Every failing or warning check, as prioritized structured entries
    pub recommendations: Vec<Recommendation>,
    /// Every failing or warning check rendered as one line, fails first
    pub action_checklist: Vec<String>,
    /// Rewrite example; absent when no rewrite collaborator produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_after_example: Option<BeforeAfterExample>,
}

/// Which rule engine produced a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Engine {
    Seo,
    Aeo,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Engine::Seo => write!(f, "SEO"),
            Engine::Aeo => write!(f, "AEO"),
        }
    }
}

/// Every check either engine can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    Title,
    MetaDescription,
    Headings,
    WordCount,
    InternalLinks,
    Readability,
    MobileViewport,
    CanonicalUrl,
    Https,
    XmlSitemap,
    Images,
    OpenGraph,
    SchemaMarkup,
    QuestionHeadings,
    DirectAnswers,
    DefinitionClarity,
    ContentLength,
    StructuredContent,
    FluffDetection,
}

impl CheckKind {
    /// SEO checks in report order
    pub const SEO: [CheckKind; 13] = [
        CheckKind::Title,
        CheckKind::MetaDescription,
        CheckKind::Headings,
        CheckKind::WordCount,
        CheckKind::InternalLinks,
        CheckKind::Readability,
        CheckKind::MobileViewport,
        CheckKind::CanonicalUrl,
        CheckKind::Https,
        CheckKind::XmlSitemap,
        CheckKind::Images,
        CheckKind::OpenGraph,
        CheckKind::SchemaMarkup,
    ];

    /// AEO checks in report order
    pub const AEO: [CheckKind; 6] = [
        CheckKind::QuestionHeadings,
        CheckKind::DirectAnswers,
        CheckKind::DefinitionClarity,
        CheckKind::ContentLength,
        CheckKind::StructuredContent,
        CheckKind::FluffDetection,
    ];

    pub fn engine(self) -> Engine {
        if Self::SEO.contains(&self) {
            Engine::Seo
        } else {
            Engine::Aeo
        }
    }

    /// Human-readable check name used in reports
    pub fn display_name(self) -> &'static str {
        match self {
            CheckKind::Title => "Page Title",
            CheckKind::MetaDescription => "Meta Description",
            CheckKind::Headings => "Heading Structure",
            CheckKind::WordCount => "Word Count",
            CheckKind::InternalLinks => "Internal Links",
            CheckKind::Readability => "Readability",
            CheckKind::MobileViewport => "Mobile Viewport",
            CheckKind::CanonicalUrl => "Canonical URL",
            CheckKind::Https => "HTTPS",
            CheckKind::XmlSitemap => "XML Sitemap",
            CheckKind::Images => "Image Optimization",
            CheckKind::OpenGraph => "Social Media (Open Graph)",
            CheckKind::SchemaMarkup => "Structured Data (Schema)",
            CheckKind::QuestionHeadings => "Question-Style Headings",
            CheckKind::DirectAnswers => "Direct Answers",
            CheckKind::DefinitionClarity => "Definition Clarity",
            CheckKind::ContentLength => "Content Length",
            CheckKind::StructuredContent => "Structured Content",
            CheckKind::FluffDetection => "Fluff Detection",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            CheckKind::Title => "title",
            CheckKind::MetaDescription => "meta-description",
            CheckKind::Headings => "headings",
            CheckKind::WordCount => "word-count",
            CheckKind::InternalLinks => "internal-links",
            CheckKind::Readability => "readability",
            CheckKind::MobileViewport => "mobile-viewport",
            CheckKind::CanonicalUrl => "canonical-url",
            CheckKind::Https => "https",
            CheckKind::XmlSitemap => "xml-sitemap",
            CheckKind::Images => "images",
            CheckKind::OpenGraph => "open-graph",
            CheckKind::SchemaMarkup => "schema-markup",
            CheckKind::QuestionHeadings => "question-headings",
            CheckKind::DirectAnswers => "direct-answers",
            CheckKind::DefinitionClarity => "definition-clarity",
            CheckKind::ContentLength => "content-length",
            CheckKind::StructuredContent => "structured-content",
            CheckKind::FluffDetection => "fluff-detection",
        };
        write!(f, "{}", id)
    }
}

/// Outcome tier of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Fail,
    Warning,
    Pass,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Warning => write!(f, "warning"),
            CheckStatus::Fail => write!(f, "fail"),
        }
    }
}

/// One evaluated rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Stable identifier
    pub id: CheckKind,
    /// Display name
    pub name: String,
    pub status: CheckStatus,
    /// What was observed
    pub explanation: String,
    /// What to do about it
    pub recommendation: String,
    /// Points awarded, always within `0..=points_possible`
    pub points_earned: f64,
    /// Weight of this check in its engine's table
    pub points_possible: f64,
    /// Offending or illustrative snippets (at most 3)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl CheckResult {
    /// Fraction of the available points earned (0.0-1.0)
    pub fn credit_ratio(&self) -> f64 {
        if self.points_possible <= 0.0 {
            return 0.0;
        }
        self.points_earned / self.points_possible
    }

    pub fn needs_action(&self) -> bool {
        self.status != CheckStatus::Pass
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Map a score to a grade with the default boundaries (90/80/70/60)
    pub fn from_score(score: u8) -> Self {
        config::GradeBoundaries::default().grade_for(score)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Status counts for one engine's checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub total: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
}

/// A check singled out as one of the biggest problems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopIssue {
    pub name: String,
    pub reason: String,
}

/// Aggregated score for one engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Numeric score (0-100)
    pub score: u8,
    /// Letter grade (A-F)
    pub grade: Grade,
    /// Band description, never AI-generated
    pub explanation: String,
    pub checks: Vec<CheckResult>,
    /// Lowest-credit failing/warning checks, most severe first
    pub top_issues: Vec<TopIssue>,
    pub summary: CheckSummary,
}

/// Where a keyword shows up on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordPlacement {
    pub in_title: bool,
    pub in_h1: bool,
    pub in_first_paragraph: bool,
}

/// Frequency-ranked keyword candidates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordReport {
    /// At most 10 keywords, each seen at least twice
    pub top_keywords: Vec<String>,
    pub primary_focus: Option<String>,
    pub keyword_placement: BTreeMap<String, KeywordPlacement>,
    /// Medium-frequency candidates (at most 5)
    pub suggested_keywords: Vec<String>,
}

impl KeywordReport {
    pub fn is_empty(&self) -> bool {
        self.top_keywords.is_empty()
            && self.primary_focus.is_none()
            && self.keyword_placement.is_empty()
            && self.suggested_keywords.is_empty()
    }
}

/// Recommendation urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
        }
    }
}

/// A failing or warning check, ready to act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub engine: Engine,
    pub id: CheckKind,
    pub status: CheckStatus,
    pub priority: Priority,
    pub name: String,
    pub issue: String,
    pub fix: String,
    pub credit_ratio: f64,
    pub weight: f64,
}

/// A representative paragraph and its improved rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeforeAfterExample {
    pub before: String,
    pub after: String,
    pub explanation: String,
    /// Check the rewrite targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_fixed: Option<String>,
}

/// Analyze one document with the default configuration and no rewrite collaborator.
pub fn analyze(document: &Document) -> Result<AnalysisReport, AnalyzeError> {
    Analyzer::default().analyze(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_kind_partition() {
        assert_eq!(CheckKind::SEO.len() + CheckKind::AEO.len(), 19);
        for kind in CheckKind::SEO {
            assert_eq!(kind.engine(), Engine::Seo);
        }
        for kind in CheckKind::AEO {
            assert_eq!(kind.engine(), Engine::Aeo);
        }
    }

    #[test]
    fn test_check_kind_display_matches_serde() {
        for kind in CheckKind::SEO.iter().chain(CheckKind::AEO.iter()) {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_status_ordering() {
        assert!(CheckStatus::Fail < CheckStatus::Warning);
        assert!(CheckStatus::Warning < CheckStatus::Pass);
    }

    #[test]
    fn test_credit_ratio_zero_weight() {
        let check = CheckResult {
            id: CheckKind::Title,
            name: "Page Title".to_string(),
            status: CheckStatus::Fail,
            explanation: String::new(),
            recommendation: String::new(),
            points_earned: 0.0,
            points_possible: 0.0,
            examples: vec![],
        };
        assert_eq!(check.credit_ratio(), 0.0);
    }

    #[test]
    fn test_grade_from_score_defaults() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(80), Grade::B);
        assert_eq!(Grade::from_score(79), Grade::C);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(69), Grade::D);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }
}
