//! Analysis engine - runs both rule sets and composes the report

use super::rules::{aeo_rules, seo_rules, CheckRule};
use super::{KeywordExtractor, ReportComposer, ScoreCalculator};
use crate::config::{ConfigError, EngineConfig};
use crate::document::Document;
use crate::rewrite::ContentRewriter;
use crate::{AnalysisReport, CheckResult, Engine, ScoreReport};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Caller misuse: the document cannot be analyzed at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("document has no content to analyze")]
    EmptyDocument,
    #[error("document has no URL")]
    MissingUrl,
    #[error("heading {index} has level {level}; expected 1-6")]
    InvalidHeadingLevel { index: usize, level: u8 },
}

/// Main analysis engine that owns the configured rules
pub struct Analyzer {
    config: EngineConfig,
    seo_rules: Vec<Box<dyn CheckRule>>,
    aeo_rules: Vec<Box<dyn CheckRule>>,
    rewriter: Option<Box<dyn ContentRewriter>>,
}

impl Analyzer {
    /// Build an analyzer from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            seo_rules: seo_rules(&config.seo.thresholds),
            aeo_rules: aeo_rules(&config.aeo.thresholds),
            config,
            rewriter: None,
        })
    }

    /// Attach a rewrite collaborator for the before/after example
    pub fn with_rewriter(mut self, rewriter: Box<dyn ContentRewriter>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_input(document: &Document) -> Result<(), AnalyzeError> {
        if document.is_blank() {
            return Err(AnalyzeError::EmptyDocument);
        }
        if document.url.trim().is_empty() {
            return Err(AnalyzeError::MissingUrl);
        }
        if let Some((index, heading)) = document
            .headings_or_empty()
            .iter()
            .enumerate()
            .find(|(_, h)| !(1..=6).contains(&h.level))
        {
            return Err(AnalyzeError::InvalidHeadingLevel {
                index,
                level: heading.level,
            });
        }
        Ok(())
    }

    fn run_engine(
        &self,
        engine: Engine,
        rules: &[Box<dyn CheckRule>],
        document: &Document,
    ) -> ScoreReport {
        let checks: Vec<CheckResult> = rules
            .iter()
            .map(|rule| {
                let kind = rule.kind();
                let outcome = rule.evaluate(document);
                tracing::debug!(check = %kind, status = %outcome.status, "evaluated check");
                ScoreCalculator::check_result(kind, outcome, self.config.weight(kind))
            })
            .collect();
        ScoreCalculator::aggregate(engine, checks, &self.config.grading)
    }

    /// Analyze one document.
    ///
    /// Deterministic for a given document and configuration, apart from the
    /// optional rewrite text.
    pub fn analyze(&self, document: &Document) -> Result<AnalysisReport, AnalyzeError> {
        Self::check_input(document)?;

        let seo = self.run_engine(Engine::Seo, &self.seo_rules, document);
        let aeo = self.run_engine(Engine::Aeo, &self.aeo_rules, document);
        let keywords = KeywordExtractor::extract(document);

        let recommendations = ReportComposer::recommendations(&seo, &aeo);
        let action_checklist = ReportComposer::action_checklist(&recommendations);
        let before_after_example =
            ReportComposer::new(&self.config.aeo.thresholds.fluff_phrases)
                .with_rewriter(self.rewriter.as_deref())
                .before_after(document, &recommendations);

        Ok(AnalysisReport {
            url: document.url.clone(),
            seo,
            aeo,
            keywords,
            recommendations,
            action_checklist,
            before_after_example,
        })
    }

    /// Analyze several documents in parallel.
    ///
    /// Entries come back in input order, each labelled with its source URL.
    pub fn compare(&self, documents: &[Document]) -> Vec<ComparisonEntry> {
        tracing::info!(pages = documents.len(), "comparing pages");
        documents
            .par_iter()
            .map(|document| ComparisonEntry {
                url: document.url.clone(),
                outcome: self.analyze(document).map_err(|e| e.to_string()),
            })
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        let config = EngineConfig::default();
        debug_assert!(
            config.validate().is_ok(),
            "default configuration must pass validation"
        );
        Self {
            seo_rules: seo_rules(&config.seo.thresholds),
            aeo_rules: aeo_rules(&config.aeo.thresholds),
            config,
            rewriter: None,
        }
    }
}

/// One page's result in a comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub url: String,
    pub outcome: Result<AnalysisReport, String>,
}

impl ComparisonEntry {
    /// Combined SEO + AEO score, when the page was analyzed
    pub fn combined_score(&self) -> Option<u16> {
        self.outcome
            .as_ref()
            .ok()
            .map(|r| u16::from(r.seo.score) + u16::from(r.aeo.score))
    }
}

/// A ranked comparison row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: usize,
    pub url: String,
    pub seo: u8,
    pub aeo: u8,
    pub combined: u16,
}

/// Rank analyzed pages by combined score, highest first.
///
/// Failed entries are left out; equal scores keep input order.
pub fn leaderboard(entries: &[ComparisonEntry]) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = entries
        .iter()
        .filter_map(|entry| {
            let combined = entry.combined_score()?;
            let report = entry.outcome.as_ref().ok()?;
            Some(LeaderboardRow {
                rank: 0,
                url: entry.url.clone(),
                seo: report.seo.score,
                aeo: report.aeo.score,
                combined,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.combined.cmp(&a.combined));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Heading;
    use crate::rewrite::{Rewrite, RewriteError, RewriteRequest};
    use crate::CheckKind;

    fn page(url: &str) -> Document {
        Document {
            title: Some("Composting at home for beginners guide".to_string()),
            headings: Some(vec![Heading::new(1, "Composting at home")]),
            paragraphs: Some(vec![
                "Composting is the process of turning food scraps into soil.".to_string(),
            ]),
            word_count: 400,
            ..Document::new(url)
        }
    }

    #[test]
    fn test_runs_every_check_in_order() {
        let report = Analyzer::default().analyze(&page("https://a.test")).unwrap();
        let seo: Vec<CheckKind> = report.seo.checks.iter().map(|c| c.id).collect();
        let aeo: Vec<CheckKind> = report.aeo.checks.iter().map(|c| c.id).collect();
        assert_eq!(seo, CheckKind::SEO.to_vec());
        assert_eq!(aeo, CheckKind::AEO.to_vec());
        assert_eq!(report.url, "https://a.test");
        assert!(report.before_after_example.is_none());
    }

    #[test]
    fn test_rejects_misuse() {
        let analyzer = Analyzer::default();
        assert_eq!(
            analyzer.analyze(&Document::default()),
            Err(AnalyzeError::EmptyDocument)
        );
        assert_eq!(analyzer.analyze(&page("  ")), Err(AnalyzeError::MissingUrl));

        let mut bad = page("https://a.test");
        bad.headings = Some(vec![Heading::new(1, "Title"), Heading::new(7, "Deep")]);
        assert_eq!(
            analyzer.analyze(&bad),
            Err(AnalyzeError::InvalidHeadingLevel { index: 1, level: 7 })
        );
    }

    #[test]
    fn test_default_matches_validated_construction() {
        assert!(EngineConfig::default().validate().is_ok());
        let validated = Analyzer::new(EngineConfig::default()).unwrap();
        let doc = page("https://a.test");
        assert_eq!(
            Analyzer::default().analyze(&doc).unwrap(),
            validated.analyze(&doc).unwrap()
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.seo.weights.title = 11;
        assert!(Analyzer::new(config).is_err());
    }

    struct Echo;

    impl ContentRewriter for Echo {
        fn rewrite(&self, request: &RewriteRequest) -> Result<Rewrite, RewriteError> {
            Ok(Rewrite {
                improved_text: request.original.to_uppercase(),
                explanation: "Shouted.".to_string(),
            })
        }
    }

    #[test]
    fn test_rewriter_does_not_change_scores() {
        let doc = page("https://a.test");
        let plain = Analyzer::default().analyze(&doc).unwrap();
        let with_rewrite = Analyzer::default()
            .with_rewriter(Box::new(Echo))
            .analyze(&doc)
            .unwrap();
        assert_eq!(plain.seo, with_rewrite.seo);
        assert_eq!(plain.aeo, with_rewrite.aeo);
        let example = with_rewrite.before_after_example.unwrap();
        assert_eq!(example.after, example.before.to_uppercase());
    }

    #[test]
    fn test_compare_keeps_input_order() {
        let mut broken = page("https://two.test");
        broken.headings = Some(vec![Heading::new(0, "Nothing")]);
        let docs = vec![page("https://one.test"), broken, page("http://three.test")];
        let entries = Analyzer::default().compare(&docs);
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["https://one.test", "https://two.test", "http://three.test"]);
        assert!(entries[1].outcome.is_err());

        let board = leaderboard(&entries);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].url, "https://one.test");
        assert_eq!(board[0].rank, 1);
        assert!(board[0].combined > board[1].combined);
    }
}
