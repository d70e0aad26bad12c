//! Report composition: recommendations, action checklist, and the
//! before/after example

use super::rules::aeo::fluff_hits;
use super::ScoreCalculator;
use crate::document::{text, Document};
use crate::rewrite::{ContentRewriter, RewriteRequest};
use crate::{
    BeforeAfterExample, CheckKind, CheckResult, CheckStatus, Engine, Priority, Recommendation,
    ScoreReport,
};
use std::cmp::Ordering;

/// Penalty per fluff hit when picking the "before" paragraph
const FLUFF_PENALTY: f64 = 20.0;

/// Builds the derived parts of an analysis report
pub struct ReportComposer<'a> {
    fluff_phrases: &'a [String],
    rewriter: Option<&'a dyn ContentRewriter>,
}

impl<'a> ReportComposer<'a> {
    pub fn new(fluff_phrases: &'a [String]) -> Self {
        Self {
            fluff_phrases,
            rewriter: None,
        }
    }

    pub fn with_rewriter(mut self, rewriter: Option<&'a dyn ContentRewriter>) -> Self {
        self.rewriter = rewriter;
        self
    }

    fn priority(check: &CheckResult) -> Priority {
        match check.status {
            CheckStatus::Fail => Priority::High,
            CheckStatus::Warning if check.credit_ratio() < 0.5 => Priority::High,
            _ => Priority::Medium,
        }
    }

    /// Every failing or warning check from both engines, most urgent first
    pub fn recommendations(seo: &ScoreReport, aeo: &ScoreReport) -> Vec<Recommendation> {
        let mut flagged: Vec<(Engine, &CheckResult)> = seo
            .checks
            .iter()
            .map(|c| (Engine::Seo, c))
            .chain(aeo.checks.iter().map(|c| (Engine::Aeo, c)))
            .filter(|(_, c)| c.needs_action())
            .collect();

        flagged.sort_by(|(_, a), (_, b)| {
            Self::priority(a)
                .cmp(&Self::priority(b))
                .then_with(|| ScoreCalculator::severity_order(a, b))
        });

        flagged
            .into_iter()
            .map(|(engine, check)| Recommendation {
                engine,
                id: check.id,
                status: check.status,
                priority: Self::priority(check),
                name: check.name.clone(),
                issue: check.explanation.clone(),
                fix: check.recommendation.clone(),
                credit_ratio: check.credit_ratio(),
                weight: check.points_possible,
            })
            .collect()
    }

    /// One line per failing or warning check; the fail group comes first
    pub fn action_checklist(recommendations: &[Recommendation]) -> Vec<String> {
        let render = |status: CheckStatus, tag: &'static str| {
            recommendations
                .iter()
                .filter(move |r| r.status == status)
                .map(move |r| format!("[{}] {} / {}: {}", tag, r.engine, r.name, r.fix))
        };
        render(CheckStatus::Fail, "critical")
            .chain(render(CheckStatus::Warning, "improve"))
            .collect()
    }

    /// The paragraph with the worst combined fluff and sentence-length signal.
    ///
    /// Ties go to the earliest paragraph. Blank paragraphs are never picked.
    pub fn select_before_paragraph(&self, document: &Document) -> Option<String> {
        let mut worst: Option<(f64, &str)> = None;
        for paragraph in document.paragraphs_or_empty() {
            let trimmed = paragraph.trim();
            if trimmed.is_empty() {
                continue;
            }
            let fluff = fluff_hits(trimmed, self.fluff_phrases).len() as f64;
            let sentence_len = text::average_sentence_length([trimmed]).unwrap_or(0.0);
            let penalty = fluff * FLUFF_PENALTY + sentence_len;
            let replace = match worst {
                Some((best, _)) => penalty.partial_cmp(&best) == Some(Ordering::Greater),
                None => true,
            };
            if replace {
                worst = Some((penalty, trimmed));
            }
        }
        worst.map(|(_, paragraph)| paragraph.to_string())
    }

    /// Ask the rewriter for an improved version of the worst paragraph.
    ///
    /// Returns `None` when no rewriter is set, there is nothing to rewrite, or
    /// the rewriter fails; none of these affect scoring.
    pub fn before_after(
        &self,
        document: &Document,
        recommendations: &[Recommendation],
    ) -> Option<BeforeAfterExample> {
        let rewriter = self.rewriter?;
        let before = self.select_before_paragraph(document)?;

        // Prefer a content-level issue the rewrite can actually address
        let target = recommendations
            .iter()
            .find(|r| {
                matches!(
                    r.id,
                    CheckKind::FluffDetection
                        | CheckKind::Readability
                        | CheckKind::DirectAnswers
                        | CheckKind::DefinitionClarity
                )
            })
            .or_else(|| recommendations.first());

        let request = RewriteRequest {
            original: before.clone(),
            issue_name: target
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "Clarity".to_string()),
            fix: target.map(|r| r.fix.clone()).unwrap_or_else(|| {
                "Make the paragraph more direct and concise.".to_string()
            }),
        };

        match rewriter.rewrite(&request) {
            Ok(rewrite) => Some(BeforeAfterExample {
                before,
                after: rewrite.improved_text,
                explanation: rewrite.explanation,
                issue_fixed: target.map(|r| r.name.clone()),
            }),
            Err(err) => {
                tracing::warn!(error = %err, "rewrite collaborator failed; omitting example");
                None
            }
        }
    }
}
