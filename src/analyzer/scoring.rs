//! Score calculation for both engines

use super::rules::{CheckOutcome, Credit};
use crate::config::GradeBoundaries;
use crate::document::text;
use crate::{
    CheckKind, CheckResult, CheckStatus, CheckSummary, Engine, Grade, ScoreReport, TopIssue,
};
use std::cmp::Ordering;

/// Number of checks singled out in `top_issues`
pub const TOP_ISSUE_COUNT: usize = 3;

/// Bounds for proportional credit so a warning never earns zero or full points
const MIN_PARTIAL: f64 = 0.01;
const MAX_PARTIAL: f64 = 0.99;

/// Calculator for engine scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Share of the weight an outcome earns (0.0-1.0)
    pub fn credit_ratio(credit: Credit) -> f64 {
        match credit {
            Credit::Full => 1.0,
            Credit::None => 0.0,
            Credit::Midpoint => 0.5,
            Credit::Fraction(f) if f.is_nan() => 0.5,
            Credit::Fraction(f) => f.clamp(MIN_PARTIAL, MAX_PARTIAL),
        }
    }

    /// Points for an outcome, rounded to two decimals
    pub fn points(credit: Credit, weight: f64) -> f64 {
        let earned = (weight * Self::credit_ratio(credit) * 100.0).round() / 100.0;
        earned.clamp(0.0, weight)
    }

    /// Turn a rule outcome into a weighted check result
    pub fn check_result(kind: CheckKind, outcome: CheckOutcome, weight: u32) -> CheckResult {
        let points_possible = f64::from(weight);
        CheckResult {
            id: kind,
            name: kind.display_name().to_string(),
            status: outcome.status,
            explanation: outcome.explanation,
            recommendation: outcome.recommendation,
            points_earned: Self::points(outcome.credit, points_possible),
            points_possible,
            examples: outcome.examples,
        }
    }

    /// `round(100 * earned / possible)`, clamped to 0-100
    pub fn score(checks: &[CheckResult]) -> u8 {
        let possible: f64 = checks.iter().map(|c| c.points_possible).sum();
        if possible <= 0.0 {
            return 0;
        }
        let earned: f64 = checks.iter().map(|c| c.points_earned).sum();
        (100.0 * earned / possible).round().clamp(0.0, 100.0) as u8
    }

    /// Aggregate one engine's checks into a score report
    pub fn aggregate(
        engine: Engine,
        checks: Vec<CheckResult>,
        grading: &GradeBoundaries,
    ) -> ScoreReport {
        let score = Self::score(&checks);
        let grade = grading.grade_for(score);
        tracing::debug!(%engine, score, %grade, "aggregated checks");
        ScoreReport {
            score,
            grade,
            explanation: Self::band_explanation(engine, grade).to_string(),
            top_issues: Self::top_issues(&checks, TOP_ISSUE_COUNT),
            summary: Self::summary(&checks),
            checks,
        }
    }

    /// Severity order shared by top issues and recommendations:
    /// lowest credit ratio first, ties broken by heavier weight
    pub fn severity_order(a: &CheckResult, b: &CheckResult) -> Ordering {
        a.credit_ratio()
            .partial_cmp(&b.credit_ratio())
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.points_possible
                    .partial_cmp(&a.points_possible)
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// The lowest-scoring failing or warning checks, most severe first
    pub fn top_issues(checks: &[CheckResult], limit: usize) -> Vec<TopIssue> {
        let mut failing: Vec<&CheckResult> = checks.iter().filter(|c| c.needs_action()).collect();
        failing.sort_by(|a, b| Self::severity_order(a, b));
        failing
            .into_iter()
            .take(limit)
            .map(|c| TopIssue {
                name: c.name.clone(),
                reason: text::first_sentence(&c.explanation)
                    .unwrap_or(&c.explanation)
                    .to_string(),
            })
            .collect()
    }

    pub fn summary(checks: &[CheckResult]) -> CheckSummary {
        let count = |status| checks.iter().filter(|c| c.status == status).count();
        CheckSummary {
            total: checks.len(),
            passed: count(CheckStatus::Pass),
            warnings: count(CheckStatus::Warning),
            failed: count(CheckStatus::Fail),
        }
    }

    /// Score-band explanation; deterministic text, never generated
    pub fn band_explanation(engine: Engine, grade: Grade) -> &'static str {
        match (engine, grade) {
            (Engine::Seo, Grade::A) => "Excellent SEO fundamentals. Your page follows best practices and is well-optimized for search engines.",
            (Engine::Seo, Grade::B) => "Good SEO foundation with minor areas for improvement. Address warnings to reach excellent status.",
            (Engine::Seo, Grade::C) => "Decent SEO but several important optimizations are missing. Focus on failed checks first.",
            (Engine::Seo, Grade::D) => "Basic SEO structure exists but needs significant improvement. Multiple critical issues need attention.",
            (Engine::Seo, Grade::F) => "Poor SEO foundation. Major elements are missing or incorrect. Immediate action needed on failed checks.",
            (Engine::Aeo, Grade::A) => "Excellent answer-readiness. AI engines will easily extract and use your content for answers.",
            (Engine::Aeo, Grade::B) => "Good AEO structure. Minor improvements will make content even more AI-friendly.",
            (Engine::Aeo, Grade::C) => "Moderate answer optimization. Content exists but isn't optimally formatted for AI extraction.",
            (Engine::Aeo, Grade::D) => "Weak AEO. Content may be found but likely won't be used by AI engines due to format issues.",
            (Engine::Aeo, Grade::F) => "Poor answer optimization. AI engines will likely skip this content in favor of better-structured alternatives.",
        }
    }

    /// Get grade description
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent",
            Grade::B => "Good",
            Grade::C => "Fair",
            Grade::D => "Poor",
            Grade::F => "Failing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(kind: CheckKind, status: CheckStatus, earned: f64, possible: f64) -> CheckResult {
        CheckResult {
            id: kind,
            name: kind.display_name().to_string(),
            status,
            explanation: format!("{} observed. More detail follows.", kind),
            recommendation: String::new(),
            points_earned: earned,
            points_possible: possible,
            examples: vec![],
        }
    }

    #[test]
    fn test_points_by_credit() {
        assert_eq!(ScoreCalculator::points(Credit::Full, 8.0), 8.0);
        assert_eq!(ScoreCalculator::points(Credit::None, 8.0), 0.0);
        assert_eq!(ScoreCalculator::points(Credit::Midpoint, 8.0), 4.0);
        assert_eq!(ScoreCalculator::points(Credit::Fraction(0.333), 10.0), 3.33);
    }

    #[test]
    fn test_fraction_stays_strictly_partial() {
        let low = ScoreCalculator::points(Credit::Fraction(0.0), 6.0);
        let high = ScoreCalculator::points(Credit::Fraction(1.0), 6.0);
        assert!(low > 0.0);
        assert!(high < 6.0);
        assert_eq!(ScoreCalculator::points(Credit::Fraction(f64::NAN), 6.0), 3.0);
    }

    #[test]
    fn test_score_rounds() {
        let checks = vec![
            check(CheckKind::Title, CheckStatus::Pass, 10.0, 10.0),
            check(CheckKind::MetaDescription, CheckStatus::Warning, 4.0, 8.0),
            check(CheckKind::Https, CheckStatus::Fail, 0.0, 10.0),
        ];
        // 14 / 28 = 50%
        assert_eq!(ScoreCalculator::score(&checks), 50);
        assert_eq!(ScoreCalculator::score(&[]), 0);
    }

    #[test]
    fn test_top_issues_order() {
        let checks = vec![
            check(CheckKind::Title, CheckStatus::Fail, 0.0, 10.0),
            check(CheckKind::CanonicalUrl, CheckStatus::Fail, 0.0, 6.0),
            check(CheckKind::Https, CheckStatus::Pass, 10.0, 10.0),
            check(CheckKind::Images, CheckStatus::Warning, 6.0, 8.0),
            check(CheckKind::OpenGraph, CheckStatus::Warning, 3.0, 6.0),
        ];
        let top = ScoreCalculator::top_issues(&checks, 3);
        let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Page Title", "Canonical URL", "Social Media (Open Graph)"]);
        assert_eq!(top[0].reason, "title observed.");
    }

    #[test]
    fn test_top_issues_skip_passing() {
        let checks = vec![check(CheckKind::Title, CheckStatus::Pass, 10.0, 10.0)];
        assert!(ScoreCalculator::top_issues(&checks, 3).is_empty());
    }

    #[test]
    fn test_aggregate() {
        let checks = vec![
            check(CheckKind::QuestionHeadings, CheckStatus::Pass, 20.0, 20.0),
            check(CheckKind::DirectAnswers, CheckStatus::Fail, 0.0, 80.0),
        ];
        let report = ScoreCalculator::aggregate(Engine::Aeo, checks, &GradeBoundaries::default());
        assert_eq!(report.score, 20);
        assert_eq!(report.grade, Grade::F);
        assert!(report.explanation.starts_with("Poor answer optimization"));
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.top_issues.len(), 1);
    }
}
