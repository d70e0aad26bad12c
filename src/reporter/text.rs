//! Plain-text export, suitable for saving to a file or pasting into a ticket

use crate::analyzer::ScoreCalculator;
use crate::{AnalysisReport, CheckStatus, ScoreReport};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Reporter for uncolored text output
#[derive(Default)]
pub struct TextReporter;

impl TextReporter {
    pub fn new() -> Self {
        Self
    }

    fn status_icon(status: CheckStatus) -> &'static str {
        match status {
            CheckStatus::Pass => "✓",
            CheckStatus::Warning => "⚠",
            CheckStatus::Fail => "✗",
        }
    }

    fn section(out: &mut String, title: &str) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }

    fn checks(out: &mut String, score: &ScoreReport) {
        for check in &score.checks {
            let _ = writeln!(
                out,
                "{} {} ({}/{})",
                Self::status_icon(check.status),
                check.name,
                check.points_earned,
                check.points_possible
            );
            let _ = writeln!(out, "   {}", check.explanation);
            if check.needs_action() {
                let _ = writeln!(out, "   Fix: {}", check.recommendation);
            }
            for example in &check.examples {
                let _ = writeln!(out, "   e.g. {}", example);
            }
        }
    }

    /// Render the full text report
    pub fn report(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "PAGEGRADE REPORT: {}", report.url);
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

        Self::section(&mut out, "SCORES");
        for (label, score) in [("SEO", &report.seo), ("AEO", &report.aeo)] {
            let _ = writeln!(
                out,
                "{}: {}/100 (grade {}, {})",
                label,
                score.score,
                score.grade,
                ScoreCalculator::grade_description(score.grade)
            );
            let _ = writeln!(out, "   {}", score.explanation);
        }

        let top: Vec<_> = report
            .seo
            .top_issues
            .iter()
            .chain(report.aeo.top_issues.iter())
            .collect();
        if !top.is_empty() {
            Self::section(&mut out, "TOP REASONS FOR THESE SCORES");
            for issue in top {
                let _ = writeln!(out, "- {}: {}", issue.name, issue.reason);
            }
        }

        Self::section(&mut out, "SEO DETAILS");
        Self::checks(&mut out, &report.seo);
        Self::section(&mut out, "AEO DETAILS");
        Self::checks(&mut out, &report.aeo);

        if !report.keywords.is_empty() {
            Self::section(&mut out, "KEYWORDS");
            if let Some(ref focus) = report.keywords.primary_focus {
                let _ = writeln!(out, "Primary focus: {}", focus);
            }
            if !report.keywords.top_keywords.is_empty() {
                let _ = writeln!(out, "Top: {}", report.keywords.top_keywords.join(", "));
            }
            if !report.keywords.suggested_keywords.is_empty() {
                let _ = writeln!(
                    out,
                    "Suggested: {}",
                    report.keywords.suggested_keywords.join(", ")
                );
            }
        }

        Self::section(&mut out, "ACTION CHECKLIST");
        if report.action_checklist.is_empty() {
            let _ = writeln!(out, "Nothing to fix. Every check passed.");
        }
        for (i, line) in report.action_checklist.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, line);
        }

        if let Some(ref example) = report.before_after_example {
            Self::section(&mut out, "BEFORE / AFTER");
            let _ = writeln!(out, "Before: {}", example.before);
            let _ = writeln!(out, "After:  {}", example.after);
            let _ = writeln!(out, "Why:    {}", example.explanation);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Heading};
    use crate::Analyzer;

    #[test]
    fn test_sections_in_order() {
        let doc = Document {
            title: Some("Worm composting for small apartments".to_string()),
            headings: Some(vec![Heading::new(1, "Worm composting")]),
            paragraphs: Some(vec!["Worm composting turns scraps into castings.".to_string()]),
            word_count: 320,
            ..Document::new("http://example.com/worms")
        };
        let report = Analyzer::default().analyze(&doc).unwrap();
        let text = TextReporter::new().report(&report);

        let order = [
            "PAGEGRADE REPORT: http://example.com/worms",
            "SCORES",
            "TOP REASONS FOR THESE SCORES",
            "SEO DETAILS",
            "AEO DETAILS",
            "ACTION CHECKLIST",
        ];
        let positions: Vec<usize> = order.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("✗ HTTPS (0/10)"));
        assert!(text.contains("1. [critical]"));
        assert!(!text.contains("BEFORE / AFTER"));
    }
}
