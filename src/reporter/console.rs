//! Console reporter with colored output

use crate::analyzer::{leaderboard, ComparisonEntry, ScoreCalculator};
use crate::{AnalysisReport, CheckResult, CheckStatus, Grade, Priority, ScoreReport};
use colored::Colorize;
use std::fmt::Write;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output (every check, not only the ones needing action)
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Print a single analysis
    pub fn report(&self, report: &AnalysisReport) {
        print!("{}", self.render(report));
    }

    /// Print just the scores
    pub fn report_quiet(&self, report: &AnalysisReport) {
        println!("{}", self.render_quiet(report));
    }

    /// Print a comparison table
    pub fn report_comparison(&self, entries: &[ComparisonEntry]) {
        print!("{}", self.render_comparison(entries));
    }

    pub fn render_quiet(&self, report: &AnalysisReport) -> String {
        format!(
            "{}: SEO {} ({}) | AEO {} ({})",
            report.url,
            report.seo.score,
            self.colorize_grade(report.seo.grade),
            report.aeo.score,
            self.colorize_grade(report.aeo.grade)
        )
    }

    pub fn render(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            self.paint(format!("📊 Page Analysis: {}", report.url).bold())
        );
        let _ = writeln!(out);

        self.render_engine(&mut out, "SEO", &report.seo);
        self.render_engine(&mut out, "AEO", &report.aeo);
        self.render_keywords(&mut out, report);
        self.render_checklist(&mut out, report);

        if let Some(ref example) = report.before_after_example {
            let _ = writeln!(out, "   {}", self.paint("Before / After:".bold()));
            let _ = writeln!(out, "   {} {}", self.paint("-".red()), example.before);
            let _ = writeln!(out, "   {} {}", self.paint("+".green()), example.after);
            let _ = writeln!(out, "     {}", self.paint(example.explanation.dimmed()));
            let _ = writeln!(out);
        }
        out
    }

    fn render_engine(&self, out: &mut String, label: &str, score: &ScoreReport) {
        let grade = self.colorize_grade(score.grade);
        let _ = writeln!(
            out,
            "   {} {} {} {}",
            self.paint(format!("{}:", label).bold()),
            self.create_score_bar(score.score),
            grade,
            self.paint(ScoreCalculator::grade_description(score.grade).dimmed())
        );
        let _ = writeln!(out, "   {}", self.paint(score.explanation.dimmed()));
        let _ = writeln!(
            out,
            "   {} passed, {} warnings, {} failed",
            score.summary.passed, score.summary.warnings, score.summary.failed
        );

        for check in &score.checks {
            if self.verbose || check.needs_action() {
                self.render_check(out, check);
            }
        }
        let _ = writeln!(out);
    }

    fn render_check(&self, out: &mut String, check: &CheckResult) {
        let icon = match check.status {
            CheckStatus::Pass => self.paint("✓".green()),
            CheckStatus::Warning => self.paint("⚠".yellow()),
            CheckStatus::Fail => self.paint("✗".red()),
        };
        let _ = writeln!(
            out,
            "   {} {} {} {}",
            icon,
            self.create_mini_bar(check.points_earned, check.points_possible),
            check.name,
            self.paint(format!("[{}]", check.id).dimmed())
        );
        let _ = writeln!(out, "       {}", check.explanation);
        if check.needs_action() {
            let _ = writeln!(
                out,
                "       {} {}",
                self.paint("→".dimmed()),
                self.paint(check.recommendation.italic())
            );
        }
        if self.verbose {
            for example in &check.examples {
                let _ = writeln!(out, "       {} {}", self.paint("↳".dimmed()), example);
            }
        }
    }

    fn render_keywords(&self, out: &mut String, report: &AnalysisReport) {
        let keywords = &report.keywords;
        if keywords.is_empty() {
            return;
        }
        let _ = writeln!(out, "   {}", self.paint("Keywords:".bold()));
        if let Some(ref focus) = keywords.primary_focus {
            let _ = writeln!(out, "   Primary focus: {}", self.paint(focus.cyan()));
        }
        for keyword in &keywords.top_keywords {
            let placement = keywords
                .keyword_placement
                .get(keyword)
                .copied()
                .unwrap_or_default();
            let mark = |hit: bool| if hit { "✓" } else { "·" };
            let _ = writeln!(
                out,
                "   {:<20} title {}  h1 {}  intro {}",
                keyword,
                mark(placement.in_title),
                mark(placement.in_h1),
                mark(placement.in_first_paragraph)
            );
        }
        if !keywords.suggested_keywords.is_empty() {
            let _ = writeln!(
                out,
                "   Also consider: {}",
                keywords.suggested_keywords.join(", ")
            );
        }
        let _ = writeln!(out);
    }

    fn render_checklist(&self, out: &mut String, report: &AnalysisReport) {
        if report.recommendations.is_empty() {
            let _ = writeln!(out, "   {}", self.paint("Every check passed.".green()));
            let _ = writeln!(out);
            return;
        }
        let _ = writeln!(out, "   {}", self.paint("Action Checklist:".bold()));
        for (line, priority) in report
            .action_checklist
            .iter()
            .zip(ordered_by_status(report))
        {
            let bullet = match priority {
                Priority::High => self.paint("→".red()),
                Priority::Medium => self.paint("→".cyan()),
            };
            let _ = writeln!(out, "   {} {}", bullet, line);
        }
        let _ = writeln!(out);
    }

    pub fn render_comparison(&self, entries: &[ComparisonEntry]) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.paint("Comparison".bold()));
        let _ = writeln!(out, "{}", "═".repeat(72));
        let _ = writeln!(
            out,
            "   {:<4} {:<40} {:>5} {:>5} {:>8}",
            "#", "URL", "SEO", "AEO", "Combined"
        );
        for row in leaderboard(entries) {
            let _ = writeln!(
                out,
                "   {:<4} {:<40} {:>5} {:>5} {:>8}",
                row.rank,
                crate::document::text::truncate(&row.url, 40),
                row.seo,
                row.aeo,
                row.combined
            );
        }
        for entry in entries {
            if let Err(ref err) = entry.outcome {
                let _ = writeln!(
                    out,
                    "   {} {}: {}",
                    self.paint("✗".red()),
                    entry.url,
                    err
                );
            }
        }
        let _ = writeln!(out);
        out
    }

    fn paint(&self, s: colored::ColoredString) -> String {
        if self.use_colors {
            s.to_string()
        } else {
            s.clear().to_string()
        }
    }

    fn colorize_grade(&self, grade: Grade) -> String {
        let s = grade.to_string();
        let colored = match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        };
        self.paint(colored)
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (usize::from(score) * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}", "█".repeat(filled), "░".repeat(empty), score);

        if score >= 80 {
            self.paint(bar.green())
        } else if score >= 60 {
            self.paint(bar.yellow())
        } else {
            self.paint(bar.red())
        }
    }

    fn create_mini_bar(&self, earned: f64, possible: f64) -> String {
        let ratio = if possible > 0.0 { earned / possible } else { 0.0 };
        let filled = ((ratio * 10.0).round() as usize).min(10);
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(10 - filled))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Priorities lined up with the checklist, which lists fails before warnings
fn ordered_by_status(report: &AnalysisReport) -> Vec<Priority> {
    [CheckStatus::Fail, CheckStatus::Warning]
        .iter()
        .flat_map(|status| {
            report
                .recommendations
                .iter()
                .filter(move |r| r.status == *status)
                .map(|r| r.priority)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Heading};
    use crate::Analyzer;

    fn report() -> AnalysisReport {
        let doc = Document {
            title: Some("Worm composting for small apartments".to_string()),
            headings: Some(vec![Heading::new(1, "Worm composting")]),
            paragraphs: Some(vec!["Worm composting turns scraps into castings.".to_string()]),
            word_count: 320,
            ..Document::new("http://example.com/worms")
        };
        Analyzer::default().analyze(&doc).unwrap()
    }

    #[test]
    fn test_quiet_line() {
        let report = report();
        let line = ConsoleReporter::new().without_colors().render_quiet(&report);
        assert_eq!(
            line,
            format!(
                "http://example.com/worms: SEO {} ({}) | AEO {} ({})",
                report.seo.score, report.seo.grade, report.aeo.score, report.aeo.grade
            )
        );
    }

    #[test]
    fn test_plain_render_hides_passes_unless_verbose() {
        let report = report();
        let plain = ConsoleReporter::new().without_colors().render(&report);
        assert!(!plain.contains('\u{1b}'));
        assert!(plain.contains("✗ [░░░░░░░░░░] HTTPS [https]"));
        assert!(!plain.contains("Page Title [title]"));

        let verbose = ConsoleReporter::new().without_colors().verbose().render(&report);
        assert!(verbose.contains("Page Title [title]"));
    }

    #[test]
    fn test_comparison_table() {
        let entries = Analyzer::default().compare(&[Document::default()]);
        let table = ConsoleReporter::new().without_colors().render_comparison(&entries);
        assert!(table.contains("Combined"));
        assert!(table.contains("no content"));
    }

    #[test]
    fn test_mini_bar_bounds() {
        let reporter = ConsoleReporter::new();
        assert_eq!(reporter.create_mini_bar(0.0, 0.0), "[░░░░░░░░░░]");
        assert_eq!(reporter.create_mini_bar(8.0, 8.0), "[▓▓▓▓▓▓▓▓▓▓]");
    }
}
