//! Heading structure: a single H1 and no skipped levels

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::document::{text, Document, Heading};
use crate::CheckKind;

/// Rule for H1 count and heading hierarchy
pub struct HeadingsRule;

impl HeadingsRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeadingsRule {
    fn default() -> Self {
        Self::new()
    }
}

/// A jump from one heading to a deeper one that skips at least one level
struct LevelJump<'a> {
    from: &'a Heading,
    to: &'a Heading,
    /// Some skipped level never appears anywhere on the page
    severe: bool,
}

fn describe(jump: &LevelJump) -> String {
    format!(
        "H{} \"{}\" followed by H{} \"{}\"",
        jump.from.level,
        text::truncate(&jump.from.text, 40),
        jump.to.level,
        text::truncate(&jump.to.text, 40)
    )
}

fn level_jumps(headings: &[Heading]) -> Vec<LevelJump<'_>> {
    let present = |level: u8| headings.iter().any(|h| h.level == level);
    headings
        .windows(2)
        .filter(|pair| pair[1].level > pair[0].level.saturating_add(1))
        .map(|pair| LevelJump {
            from: &pair[0],
            to: &pair[1],
            severe: (pair[0].level.saturating_add(1)..pair[1].level).any(|level| !present(level)),
        })
        .collect()
}

impl CheckRule for HeadingsRule {
    fn kind(&self) -> CheckKind {
        CheckKind::Headings
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let Some(headings) = document.headings.as_deref() else {
            return CheckOutcome::missing(
                "heading",
                "Add exactly one H1 heading that describes the page topic, then organize sections with H2 and H3 headings.",
            );
        };

        let h1_count = headings.iter().filter(|h| h.level == 1).count();
        if h1_count == 0 {
            return CheckOutcome::fail(
                "No H1 heading found on the page.",
                "Add exactly one H1 heading that clearly describes the page topic and includes your primary keyword.",
            );
        }
        if h1_count > 1 {
            return CheckOutcome::fail(
                format!(
                    "Page has {} H1 headings. Multiple H1s dilute keyword focus.",
                    h1_count
                ),
                "Reduce to one primary H1 heading. Convert other H1s to H2 or H3 headings based on content hierarchy.",
            )
            .with_examples(
                headings
                    .iter()
                    .filter(|h| h.level == 1)
                    .map(|h| text::truncate(&h.text, 80)),
            );
        }

        let jumps = level_jumps(headings);
        let severe: Vec<&LevelJump> = jumps.iter().filter(|j| j.severe).collect();
        if !severe.is_empty() {
            return CheckOutcome::fail(
                format!(
                    "Heading levels are skipped {} time(s) with the intermediate level missing from the page.",
                    severe.len()
                ),
                "Reorganize headings to follow proper hierarchy: H1 (page title) → H2 (main sections) → H3 (subsections) → H4 (minor sections).",
            )
            .with_examples(severe.iter().map(|j| describe(j)));
        }

        let before_h1 = headings.iter().take_while(|h| h.level != 1).count();
        if !jumps.is_empty() || before_h1 > 0 {
            let mut issues = Vec::new();
            if !jumps.is_empty() {
                issues.push(format!("{} minor level gap(s)", jumps.len()));
            }
            if before_h1 > 0 {
                issues.push(format!("{} heading(s) appear before the H1", before_h1));
            }
            return CheckOutcome::warning(
                format!("Heading hierarchy has minor issues: {}.", issues.join(", ")),
                "Keep headings in order: the H1 first, and step down one level at a time.",
            )
            .with_examples(jumps.iter().map(describe));
        }

        CheckOutcome::pass(
            "Page has exactly one H1 and the heading hierarchy follows proper structure.",
            "Heading structure is logical. Ensure each heading accurately describes the content below it.",
        )
    }
}
