use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::document::Document;
use crate::CheckKind;

/// Lists, tables, or an FAQ block
pub struct StructuredContentRule;

impl StructuredContentRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StructuredContentRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRule for StructuredContentRule {
    fn kind(&self) -> CheckKind {
        CheckKind::StructuredContent
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let mut elements = Vec::new();
        if document.lists > 0 {
            elements.push(format!("{} list(s)", document.lists));
        }
        if document.tables > 0 {
            elements.push(format!("{} table(s)", document.tables));
        }
        if !document.faq_pairs.is_empty() {
            elements.push(format!("an FAQ block ({} Q&A)", document.faq_pairs.len()));
        }

        if elements.is_empty() {
            CheckOutcome::fail(
                "No structured content detected (lists, tables, FAQ). AI engines strongly prefer structured data.",
                "Add bullet points, numbered lists, comparison tables, or an FAQ section. These are easy for AI to extract and display.",
            )
        } else {
            CheckOutcome::pass(
                format!(
                    "Page includes {} - helps AI extraction.",
                    elements.join(", ")
                ),
                "Continue using structured formats. Add step-by-step guides or comparison tables where relevant.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FaqPair;
    use crate::CheckStatus;

    #[test]
    fn test_any_structure_passes() {
        let rule = StructuredContentRule::new();
        let mut doc = Document::new("https://example.com");
        assert_eq!(rule.evaluate(&doc).status, CheckStatus::Fail);

        doc.tables = 1;
        let outcome = rule.evaluate(&doc);
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert!(outcome.explanation.contains("1 table(s)"));

        let faq_only = Document {
            faq_pairs: vec![FaqPair {
                question: "Q?".to_string(),
                answer: "A.".to_string(),
            }],
            ..Document::new("https://example.com")
        };
        assert_eq!(rule.evaluate(&faq_only).status, CheckStatus::Pass);
    }
}
