//! Structured data (JSON-LD)

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::document::{unique_in_order, Document};
use crate::CheckKind;

pub struct SchemaMarkupRule;

impl SchemaMarkupRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchemaMarkupRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRule for SchemaMarkupRule {
    fn kind(&self) -> CheckKind {
        CheckKind::SchemaMarkup
    }

    fn evaluate(&self, document: &Document) -> CheckOutcome {
        let recommendation = "Add Schema.org markup (JSON-LD) for better search result display. Consider Article, Organization, or FAQPage schema based on your content type.";
        let Some(blocks) = document.schema_blocks.as_deref() else {
            return CheckOutcome::missing("structured data", recommendation);
        };

        let parsed: Vec<_> = blocks.iter().filter(|b| b.parsed().is_some()).collect();
        if parsed.is_empty() {
            let explanation = if blocks.is_empty() {
                "No structured data detected.".to_string()
            } else {
                format!(
                    "{} structured data block(s) found but none parse as JSON-LD.",
                    blocks.len()
                )
            };
            return CheckOutcome::fail(explanation, recommendation);
        }

        let types = unique_in_order(parsed.iter().flat_map(|b| b.types()));
        if types.is_empty() {
            return CheckOutcome::warning(
                "Structured data is present but declares no recognizable @type.",
                "Give each JSON-LD block an @type such as Article, Organization, or FAQPage.",
            );
        }

        CheckOutcome::pass(
            format!(
                "Schema markup detected: {}.",
                types.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
            ),
            "Validate your schema markup using a rich results testing tool.",
        )
        .with_examples(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SchemaBlock;
    use crate::CheckStatus;
    use serde_json::json;

    fn with_blocks(blocks: Vec<SchemaBlock>) -> Document {
        Document {
            schema_blocks: Some(blocks),
            ..Document::new("https://example.com")
        }
    }

    fn block(schema_type: &str, raw: serde_json::Value) -> SchemaBlock {
        SchemaBlock {
            schema_type: schema_type.to_string(),
            raw,
        }
    }

    #[test]
    fn test_no_blocks_fails() {
        let outcome = SchemaMarkupRule::new().evaluate(&with_blocks(vec![]));
        assert_eq!(outcome.status, CheckStatus::Fail);
    }

    #[test]
    fn test_unparsable_block_fails() {
        let outcome =
            SchemaMarkupRule::new().evaluate(&with_blocks(vec![block("", json!("{oops"))]));
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert!(outcome.explanation.contains("none parse"));
    }

    #[test]
    fn test_block_without_type_warns() {
        let outcome = SchemaMarkupRule::new()
            .evaluate(&with_blocks(vec![block("", json!({"name": "Example"}))]));
        assert_eq!(outcome.status, CheckStatus::Warning);
    }

    #[test]
    fn test_types_listed_once_across_blocks() {
        let outcome = SchemaMarkupRule::new().evaluate(&with_blocks(vec![
            block("", json!({"@type": "Article"})),
            block("", json!({"@type": "Organization"})),
            block("", json!({"@type": "Article"})),
        ]));
        assert_eq!(
            outcome.explanation,
            "Schema markup detected: Article, Organization."
        );
        assert_eq!(outcome.examples, vec!["Article", "Organization"]);
    }

    #[test]
    fn test_typed_block_passes() {
        let outcome = SchemaMarkupRule::new().evaluate(&with_blocks(vec![
            block("", json!({"@type": "Article"})),
            block("FAQPage", json!({"@type": "FAQPage"})),
        ]));
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert_eq!(
            outcome.explanation,
            "Schema markup detected: Article, FAQPage."
        );
    }
}
