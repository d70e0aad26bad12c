//! Prompt construction and response parsing for chat-based rewriting

use super::{Rewrite, RewriteError, RewriteRequest};
use crate::document::text;

/// Longest slice of the original paragraph sent to the model
pub const MAX_ORIGINAL_CHARS: usize = 300;

const AFTER_MARKER: &str = "AFTER:";
const CHANGED_MARKER: &str = "WHAT CHANGED:";

/// Build the rewrite prompt for one paragraph
pub fn build_prompt(request: &RewriteRequest) -> String {
    let original = text::truncate(request.original.trim(), MAX_ORIGINAL_CHARS);
    format!(
        r#"You are a content optimization expert. Rewrite the paragraph below so it fixes one specific issue.

ISSUE: {issue}
HOW TO FIX IT: {fix}

BEFORE:
{original}

REQUIREMENTS:
- Lead with a direct statement or answer
- Remove filler phrases and meta-commentary
- Keep sentences under 20 words
- Keep the facts of the original; do not invent new claims
- 40-80 words

Respond in exactly this format:
{after}
<the rewritten paragraph>
{changed}
<one or two sentences on what you changed>"#,
        issue = request.issue_name,
        fix = request.fix,
        original = original,
        after = AFTER_MARKER,
        changed = CHANGED_MARKER,
    )
}

/// Parse a model response in the `AFTER:` / `WHAT CHANGED:` format.
///
/// A response with no `AFTER:` marker is taken whole as the rewritten text.
pub fn parse_response(response: &str) -> Result<Rewrite, RewriteError> {
    let body = response.trim();
    if body.is_empty() {
        return Err(RewriteError::InvalidResponse(
            "empty response from model".to_string(),
        ));
    }

    let after_start = body
        .find(AFTER_MARKER)
        .map(|i| i + AFTER_MARKER.len())
        .unwrap_or(0);
    let rest = &body[after_start..];

    let (improved, explanation) = match rest.find(CHANGED_MARKER) {
        Some(i) => (&rest[..i], rest[i + CHANGED_MARKER.len()..].trim()),
        None => (rest, ""),
    };

    let improved_text = improved.trim().to_string();
    if improved_text.is_empty() {
        return Err(RewriteError::InvalidResponse(
            "response has no rewritten text".to_string(),
        ));
    }

    Ok(Rewrite {
        improved_text,
        explanation: if explanation.is_empty() {
            "Rewritten for clarity and directness.".to_string()
        } else {
            explanation.to_string()
        },
    })
}
