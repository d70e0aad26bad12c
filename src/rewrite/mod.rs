//! Rewrite collaborator for the before/after example
//!
//! Rewriting is the only generated text in a report. It never feeds back into
//! scoring: when no rewriter is configured, or the rewriter errors, the
//! example is simply omitted.

pub mod client;
pub mod prompt;

pub use client::{is_ai_available, ChatRewriter};
pub use prompt::{build_prompt, parse_response};

use thiserror::Error;

/// What the rewriter is asked to improve
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    /// The representative "before" paragraph
    pub original: String,
    /// Display name of the check the rewrite should address
    pub issue_name: String,
    /// The recommendation text for that check
    pub fix: String,
}

/// Rewritten text and a short note on what changed
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub improved_text: String,
    pub explanation: String,
}

/// Why a rewrite could not be produced
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("PAGEGRADE_AI_API_KEY environment variable not set")]
    NoApiKey,
    #[error("AI feature not enabled. Rebuild with: cargo build --features ai")]
    FeatureDisabled,
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Rate limited - try again later")]
    RateLimited,
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Anything that can turn a weak paragraph into a better one
pub trait ContentRewriter: Send + Sync {
    fn rewrite(&self, request: &RewriteRequest) -> Result<Rewrite, RewriteError>;
}
