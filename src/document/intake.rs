//! Intake screening
//!
//! Runs at the crawler boundary, before a document ever reaches the
//! analyzer. Pages that cannot be meaningfully scored are rejected here with
//! a distinct error instead of producing a misleading low score.

use super::{text, Document};
use thiserror::Error;

/// Minimum visible words for a page to be worth scoring
pub const MIN_WORDS: usize = 50;

/// Title fragments that mark error, login, and maintenance pages
const UNSUPPORTED_TITLES: &[(&str, &str)] = &[
    ("page not found", "This appears to be a 404 error page"),
    ("404", "This appears to be a 404 error page"),
    ("access denied", "Access to this page was denied"),
    ("login", "This appears to be a login page"),
    ("sign in", "This appears to be a login page"),
    ("maintenance", "This page appears to be under maintenance"),
];

/// Why a document was turned away before analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Page has insufficient content ({word_count} words). Minimum {min} words required.", min = MIN_WORDS)]
    InsufficientContent { word_count: usize },

    #[error("Unsupported page: {0}")]
    Unsupported(String),
}

/// Screen a crawled document before it is handed to the analyzer.
pub fn screen(document: &Document) -> Result<(), Rejection> {
    if let Some(title) = document.title_text() {
        let lower = title.to_lowercase();
        if let Some((_, reason)) = UNSUPPORTED_TITLES
            .iter()
            .find(|(needle, _)| lower.contains(needle))
        {
            return Err(Rejection::Unsupported((*reason).to_string()));
        }
    }

    let word_count = effective_word_count(document);
    if word_count < MIN_WORDS {
        return Err(Rejection::InsufficientContent { word_count });
    }

    Ok(())
}

/// Crawler-reported count, or a count of the visible text when it reported none
fn effective_word_count(document: &Document) -> usize {
    if document.word_count > 0 {
        document.word_count
    } else {
        text::word_count(&document.visible_text())
    }
}
