//! Plain-text helpers shared by the rules and the keyword extractor

/// Words that open a question
pub const INTERROGATIVES: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can", "does", "do", "is", "are",
    "should", "will",
];

/// Whitespace-separated words that contain at least one alphanumeric character
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
}

pub fn word_count(text: &str) -> usize {
    words(text).count()
}

/// Split into sentences on `.`, `!` or `?` followed by whitespace or end of text.
///
/// Empty fragments are dropped; text without terminal punctuation is one sentence.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            let at_boundary = match chars.peek() {
                None => true,
                Some((_, next)) => next.is_whitespace(),
            };
            if at_boundary {
                let end = idx + ch.len_utf8();
                let sentence = text[start..end].trim();
                if word_count(sentence) > 0 {
                    out.push(sentence);
                }
                start = end;
            }
        }
    }

    let rest = text[start..].trim();
    if word_count(rest) > 0 {
        out.push(rest);
    }
    out
}

pub fn first_sentence(text: &str) -> Option<&str> {
    sentences(text).into_iter().next()
}

/// Average words per sentence, `None` when there are no sentences
pub fn average_sentence_length<'a>(paragraphs: impl IntoIterator<Item = &'a str>) -> Option<f64> {
    let mut sentence_total = 0usize;
    let mut word_total = 0usize;
    for paragraph in paragraphs {
        for sentence in sentences(paragraph) {
            sentence_total += 1;
            word_total += word_count(sentence);
        }
    }
    if sentence_total == 0 {
        None
    } else {
        Some(word_total as f64 / sentence_total as f64)
    }
}

/// Heading or sentence phrased as a question
pub fn is_question(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.ends_with('?') {
        return true;
    }
    trimmed
        .split_whitespace()
        .next()
        .map(|first| {
            let first = first
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            INTERROGATIVES.contains(&first.as_str())
        })
        .unwrap_or(false)
}

/// Truncate to at most `max` characters, appending an ellipsis when cut
pub fn truncate(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}
