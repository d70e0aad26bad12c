//! Keyword extraction
//!
//! Frequency-ranks the words of a page's visible text and reports where the
//! strongest candidates are placed. Independent of both rule engines.

use crate::document::{text, Document};
use crate::{KeywordPlacement, KeywordReport};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Pages with fewer visible words get an empty report
pub const MIN_WORDS: usize = 50;
pub const TOP_LIMIT: usize = 10;
pub const SUGGESTED_LIMIT: usize = 5;
/// Minimum occurrences for a top or suggested keyword
pub const MIN_FREQUENCY: usize = 2;
const MIN_TOKEN_CHARS: usize = 3;
/// Ranks considered for suggestions (11th through 20th)
const SUGGESTED_RANKS: std::ops::Range<usize> = 10..20;

const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make",
    "can", "like", "time", "no", "just", "him", "know", "take", "people", "into", "year", "your",
    "good", "some", "could", "them", "see", "other", "than", "then", "now", "look", "only",
    "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our", "work",
    "first", "well", "way", "even", "new", "want", "because", "any", "these", "give", "day",
    "most", "us", "is", "was", "are", "been", "has", "had", "were", "said", "did", "having",
    "may", "should", "am", "being", "here", "more", "through", "very", "much", "where", "too",
    "why", "does", "each", "such", "many", "those", "both", "few", "same", "own", "while",
    "before", "between", "under", "again", "once", "during", "without", "within", "yours",
    "ours", "himself", "herself", "itself", "themselves", "don", "doesn", "isn", "aren", "didn",
    "won", "can't", "let", "via", "per", "yet", "still", "every", "must", "might", "shall",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Lowercase candidate tokens: stop words, short tokens, and bare numbers removed
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '\'' || c == '\u{2019}'))
        .filter_map(|raw| {
            // Possessives and contractions keep only the stem
            let stem = raw.split(['\'', '\u{2019}']).next().unwrap_or("");
            let token = stem.trim_matches('-');
            let keep = token.chars().count() >= MIN_TOKEN_CHARS
                && !token.chars().all(|c| c.is_ascii_digit() || c == '-')
                && !is_stop_word(token);
            keep.then(|| token.to_string())
        })
        .collect()
}

/// Extractor for keyword candidates and placement
pub struct KeywordExtractor;

impl KeywordExtractor {
    /// All candidate keywords with their counts: count descending, then first occurrence
    pub fn frequencies(document: &Document) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, token) in tokenize(&document.visible_text()).into_iter().enumerate() {
            counts.entry(token).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked
            .into_iter()
            .map(|(word, count, _)| (word, count))
            .collect()
    }

    /// Build the keyword report for a document.
    ///
    /// Fewer than [`MIN_WORDS`] visible words yields an empty report, never an error.
    pub fn extract(document: &Document) -> KeywordReport {
        let visible_words = text::word_count(&document.visible_text());
        if visible_words < MIN_WORDS {
            tracing::debug!(visible_words, "too little text for keyword extraction");
            return KeywordReport::default();
        }

        let ranked = Self::frequencies(document);

        let top_keywords: Vec<String> = ranked
            .iter()
            .take(TOP_LIMIT)
            .filter(|(_, count)| *count >= MIN_FREQUENCY)
            .map(|(word, _)| word.clone())
            .collect();

        let title_tokens: HashSet<String> = document
            .title_text()
            .map(tokenize)
            .unwrap_or_default()
            .into_iter()
            .collect();
        let primary_focus = ranked
            .iter()
            .find(|(word, _)| title_tokens.contains(word))
            .or_else(|| ranked.first())
            .map(|(word, _)| word.clone());

        let title = document.title_text().unwrap_or("").to_lowercase();
        let h1 = document.first_h1().unwrap_or("").to_lowercase();
        let first_paragraph = document.first_paragraph().unwrap_or("").to_lowercase();
        let keyword_placement: BTreeMap<String, KeywordPlacement> = top_keywords
            .iter()
            .map(|keyword| {
                (
                    keyword.clone(),
                    KeywordPlacement {
                        in_title: title.contains(keyword.as_str()),
                        in_h1: h1.contains(keyword.as_str()),
                        in_first_paragraph: first_paragraph.contains(keyword.as_str()),
                    },
                )
            })
            .collect();

        let suggested_keywords: Vec<String> = ranked
            .iter()
            .enumerate()
            .filter(|(rank, (word, count))| {
                SUGGESTED_RANKS.contains(rank)
                    && *count >= MIN_FREQUENCY
                    && !top_keywords.contains(word)
            })
            .map(|(_, (word, _))| word.clone())
            .take(SUGGESTED_LIMIT)
            .collect();

        KeywordReport {
            top_keywords,
            primary_focus,
            keyword_placement,
            suggested_keywords,
        }
    }
}
