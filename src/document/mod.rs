//! Document model - one fetched, pre-parsed page
//!
//! Produced by an external crawler and handed to the engine as a read-only
//! snapshot. Optional collections distinguish "the crawler never produced
//! this signal" (`None`) from "the page has none of these" (empty).

pub mod intake;
pub mod text;

pub use intake::{screen, Rejection};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The Open Graph tags the engine scores
pub const OPEN_GRAPH_TAGS: [&str; 4] = ["og:title", "og:description", "og:image", "og:url"];

/// Structured representation of one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    /// Headings in document order
    pub headings: Option<Vec<Heading>>,
    /// Paragraph texts in document order
    pub paragraphs: Option<Vec<String>>,
    /// Number of `<ul>`/`<ol>` blocks
    pub lists: usize,
    /// Number of `<table>` blocks
    pub tables: usize,
    pub faq_pairs: Vec<FaqPair>,
    pub links: Option<LinkCounts>,
    pub images: Option<Vec<ImageInfo>>,
    /// Tag name (e.g. `og:title`) to presence
    pub open_graph: Option<BTreeMap<String, bool>>,
    pub schema_blocks: Option<Vec<SchemaBlock>>,
    /// Visible word count as measured by the crawler
    pub word_count: usize,
    pub has_canonical: bool,
    pub has_sitemap: bool,
    pub has_viewport_meta: bool,
}

/// A heading element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// 1-6
    pub level: u8,
    pub text: String,
    /// Index into `paragraphs` of the first paragraph after this heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_paragraph: Option<usize>,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            next_paragraph: None,
        }
    }

    /// Attach the index of the paragraph that follows this heading
    pub fn followed_by(mut self, paragraph_index: usize) -> Self {
        self.next_paragraph = Some(paragraph_index);
        self
    }
}

/// A question/answer pair from an FAQ block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPair {
    pub question: String,
    pub answer: String,
}

/// Link counts split by destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCounts {
    pub internal_count: usize,
    pub external_count: usize,
}

/// One `<img>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub has_alt: bool,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub lazy_loaded: bool,
}

/// One structured-data block (JSON-LD)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaBlock {
    /// Declared type as reported by the crawler; may be empty
    #[serde(rename = "type", default)]
    pub schema_type: String,
    /// Parsed JSON, or the raw script text as a JSON string when unparsed
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl SchemaBlock {
    /// The block as a JSON object or array, parsing string payloads on demand
    pub fn parsed(&self) -> Option<serde_json::Value> {
        match &self.raw {
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => Some(self.raw.clone()),
            serde_json::Value::String(s) => serde_json::from_str::<serde_json::Value>(s)
                .ok()
                .filter(|v| v.is_object() || v.is_array()),
            _ => None,
        }
    }

    /// Recognizable `@type` values, from the crawler label or the JSON itself
    pub fn types(&self) -> Vec<String> {
        let mut types = Vec::new();
        let declared = self.schema_type.trim();
        if !declared.is_empty() {
            types.push(declared.to_string());
        }
        if let Some(value) = self.parsed() {
            collect_types(&value, &mut types);
        }
        unique_in_order(types)
    }
}

/// Drop repeated entries, keeping the first occurrence of each
pub(crate) fn unique_in_order(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn collect_types(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            match map.get("@type") {
                Some(serde_json::Value::String(t)) if !t.trim().is_empty() => {
                    out.push(t.trim().to_string())
                }
                Some(serde_json::Value::Array(items)) => {
                    for item in items {
                        if let Some(t) = item.as_str().filter(|t| !t.trim().is_empty()) {
                            out.push(t.trim().to_string());
                        }
                    }
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, out);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_types(item, out);
            }
        }
        _ => {}
    }
}

impl Document {
    /// Create a document for a URL with every signal absent
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// True when the model carries no content at all
    pub fn is_blank(&self) -> bool {
        fn blank(s: &Option<String>) -> bool {
            s.as_deref().map(|t| t.trim().is_empty()).unwrap_or(true)
        }
        self.url.trim().is_empty()
            && blank(&self.title)
            && blank(&self.meta_description)
            && self.headings.as_ref().map(|h| h.is_empty()).unwrap_or(true)
            && self.paragraphs.as_ref().map(|p| p.is_empty()).unwrap_or(true)
            && self.faq_pairs.is_empty()
            && self.word_count == 0
            && self.lists == 0
            && self.tables == 0
    }

    /// Non-empty trimmed title
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Non-empty trimmed meta description
    pub fn meta_description_text(&self) -> Option<&str> {
        self.meta_description
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn headings_or_empty(&self) -> &[Heading] {
        self.headings.as_deref().unwrap_or(&[])
    }

    pub fn paragraphs_or_empty(&self) -> &[String] {
        self.paragraphs.as_deref().unwrap_or(&[])
    }

    /// Text of the first H1, if any
    pub fn first_h1(&self) -> Option<&str> {
        self.headings_or_empty()
            .iter()
            .find(|h| h.level == 1)
            .map(|h| h.text.as_str())
    }

    /// First non-empty paragraph
    pub fn first_paragraph(&self) -> Option<&str> {
        self.paragraphs_or_empty()
            .iter()
            .map(|p| p.trim())
            .find(|p| !p.is_empty())
    }

    /// Scheme check on the URL itself
    pub fn is_https(&self) -> bool {
        url::Url::parse(self.url.trim())
            .map(|u| u.scheme() == "https")
            .unwrap_or(false)
    }

    /// Title, headings, paragraphs and FAQ text, in that order
    pub fn visible_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(title) = self.title_text() {
            parts.push(title);
        }
        for heading in self.headings_or_empty() {
            parts.push(&heading.text);
        }
        for paragraph in self.paragraphs_or_empty() {
            parts.push(paragraph);
        }
        for faq in &self.faq_pairs {
            parts.push(&faq.question);
            parts.push(&faq.answer);
        }
        parts.join("\n")
    }
}
