//! JSON reporter for machine-readable output

use crate::analyzer::{leaderboard, ComparisonEntry, LeaderboardRow};
use crate::AnalysisReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
    /// Wrap output in an envelope with an `analyzedAt` timestamp
    timestamp: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self {
            pretty: false,
            timestamp: false,
        }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn with_timestamp(mut self) -> Self {
        self.timestamp = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }

    fn analyzed_at() -> String {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    /// Report a single analysis as JSON
    pub fn report(&self, report: &AnalysisReport) -> String {
        if self.timestamp {
            self.render(
                &Envelope {
                    analyzed_at: Self::analyzed_at(),
                    report,
                },
                "{}",
            )
        } else {
            self.render(report, "{}")
        }
    }

    /// Report a comparison: every entry in input order plus the ranking
    pub fn report_comparison(&self, entries: &[ComparisonEntry]) -> String {
        let output = ComparisonOutput {
            analyzed_at: self.timestamp.then(Self::analyzed_at),
            pages: entries
                .iter()
                .map(|entry| ComparisonPage {
                    url: &entry.url,
                    report: entry.outcome.as_ref().ok(),
                    error: entry.outcome.as_ref().err().map(String::as_str),
                })
                .collect(),
            leaderboard: leaderboard(entries),
        };
        self.render(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    analyzed_at: String,
    report: &'a AnalysisReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    analyzed_at: Option<String>,
    pages: Vec<ComparisonPage<'a>>,
    leaderboard: Vec<LeaderboardRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonPage<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Heading};
    use crate::Analyzer;
    use serde_json::Value;

    fn sample() -> Document {
        Document {
            title: Some("Worm composting for small apartments".to_string()),
            headings: Some(vec![Heading::new(1, "Worm composting")]),
            paragraphs: Some(vec!["Worm composting turns scraps into castings.".to_string()]),
            word_count: 320,
            ..Document::new("https://example.com/worms")
        }
    }

    #[test]
    fn test_report_is_camel_case() {
        let report = Analyzer::default().analyze(&sample()).unwrap();
        let json: Value = serde_json::from_str(&JsonReporter::new().report(&report)).unwrap();
        assert_eq!(json["url"], "https://example.com/worms");
        assert!(json["actionChecklist"].is_array());
        assert!(json["seo"]["topIssues"].is_array());
        assert_eq!(json["seo"]["checks"][0]["id"], "title");
        assert!(json.get("beforeAfterExample").is_none());
    }

    #[test]
    fn test_timestamp_envelope() {
        let report = Analyzer::default().analyze(&sample()).unwrap();
        let output = JsonReporter::new().pretty().with_timestamp().report(&report);
        assert!(output.contains('\n'));
        let json: Value = serde_json::from_str(&output).unwrap();
        let stamp = json["analyzedAt"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert_eq!(json["report"]["url"], "https://example.com/worms");
    }

    #[test]
    fn test_comparison_output() {
        let entries = Analyzer::default().compare(&[sample(), Document::default()]);
        let json: Value =
            serde_json::from_str(&JsonReporter::new().report_comparison(&entries)).unwrap();
        assert_eq!(json["pages"].as_array().unwrap().len(), 2);
        assert!(json["pages"][1]["error"].is_string());
        assert_eq!(json["leaderboard"].as_array().unwrap().len(), 1);
        assert_eq!(json["leaderboard"][0]["rank"], 1);
    }
}
