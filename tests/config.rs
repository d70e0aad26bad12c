//! Config file loading: discovery, extends, validation.

use pagegrade::config::{load_config, CONFIG_FILENAME};
use pagegrade::{analyze, Analyzer, CheckKind, Document, EngineConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn sample() -> Document {
    serde_json::from_str(
        &fs::read_to_string(format!(
            "{}/test-pages/weak-http.json",
            env!("CARGO_MANIFEST_DIR")
        ))
        .unwrap(),
    )
    .unwrap()
}

#[test]
fn found_in_parent_directory() {
    let root = TempDir::new().unwrap();
    let nested = root.path().join("site").join("pages");
    fs::create_dir_all(&nested).unwrap();
    write(root.path(), CONFIG_FILENAME, r#"{ "threshold": 55 }"#);

    let config = load_config(&nested, None).unwrap();
    assert_eq!(config.threshold, Some(55));
    assert_eq!(config.seo.weights, EngineConfig::default().seo.weights);
}

#[test]
fn extends_chain_merges_deeply() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "base.json",
        r#"{
            "threshold": 60,
            "seo": { "weights": { "https": 20, "xmlSitemap": 0 } }
        }"#,
    );
    write(
        dir.path(),
        CONFIG_FILENAME,
        r#"{
            "extends": "./base",
            "seo": { "weights": { "xmlSitemap": 8, "title": 5, "schemaMarkup": 2 } }
        }"#,
    );

    let config = load_config(dir.path(), None).unwrap();
    assert_eq!(config.threshold, Some(60));
    assert_eq!(config.seo.weights.https, 20);
    assert_eq!(config.seo.weights.xml_sitemap, 8);
    assert_eq!(config.seo.weights.title, 5);
    assert_eq!(config.seo.weights.total(), 100);

    let default_https = analyze(&sample()).unwrap();
    let reweighted = Analyzer::new(config).unwrap().analyze(&sample()).unwrap();
    let https = |r: &pagegrade::AnalysisReport| {
        r.seo
            .checks
            .iter()
            .find(|c| c.id == CheckKind::Https)
            .map(|c| c.points_possible)
            .unwrap()
    };
    assert_eq!(https(&default_https), 10.0);
    assert_eq!(https(&reweighted), 20.0);
}

#[test]
fn circular_extends_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.json", r#"{ "extends": "b.json" }"#);
    write(dir.path(), "b.json", r#"{ "extends": "a.json" }"#);

    let err = load_config(dir.path(), Some(&dir.path().join("a.json"))).unwrap_err();
    assert!(format!("{:#}", err).contains("circular extends"));
}

#[test]
fn weights_that_do_not_sum_to_100_are_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        CONFIG_FILENAME,
        r#"{ "aeo": { "weights": { "directAnswers": 30 } } }"#,
    );
    let err = load_config(dir.path(), None).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("aeo weights must sum to 100, got 105"), "{}", message);
}

#[test]
fn inverted_grade_boundaries_are_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        CONFIG_FILENAME,
        r#"{ "grading": { "a": 80, "b": 85 } }"#,
    );
    let err = load_config(dir.path(), None).unwrap_err();
    assert!(format!("{:#}", err).contains("grade boundaries"));
}

#[test]
fn malformed_json_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), CONFIG_FILENAME, "{ not json");
    let err = load_config(dir.path(), None).unwrap_err();
    assert!(format!("{:#}", err).contains(CONFIG_FILENAME));
}

#[test]
fn missing_custom_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_config(dir.path(), Some(&dir.path().join("nope.json"))).is_err());
}

#[test]
fn custom_grading_changes_letter_only() {
    let mut config = EngineConfig::default();
    config.grading.d = 30;
    let strict = Analyzer::new(config).unwrap().analyze(&sample()).unwrap();
    let default = analyze(&sample()).unwrap();
    assert_eq!(strict.seo.score, default.seo.score);
    assert_eq!(strict.seo.grade, pagegrade::Grade::D);
    assert_eq!(default.seo.grade, pagegrade::Grade::F);
}
