//! Analyzer module - SEO and AEO scoring engine

pub mod composer;
pub mod engine;
pub mod keywords;
pub mod rules;
pub mod scoring;

pub use composer::ReportComposer;
pub use engine::{leaderboard, AnalyzeError, Analyzer, ComparisonEntry, LeaderboardRow};
pub use keywords::KeywordExtractor;
pub use scoring::ScoreCalculator;
