//! Answer-engine readiness checks

pub mod content_length;
pub mod definition_clarity;
pub mod direct_answers;
pub mod fluff;
pub mod question_headings;
pub mod structured_content;

pub use content_length::ContentLengthRule;
pub use definition_clarity::DefinitionClarityRule;
pub use direct_answers::DirectAnswersRule;
pub use fluff::{fluff_hits, FluffDetectionRule};
pub use question_headings::QuestionHeadingsRule;
pub use structured_content::StructuredContentRule;
