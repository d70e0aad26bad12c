//! Traditional search checks

pub mod headings;
pub mod images;
pub mod internal_links;
pub mod meta_description;
pub mod open_graph;
pub mod readability;
pub mod schema_markup;
pub mod technical;
pub mod title;
pub mod word_count;

pub use headings::HeadingsRule;
pub use images::ImagesRule;
pub use internal_links::InternalLinksRule;
pub use meta_description::MetaDescriptionRule;
pub use open_graph::OpenGraphRule;
pub use readability::ReadabilityRule;
pub use schema_markup::SchemaMarkupRule;
pub use technical::{CanonicalUrlRule, HttpsRule, MobileViewportRule, XmlSitemapRule};
pub use title::TitleRule;
pub use word_count::WordCountRule;
