//! Relevance scorer adapters

pub mod keyword;

pub use keyword::KeywordRelevance;
