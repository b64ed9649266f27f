//! Request routing to departments

pub mod relevance;
