//! Prompt construction for grading calls

pub mod assessment;
