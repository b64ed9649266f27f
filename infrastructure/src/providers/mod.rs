//! Scoring backend adapters

pub mod openai;

pub use openai::{OpenAiGateway, RetryDirective, RetryState};
