//! OpenAI-compatible provider adapter

pub mod gateway;
pub mod retry;
pub mod types;

pub use gateway::OpenAiGateway;
pub use retry::{RetryDirective, RetryState};
