//! Infrastructure layer for greenlight
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod brain;
pub mod cache;
pub mod config;
pub mod context;
pub mod logging;
pub mod providers;
pub mod routing;

// Re-export commonly used types
pub use brain::BrainClient;
pub use cache::{MemoryCache, NullCache};
pub use config::{
    ConfigLoader, ConfigValidationError, FileCacheConfig, FileConfig, FileProviderConfig,
    FileRoutingConfig, FileScoringConfig, FileServicesConfig,
};
pub use context::RestContextStore;
pub use logging::{init_file_tracing, init_tracing};
pub use providers::{OpenAiGateway, RetryDirective, RetryState};
pub use routing::KeywordRelevance;
