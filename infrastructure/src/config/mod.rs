//! Configuration file handling

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, FileCacheConfig, FileConfig, FileProviderConfig, FileRoutingConfig,
    FileScoringConfig, FileServicesConfig,
};
pub use loader::ConfigLoader;
