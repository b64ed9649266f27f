//! Assessment cache port
//!
//! Key-value cache with TTL for memoizing quality assessments. The cache is
//! an optimization, never a dependency: every caller must keep working when
//! it is unavailable.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value cache with per-entry TTL
///
/// Values are serialized JSON; entries for the same key are derived
/// deterministically from content, so a duplicate concurrent write is
/// idempotent and needs no locking.
#[async_trait]
pub trait AssessmentCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    async fn clear_by_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}
