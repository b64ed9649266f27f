//! Assessment cache adapters

pub mod memory;

pub use memory::{MemoryCache, NullCache};
