//! Project context store adapters

pub mod rest_store;

pub use rest_store::RestContextStore;
