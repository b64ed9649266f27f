//! Brain consistency service adapter

pub mod client;

pub use client::BrainClient;
