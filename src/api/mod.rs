//! HTTP client for the PokeAPI

pub mod client;

// Re-exports for public API convenience
pub use client::{ApiClient, POKE_API_BASE};
