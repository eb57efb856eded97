//! In-memory repository layer over the PokeAPI

pub mod dex;

// Re-exports for public API convenience
pub use dex::{Pokedex, DEFAULT_LIST_LIMIT};
