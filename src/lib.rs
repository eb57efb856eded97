pub mod api;
pub mod cache;
pub mod error;
pub mod models;
pub mod state;

// Re-export commonly used items
pub use api::{ApiClient, POKE_API_BASE};
pub use cache::{Pokedex, DEFAULT_LIST_LIMIT};
pub use error::{ApiError, ApiResult};
pub use models::{
    capitalize, AbilityEffect, EvolutionNode, NamedResource, Pokemon, PokemonAbout, PokemonPage,
    PokemonSummary,
};
pub use state::{FetchState, StateCell};
