//! Fetch-or-cached repository over the PokeAPI.
//!
//! One [`Pokedex`] owns the per-resource cache maps and the observable state
//! cells the UI watches. Cache keys are lowercase names; values are inserted
//! on success only, so a failed fetch is retried the next time the resource
//! is asked for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::{watch, RwLock};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    Ability, AbilityEffect, EvolutionChain, EvolutionNode, NamedResource, Pokemon, PokemonAbout,
    PokemonPage, PokemonSpecies, PokemonSummary,
};
use crate::state::{FetchState, StateCell};

/// Pause before grid-driven fetches so a fast scroll does not burst the API.
const FETCH_DELAY: Duration = Duration::from_millis(100);

/// Index entries one list request asks for; large enough to cover the whole
/// dex in a single page.
pub const DEFAULT_LIST_LIMIT: u32 = 2000;

/// Repository facade the UI talks to.
///
/// Locks are held only to check or insert a cache entry, never across a
/// network await. Concurrent fetches for the same key are not coalesced: two
/// callers that both miss the cache both hit the network and the later
/// insert wins, carrying the same payload.
pub struct Pokedex {
    client: ApiClient,
    list_limit: u32,
    list: StateCell<PokemonPage>,
    pokemon_cache: Arc<RwLock<HashMap<String, Pokemon>>>,
    pokemon_data: StateCell<Pokemon>,
    summary_cache: Arc<RwLock<HashMap<String, PokemonSummary>>>,
    ability_cache: Arc<RwLock<HashMap<String, AbilityEffect>>>,
    about: StateCell<PokemonAbout>,
    evolution: StateCell<EvolutionNode>,
}

impl Pokedex {
    pub fn new(client: ApiClient) -> Self {
        info!("Creating pokedex repository");
        Self::with_list_limit(client, DEFAULT_LIST_LIMIT)
    }

    /// Repository with a custom index page size.
    pub fn with_list_limit(client: ApiClient, list_limit: u32) -> Self {
        Self {
            client,
            list_limit,
            list: StateCell::new(),
            pokemon_cache: Arc::new(RwLock::new(HashMap::new())),
            pokemon_data: StateCell::new(),
            summary_cache: Arc::new(RwLock::new(HashMap::new())),
            ability_cache: Arc::new(RwLock::new(HashMap::new())),
            about: StateCell::new(),
            evolution: StateCell::new(),
        }
    }

    /// The full name index, fetched once and reused for the process lifetime.
    pub async fn get_list(&self) -> ApiResult<PokemonPage> {
        if let FetchState::Success(page) = self.list.get() {
            debug!("Pokemon list already loaded with {} entries", page.results.len());
            return Ok(page);
        }

        self.list.set(FetchState::Loading);
        info!("Fetching pokemon index");
        let url = self
            .client
            .endpoint(&format!("pokemon?offset=0&limit={}", self.list_limit));
        let result = self.client.get::<PokemonPage>(&url).await;
        if let Err(e) = &result {
            error!("Failed to fetch pokemon index: {}", e);
        }
        self.list.set(FetchState::from_result(&result));
        result
    }

    /// Full detail payload for one pokemon, memoized by lowercase name.
    ///
    /// The result is also published to the detail state cell, so the open
    /// detail page always tracks the pokemon requested last.
    pub async fn get_pokemon(&self, name: &str) -> ApiResult<Pokemon> {
        let key = name.to_lowercase();

        {
            let cache = self.pokemon_cache.read().await;
            if let Some(hit) = cache.get(&key) {
                debug!("Pokemon '{}' served from cache", key);
                self.pokemon_data.set(FetchState::Success(hit.clone()));
                return Ok(hit.clone());
            }
        }

        self.pokemon_data.set(FetchState::Loading);
        let url = self.client.endpoint(&format!("pokemon/{}", key));
        let result = self.client.get::<Pokemon>(&url).await;
        match &result {
            Ok(pokemon) => {
                let mut cache = self.pokemon_cache.write().await;
                cache.insert(key, pokemon.clone());
            }
            Err(e) => error!("Failed to fetch pokemon '{}': {}", key, e),
        }
        self.pokemon_data.set(FetchState::from_result(&result));
        result
    }

    /// Grid summary for one index entry, memoized by lowercase name.
    ///
    /// Waits [`FETCH_DELAY`] before going to the network: scrolling the grid
    /// fires one of these per visible row.
    pub async fn get_summary(&self, entry: &NamedResource) -> ApiResult<PokemonSummary> {
        let key = entry.key();

        {
            let cache = self.summary_cache.read().await;
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }

        tokio::time::sleep(FETCH_DELAY).await;
        let url = self.resource_url(entry, "pokemon");
        let result = self
            .client
            .get::<Pokemon>(&url)
            .await
            .map(|pokemon| pokemon.summary());
        match &result {
            Ok(summary) => {
                let mut cache = self.summary_cache.write().await;
                cache.insert(key, summary.clone());
            }
            Err(e) => error!("Failed to fetch details for '{}': {}", key, e),
        }
        result
    }

    /// English effect text for one ability, memoized by lowercase name.
    pub async fn get_ability_effect(&self, entry: &NamedResource) -> ApiResult<AbilityEffect> {
        let key = entry.key();

        {
            let cache = self.ability_cache.read().await;
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }

        tokio::time::sleep(FETCH_DELAY).await;
        let url = self.resource_url(entry, "ability");
        let result = self
            .client
            .get::<Ability>(&url)
            .await
            .map(|ability| ability.effect());
        match &result {
            Ok(effect) => {
                let mut cache = self.ability_cache.write().await;
                cache.insert(key, effect.clone());
            }
            Err(e) => error!("Failed to fetch ability '{}': {}", key, e),
        }
        result
    }

    /// The "about" tab for one species.
    ///
    /// Not cached: the about panel is only open for one pokemon at a time.
    pub async fn get_about(&self, entry: &NamedResource) -> ApiResult<PokemonAbout> {
        self.about.set(FetchState::Loading);
        tokio::time::sleep(FETCH_DELAY).await;

        let url = self.resource_url(entry, "pokemon-species");
        let result = self
            .client
            .get::<PokemonSpecies>(&url)
            .await
            .map(|species| species.about());
        if let Err(e) = &result {
            error!("Failed to fetch species '{}': {}", entry.key(), e);
        }
        self.about.set(FetchState::from_result(&result));
        result
    }

    /// Evolution tree for one species. Not cached; fetched per visit.
    pub async fn get_evolution_chain(&self, entry: &NamedResource) -> ApiResult<EvolutionNode> {
        self.evolution.set(FetchState::Loading);

        let result = self
            .client
            .get::<EvolutionChain>(&entry.url)
            .await
            .map(|chain| chain.chain.to_node());
        if let Err(e) = &result {
            error!("Failed to fetch evolution chain from '{}': {}", entry.url, e);
        }
        self.evolution.set(FetchState::from_result(&result));
        result
    }

    /// Filter the loaded index by name substring.
    ///
    /// An empty query returns every entry; an index that has not loaded yet
    /// returns nothing.
    pub fn search(&self, query: &str) -> Vec<NamedResource> {
        match self.list.get() {
            FetchState::Success(page) => page
                .results
                .into_iter()
                .filter(|entry| query.is_empty() || entry.name.contains(query))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Snapshot of every cached grid summary.
    pub async fn summaries(&self) -> HashMap<String, PokemonSummary> {
        self.summary_cache.read().await.clone()
    }

    /// Snapshot of every cached ability effect.
    pub async fn ability_effects(&self) -> HashMap<String, AbilityEffect> {
        self.ability_cache.read().await.clone()
    }

    /// Cached full payload for `name`, if any, without fetching.
    pub async fn cached_pokemon(&self, name: &str) -> Option<Pokemon> {
        self.pokemon_cache
            .read()
            .await
            .get(&name.to_lowercase())
            .cloned()
    }

    /// Current state of the index list.
    pub fn list_state(&self) -> FetchState<PokemonPage> {
        self.list.get()
    }

    /// Watch the index list as it loads.
    pub fn subscribe_list(&self) -> watch::Receiver<FetchState<PokemonPage>> {
        self.list.subscribe()
    }

    /// Current state of the open detail page.
    pub fn pokemon_state(&self) -> FetchState<Pokemon> {
        self.pokemon_data.get()
    }

    pub fn subscribe_pokemon(&self) -> watch::Receiver<FetchState<Pokemon>> {
        self.pokemon_data.subscribe()
    }

    /// Current state of the about tab.
    pub fn about_state(&self) -> FetchState<PokemonAbout> {
        self.about.get()
    }

    pub fn subscribe_about(&self) -> watch::Receiver<FetchState<PokemonAbout>> {
        self.about.subscribe()
    }

    /// Current state of the evolution tab.
    pub fn evolution_state(&self) -> FetchState<EvolutionNode> {
        self.evolution.get()
    }

    pub fn subscribe_evolution(&self) -> watch::Receiver<FetchState<EvolutionNode>> {
        self.evolution.subscribe()
    }

    fn resource_url(&self, entry: &NamedResource, kind: &str) -> String {
        if entry.url.is_empty() {
            self.client.endpoint(&format!("{}/{}", kind, entry.key()))
        } else {
            entry.url.clone()
        }
    }
}

#[cfg(test)]
#[path = "dex_tests.rs"]
mod tests;
