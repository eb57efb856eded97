//! Wire types for PokeAPI v2 payloads and the trimmed projections the UI
//! consumes.
//!
//! The raw payloads are huge; deserialization keeps only the fields the app
//! reads, and every field is defaulted so partial payloads still decode.

use serde::Deserialize;

/// A `{name, url}` reference as it appears all over the PokeAPI payloads.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    /// Canonical cache key for this resource.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// One page of the pokemon index listing.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct PokemonPage {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Raw pokemon detail payload.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Pokemon {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub species: NamedResource,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AbilitySlot {
    #[serde(default)]
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StatSlot {
    #[serde(default)]
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    #[serde(default)]
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type", default)]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: OfficialArtwork,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OfficialArtwork {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

impl Pokemon {
    /// Project the raw payload down to what the index grid needs.
    pub fn summary(&self) -> PokemonSummary {
        PokemonSummary {
            id: self.id.unwrap_or(0),
            image_url: self
                .sprites
                .other
                .official_artwork
                .front_default
                .clone()
                .unwrap_or_default(),
            types: self.types.iter().map(|t| t.kind.name.clone()).collect(),
        }
    }

    /// Height as feet and remaining inches (payload unit is decimetres).
    pub fn height_feet_inches(&self) -> (u32, u32) {
        let total_inches = f64::from(self.height.unwrap_or(0)) * 3.93701;
        ((total_inches / 12.0) as u32, (total_inches % 12.0) as u32)
    }

    /// Weight in kilograms (payload unit is hectograms).
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight.unwrap_or(0)) * 0.1
    }

    /// Weight in pounds.
    pub fn weight_lbs(&self) -> f64 {
        self.weight_kg() * 2.20462
    }
}

/// What the index grid shows per pokemon: dex number, artwork, type tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PokemonSummary {
    pub id: u32,
    pub image_url: String,
    pub types: Vec<String>,
}

/// Raw species payload backing the "about" tab.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PokemonSpecies {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<Genus>,
    #[serde(default)]
    pub gender_rate: i32,
    #[serde(default)]
    pub base_happiness: i32,
    #[serde(default)]
    pub hatch_counter: i32,
    #[serde(default)]
    pub egg_groups: Vec<NamedResource>,
    #[serde(default)]
    pub evolution_chain: NamedResource,
    #[serde(default)]
    pub growth_rate: NamedResource,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FlavorTextEntry {
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub language: NamedResource,
    #[serde(default)]
    pub version: NamedResource,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Genus {
    #[serde(default)]
    pub genus: String,
    #[serde(default)]
    pub language: NamedResource,
}

impl PokemonSpecies {
    /// Project the species payload down to the "about" tab fields.
    ///
    /// The flavour text is the English entry of the Ruby version, with line
    /// breaks flattened to spaces. `gender_rate` is female chance in eighths;
    /// genderless species report -1 and pass through as-is.
    pub fn about(&self) -> PokemonAbout {
        let female_percentage = f64::from(self.gender_rate) / 8.0 * 100.0;
        PokemonAbout {
            flavour_text: self
                .flavor_text_entries
                .iter()
                .find(|e| e.language.name == "en" && e.version.name == "ruby")
                .map(|e| e.flavor_text.replace('\n', " "))
                .unwrap_or_default(),
            genus: self
                .genera
                .iter()
                .find(|g| g.language.name == "en")
                .map(|g| g.genus.clone())
                .unwrap_or_default(),
            growth_rate: self.growth_rate.name.clone(),
            female_percentage,
            male_percentage: 100.0 - female_percentage,
            base_friendship: self.base_happiness,
            hatch_counter: self.hatch_counter,
            egg_groups: self.egg_groups.clone(),
            evolution_chain: self.evolution_chain.clone(),
        }
    }
}

/// The "about" tab content for one species.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PokemonAbout {
    pub flavour_text: String,
    pub genus: String,
    pub growth_rate: String,
    pub female_percentage: f64,
    pub male_percentage: f64,
    pub base_friendship: i32,
    pub hatch_counter: i32,
    pub egg_groups: Vec<NamedResource>,
    pub evolution_chain: NamedResource,
}

/// Raw ability payload.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Ability {
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub short_effect: String,
    #[serde(default)]
    pub language: NamedResource,
}

impl Ability {
    /// Pick the English effect texts out of the raw entry lists.
    ///
    /// Effect and short effect are selected independently, each skipping
    /// blank entries. The flavour text takes the last English entry, which is
    /// the most recent game generation.
    pub fn effect(&self) -> AbilityEffect {
        AbilityEffect {
            effect: self
                .effect_entries
                .iter()
                .find(|e| e.language.name == "en" && !e.effect.trim().is_empty())
                .map(|e| e.effect.clone())
                .unwrap_or_default(),
            short_effect: self
                .effect_entries
                .iter()
                .find(|e| e.language.name == "en" && !e.short_effect.trim().is_empty())
                .map(|e| e.short_effect.clone())
                .unwrap_or_default(),
            flavor_text: self
                .flavor_text_entries
                .iter()
                .rev()
                .find(|e| e.language.name == "en")
                .map(|e| e.flavor_text.replace('\n', " "))
                .unwrap_or_default(),
        }
    }
}

/// English effect texts for one ability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityEffect {
    pub effect: String,
    pub short_effect: String,
    pub flavor_text: String,
}

/// Raw evolution chain payload.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EvolutionChain {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub chain: ChainLink,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChainLink {
    #[serde(default)]
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
    #[serde(default)]
    pub is_baby: bool,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub trigger: NamedResource,
    #[serde(default)]
    pub time_of_day: String,
    #[serde(default)]
    pub needs_overworld_rain: bool,
    #[serde(default)]
    pub turn_upside_down: bool,
}

impl ChainLink {
    /// Reshape the wire chain into the tree the evolution tab walks.
    pub fn to_node(&self) -> EvolutionNode {
        EvolutionNode {
            species: self.species.clone(),
            evolution_details: self.evolution_details.clone(),
            evolves_to: self.evolves_to.iter().map(ChainLink::to_node).collect(),
        }
    }
}

/// One stage of an evolution line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvolutionNode {
    pub species: NamedResource,
    pub evolution_details: Vec<EvolutionDetail>,
    pub evolves_to: Vec<EvolutionNode>,
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
