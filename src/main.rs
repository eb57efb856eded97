//! Pokedex - PokeAPI browser for the terminal
//!
//! Looks up one pokemon (detail card, about info, abilities, evolution line)
//! or searches the cached name index.

use clap::Parser;
use pokedex_core::{
    capitalize, ApiClient, EvolutionNode, Pokedex, DEFAULT_LIST_LIMIT, POKE_API_BASE,
};

/// Pokedex browser - looks up pokemon details from the PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
struct Args {
    /// Pokemon name to look up
    #[arg(required_unless_present = "search")]
    name: Option<String>,

    /// Search the name index instead of looking up a single pokemon
    #[arg(short, long)]
    search: Option<String>,

    /// PokeAPI endpoint to query
    #[arg(long, default_value = POKE_API_BASE)]
    base_url: String,

    /// How many index entries to fetch when searching
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let client = ApiClient::with_base_url(&args.base_url);
    let dex = Pokedex::with_list_limit(client, args.limit);

    if let Some(query) = args.search.as_deref() {
        run_search(&dex, query).await;
        return;
    }

    let name = args.name.unwrap_or_default();
    run_lookup(&dex, &name).await;
}

/// Search the name index and print the matching entries.
async fn run_search(dex: &Pokedex, query: &str) {
    if let Err(e) = dex.get_list().await {
        log::error!("Failed to load the pokemon index: {}", e);
        std::process::exit(1);
    }

    let matches = dex.search(query);
    println!("{} match(es) for '{}'", matches.len(), query);
    for entry in &matches {
        println!("  {}", capitalize(&entry.name));
    }
}

/// Print the detail card for one pokemon.
async fn run_lookup(dex: &Pokedex, name: &str) {
    let pokemon = match dex.get_pokemon(name).await {
        Ok(pokemon) => pokemon,
        Err(e) => {
            log::error!("Failed to fetch '{}': {}", name, e);
            std::process::exit(1);
        }
    };

    let types: Vec<String> = pokemon
        .types
        .iter()
        .map(|t| capitalize(&t.kind.name))
        .collect();
    let (feet, inches) = pokemon.height_feet_inches();

    println!(
        "#{:03} {}",
        pokemon.id.unwrap_or(0),
        capitalize(&pokemon.name)
    );
    println!("Type: {}", types.join(" / "));
    println!("Height: {}' {}\"", feet, inches);
    println!(
        "Weight: {:.1} kg ({:.1} lbs)",
        pokemon.weight_kg(),
        pokemon.weight_lbs()
    );

    match dex.get_about(&pokemon.species).await {
        Ok(about) => {
            println!();
            println!("{}", about.flavour_text);
            println!("Species: {}", about.genus);
            println!("Growth rate: {}", capitalize(&about.growth_rate));
            println!(
                "Gender: {}% male / {}% female",
                about.male_percentage, about.female_percentage
            );
            println!("Base friendship: {}", about.base_friendship);
            println!("Hatch counter: {}", about.hatch_counter);
            let groups: Vec<String> = about
                .egg_groups
                .iter()
                .map(|g| capitalize(&g.name))
                .collect();
            println!("Egg groups: {}", groups.join(", "));

            if !about.evolution_chain.url.is_empty() {
                match dex.get_evolution_chain(&about.evolution_chain).await {
                    Ok(chain) => {
                        println!();
                        println!("Evolution line:");
                        print_chain(&chain, 0);
                    }
                    Err(e) => log::error!("Failed to fetch evolution chain: {}", e),
                }
            }
        }
        Err(e) => log::error!("Failed to fetch species info for '{}': {}", name, e),
    }

    if !pokemon.abilities.is_empty() {
        println!();
        println!("Abilities:");
        for slot in &pokemon.abilities {
            match dex.get_ability_effect(&slot.ability).await {
                Ok(effect) => {
                    let marker = if slot.is_hidden { " (hidden)" } else { "" };
                    println!(
                        "  {}{}: {}",
                        capitalize(&slot.ability.name),
                        marker,
                        effect.short_effect
                    );
                }
                Err(e) => log::error!("Failed to fetch ability '{}': {}", slot.ability.name, e),
            }
        }
    }
}

/// Print one stage of the evolution tree, indented by depth.
fn print_chain(node: &EvolutionNode, depth: usize) {
    let level = node
        .evolution_details
        .first()
        .and_then(|d| d.min_level)
        .map(|l| format!(" (level {})", l))
        .unwrap_or_default();
    println!(
        "{}{}{}",
        "  ".repeat(depth + 1),
        capitalize(&node.species.name),
        level
    );
    for next in &node.evolves_to {
        print_chain(next, depth + 1);
    }
}
