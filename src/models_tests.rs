//! Tests for payload deserialization and the UI projections.

use crate::models::{
    capitalize, Ability, EvolutionChain, NamedResource, Pokemon, PokemonPage, PokemonSpecies,
};

// ── wire format ──────────────────────────────────────────────────────

#[test]
fn page_deserializes_index_listing() {
    let json = serde_json::json!({
        "count": 1302,
        "next": "https://pokeapi.co/api/v2/pokemon?offset=2000&limit=2000",
        "previous": null,
        "results": [
            { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
            { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
        ]
    });

    let page: PokemonPage = serde_json::from_value(json).unwrap();
    assert_eq!(page.count, 1302);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].name, "bulbasaur");
    assert_eq!(page.results[0].url, "https://pokeapi.co/api/v2/pokemon/1/");
    assert_eq!(page.results[1].name, "ivysaur");
    assert!(page.previous.is_none());
}

#[test]
fn named_resource_key_is_lowercase() {
    let entry = NamedResource::new("Pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
    assert_eq!(entry.key(), "pikachu");
}

#[test]
fn unknown_payload_fields_are_ignored() {
    let json = serde_json::json!({
        "id": 25,
        "name": "pikachu",
        "cries": { "latest": "https://example.com/25.ogg" },
        "moves": [],
        "past_abilities": []
    });

    let pokemon: Pokemon = serde_json::from_value(json).unwrap();
    assert_eq!(pokemon.name, "pikachu");
    assert_eq!(pokemon.id, Some(25));
}

// ── summary projection ───────────────────────────────────────────────

#[test]
fn summary_projects_id_artwork_and_types() {
    let json = serde_json::json!({
        "id": 1,
        "name": "bulbasaur",
        "sprites": {
            "front_default": "https://example.com/front/1.png",
            "other": {
                "official-artwork": { "front_default": "https://example.com/artwork/1.png" }
            }
        },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "" } },
            { "slot": 2, "type": { "name": "poison", "url": "" } }
        ]
    });

    let pokemon: Pokemon = serde_json::from_value(json).unwrap();
    let summary = pokemon.summary();

    assert_eq!(summary.id, 1);
    // The official artwork wins over the plain front sprite
    assert_eq!(summary.image_url, "https://example.com/artwork/1.png");
    assert_eq!(summary.types, ["grass", "poison"]);
}

#[test]
fn summary_defaults_missing_fields() {
    let pokemon: Pokemon =
        serde_json::from_value(serde_json::json!({ "name": "missingno" })).unwrap();
    let summary = pokemon.summary();

    assert_eq!(summary.id, 0);
    assert_eq!(summary.image_url, "");
    assert!(summary.types.is_empty());
}

#[test]
fn summary_tolerates_null_artwork() {
    let json = serde_json::json!({
        "id": 132,
        "name": "ditto",
        "sprites": {
            "front_default": null,
            "other": { "official-artwork": { "front_default": null } }
        }
    });

    let pokemon: Pokemon = serde_json::from_value(json).unwrap();
    assert_eq!(pokemon.summary().image_url, "");
}

// ── about projection ─────────────────────────────────────────────────

#[test]
fn about_picks_english_ruby_flavour_text() {
    let json = serde_json::json!({
        "flavor_text_entries": [
            {
                "flavor_text": "Falsche Sprache",
                "language": { "name": "de", "url": "" },
                "version": { "name": "ruby", "url": "" }
            },
            {
                "flavor_text": "Wrong version",
                "language": { "name": "en", "url": "" },
                "version": { "name": "sapphire", "url": "" }
            },
            {
                "flavor_text": "A strange seed\nwas planted",
                "language": { "name": "en", "url": "" },
                "version": { "name": "ruby", "url": "" }
            }
        ],
        "genera": [
            { "genus": "Samen", "language": { "name": "de", "url": "" } },
            { "genus": "Seed", "language": { "name": "en", "url": "" } }
        ],
        "gender_rate": 1,
        "base_happiness": 70,
        "hatch_counter": 20,
        "egg_groups": [
            { "name": "monster", "url": "" },
            { "name": "plant", "url": "" }
        ],
        "evolution_chain": { "url": "https://pokeapi.co/api/v2/evolution-chain/1/" },
        "growth_rate": { "name": "medium-slow", "url": "" }
    });

    let species: PokemonSpecies = serde_json::from_value(json).unwrap();
    let about = species.about();

    // Line breaks in the flavour text are flattened to spaces
    assert_eq!(about.flavour_text, "A strange seed was planted");
    assert_eq!(about.genus, "Seed");
    assert_eq!(about.growth_rate, "medium-slow");
    assert_eq!(about.base_friendship, 70);
    assert_eq!(about.hatch_counter, 20);
    assert_eq!(about.egg_groups.len(), 2);
    assert_eq!(about.egg_groups[0].name, "monster");
    assert!(about.evolution_chain.url.ends_with("/evolution-chain/1/"));
}

#[test]
fn about_computes_gender_split_from_eighths() {
    let even: PokemonSpecies =
        serde_json::from_value(serde_json::json!({ "gender_rate": 4 })).unwrap();
    let about = even.about();
    assert_eq!(about.female_percentage, 50.0);
    assert_eq!(about.male_percentage, 50.0);

    let all_male: PokemonSpecies =
        serde_json::from_value(serde_json::json!({ "gender_rate": 0 })).unwrap();
    assert_eq!(all_male.about().female_percentage, 0.0);
    assert_eq!(all_male.about().male_percentage, 100.0);
}

#[test]
fn about_defaults_when_no_english_entries() {
    let species: PokemonSpecies = serde_json::from_value(serde_json::json!({
        "flavor_text_entries": [
            {
                "flavor_text": "nur Deutsch",
                "language": { "name": "de", "url": "" },
                "version": { "name": "ruby", "url": "" }
            }
        ],
        "genera": []
    }))
    .unwrap();

    let about = species.about();
    assert_eq!(about.flavour_text, "");
    assert_eq!(about.genus, "");
    assert_eq!(about.growth_rate, "");
}

// ── ability effect ───────────────────────────────────────────────────

#[test]
fn ability_effect_skips_blank_and_foreign_entries() {
    let json = serde_json::json!({
        "effect_entries": [
            {
                "effect": "Kann Angreifer verbrennen.",
                "short_effect": "Verbrennt.",
                "language": { "name": "de", "url": "" }
            },
            {
                "effect": "",
                "short_effect": "May burn on contact.",
                "language": { "name": "en", "url": "" }
            },
            {
                "effect": "Has a 30% chance of burning attackers on contact.",
                "short_effect": "",
                "language": { "name": "en", "url": "" }
            }
        ],
        "flavor_text_entries": []
    });

    let ability: Ability = serde_json::from_value(json).unwrap();
    let effect = ability.effect();

    // Effect and short effect are picked independently, each skipping blanks
    assert_eq!(
        effect.effect,
        "Has a 30% chance of burning attackers on contact."
    );
    assert_eq!(effect.short_effect, "May burn on contact.");
    assert_eq!(effect.flavor_text, "");
}

#[test]
fn ability_flavor_takes_last_english_entry() {
    let json = serde_json::json!({
        "effect_entries": [],
        "flavor_text_entries": [
            { "flavor_text": "Old gen text", "language": { "name": "en", "url": "" } },
            { "flavor_text": "Texte français", "language": { "name": "fr", "url": "" } },
            { "flavor_text": "New gen\ntext", "language": { "name": "en", "url": "" } }
        ]
    });

    let ability: Ability = serde_json::from_value(json).unwrap();
    assert_eq!(ability.effect().flavor_text, "New gen text");
}

// ── evolution chain ──────────────────────────────────────────────────

#[test]
fn evolution_chain_reshapes_to_three_level_tree() {
    let json = serde_json::json!({
        "id": 1,
        "chain": {
            "species": { "name": "bulbasaur", "url": "" },
            "evolution_details": [],
            "is_baby": false,
            "evolves_to": [
                {
                    "species": { "name": "ivysaur", "url": "" },
                    "evolution_details": [
                        { "min_level": 16, "trigger": { "name": "level-up", "url": "" } }
                    ],
                    "is_baby": false,
                    "evolves_to": [
                        {
                            "species": { "name": "venusaur", "url": "" },
                            "evolution_details": [
                                { "min_level": 32, "trigger": { "name": "level-up", "url": "" } }
                            ],
                            "is_baby": false,
                            "evolves_to": []
                        }
                    ]
                }
            ]
        }
    });

    let chain: EvolutionChain = serde_json::from_value(json).unwrap();
    let tree = chain.chain.to_node();

    assert_eq!(tree.species.name, "bulbasaur");
    assert_eq!(tree.evolves_to.len(), 1);

    let second = &tree.evolves_to[0];
    assert_eq!(second.species.name, "ivysaur");
    assert_eq!(second.evolution_details[0].min_level, Some(16));

    let third = &second.evolves_to[0];
    assert_eq!(third.species.name, "venusaur");
    assert_eq!(third.evolution_details[0].min_level, Some(32));
    assert!(third.evolves_to.is_empty());
}

#[test]
fn evolution_chain_keeps_branches() {
    let json = serde_json::json!({
        "chain": {
            "species": { "name": "eevee", "url": "" },
            "evolution_details": [],
            "evolves_to": [
                { "species": { "name": "vaporeon", "url": "" }, "evolution_details": [], "evolves_to": [] },
                { "species": { "name": "jolteon", "url": "" }, "evolution_details": [], "evolves_to": [] },
                { "species": { "name": "flareon", "url": "" }, "evolution_details": [], "evolves_to": [] }
            ]
        }
    });

    let chain: EvolutionChain = serde_json::from_value(json).unwrap();
    let tree = chain.chain.to_node();

    assert_eq!(tree.evolves_to.len(), 3);
    assert_eq!(tree.evolves_to[1].species.name, "jolteon");
}

#[test]
fn evolution_detail_level_may_be_null() {
    let json = serde_json::json!({
        "chain": {
            "species": { "name": "pichu", "url": "" },
            "evolution_details": [],
            "evolves_to": [
                {
                    "species": { "name": "pikachu", "url": "" },
                    "evolution_details": [
                        { "min_level": null, "trigger": { "name": "use-item", "url": "" } }
                    ],
                    "evolves_to": []
                }
            ]
        }
    });

    let chain: EvolutionChain = serde_json::from_value(json).unwrap();
    let tree = chain.chain.to_node();
    assert_eq!(tree.evolves_to[0].evolution_details[0].min_level, None);
}

// ── unit helpers ─────────────────────────────────────────────────────

#[test]
fn height_converts_decimetres_to_feet_and_inches() {
    let pokemon = Pokemon {
        height: Some(7),
        ..Default::default()
    };
    assert_eq!(pokemon.height_feet_inches(), (2, 3));

    let tall = Pokemon {
        height: Some(20),
        ..Default::default()
    };
    assert_eq!(tall.height_feet_inches(), (6, 6));

    let unknown = Pokemon::default();
    assert_eq!(unknown.height_feet_inches(), (0, 0));
}

#[test]
fn weight_converts_hectograms() {
    let pokemon = Pokemon {
        weight: Some(69),
        ..Default::default()
    };
    assert!((pokemon.weight_kg() - 6.9).abs() < 1e-9);
    assert!((pokemon.weight_lbs() - 15.211878).abs() < 1e-6);
}

#[test]
fn capitalize_uppercases_first_char_only() {
    assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
    assert_eq!(capitalize("mr-mime"), "Mr-mime");
    assert_eq!(capitalize("Already"), "Already");
    assert_eq!(capitalize(""), "");
}
