//! Data-driven catalog of PokéAPI lookups
//!
//! Every tool the server exposes is one row of [`CATALOG`]. Adding a tool
//! means adding a row; there is no per-tool code.

use std::sync::{Arc, OnceLock};

use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;

/// Arguments accepted by every catalog tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LookupArgs {
    /// Resource name or numeric id, case-insensitive (e.g. "pikachu" or "25")
    pub name: String,
}

/// How a lookup key becomes upstream requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    /// `GET {path}/{key}`
    Direct,
    /// `GET {via}/{key}`, read its numeric `id`, then `GET {path}/{id}`
    ResolveId { via: &'static str },
}

/// One catalog entry
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    /// Tool name offered to the model
    pub name: &'static str,
    /// Upstream resource path segment
    pub path: &'static str,
    /// Tool description offered to the model
    pub description: &'static str,
    /// Request plan for a key
    pub step: LookupStep,
}

const fn direct(name: &'static str, path: &'static str, description: &'static str) -> Endpoint {
    Endpoint {
        name,
        path,
        description,
        step: LookupStep::Direct,
    }
}

/// The full tool catalog
pub const CATALOG: &[Endpoint] = &[
    direct(
        "get_berry",
        "berry",
        "Fetch a berry by name or id (e.g. \"cheri\", \"pecha\", \"1\"): size, growth time, firmness, \
         flavors with potency, and natural gift effects.",
    ),
    direct(
        "get_berry_firmness",
        "berry-firmness",
        "Fetch a berry firmness by name or id (e.g. \"soft\", \"very-hard\", \"1\") and the berries \
         that share it.",
    ),
    direct(
        "get_berry_flavor",
        "berry-flavor",
        "Fetch a berry flavor by name or id (e.g. \"spicy\", \"sweet\", \"1\"): its contest type and \
         the berries carrying it.",
    ),
    direct(
        "get_contest_type",
        "contest-type",
        "Fetch a contest type by name or id (e.g. \"cool\", \"cute\", \"1\"): its berry flavor and \
         localized names.",
    ),
    direct(
        "get_contest_effect",
        "contest-effect",
        "Fetch a contest effect by numeric id (e.g. \"1\"): appeal, jam, and effect text.",
    ),
    direct(
        "get_encounter_method",
        "encounter-method",
        "Fetch an encounter method by name or id (e.g. \"walk\", \"surf\", \"old-rod\", \"1\"): how a \
         wild Pokémon can be met.",
    ),
    direct(
        "get_encounter_condition",
        "encounter-condition",
        "Fetch an encounter condition by name or id (e.g. \"time\", \"season\", \"1\"): the factor and \
         its possible values that change which wild Pokémon appear.",
    ),
    Endpoint {
        name: "get_evolution_chain",
        path: "evolution-chain",
        description: "Fetch the evolution chain for a Pokémon by name or Pokédex id (e.g. \"eevee\", \
                      \"133\"): every species in the family and the conditions for each evolution.",
        step: LookupStep::ResolveId { via: "pokemon" },
    },
    direct(
        "get_generation",
        "generation",
        "Fetch a game generation by name or id (e.g. \"generation-i\", \"3\"): the species, moves, \
         abilities, types, and region it introduced.",
    ),
    direct(
        "get_pokedex",
        "pokedex",
        "Fetch a Pokédex by name or id (e.g. \"kanto\", \"national\", \"2\"): its region and entries.",
    ),
    direct(
        "get_item",
        "item",
        "Fetch an item by name or id (e.g. \"potion\", \"master-ball\", \"1\"): cost, effect text, \
         category, attributes, and fling behaviour.",
    ),
    direct(
        "get_item_attribute",
        "item-attribute",
        "Fetch an item attribute by name or id (e.g. \"consumable\", \"usable-in-battle\", \"1\") and \
         the items that have it.",
    ),
    direct(
        "get_item_category",
        "item-category",
        "Fetch an item category by name or id (e.g. \"medicine\", \"1\"): its bag pocket and member \
         items.",
    ),
    direct(
        "get_item_fling_effect",
        "item-fling-effect",
        "Fetch a Fling effect by name or id (e.g. \"badly-poison\", \"1\"): what happens when an item \
         is thrown with the move Fling.",
    ),
    direct(
        "get_location",
        "location",
        "Fetch a location by name or id (e.g. \"canalave-city\", \"1\"): its region, areas, and game \
         indices.",
    ),
    direct(
        "get_location_area",
        "location-area",
        "Fetch a location area by name or id (e.g. \"canalave-city-area\", \"1\"): the Pokémon that \
         can be encountered there and how.",
    ),
    direct(
        "get_region",
        "region",
        "Fetch a region by name or id (e.g. \"kanto\", \"1\"): its locations, generation, and the \
         Pokédexes cataloguing it.",
    ),
    direct(
        "get_machine",
        "machine",
        "Fetch a TM/HM machine by numeric id (e.g. \"1\"): the item and the move it teaches.",
    ),
    direct(
        "get_move",
        "move",
        "Fetch a move by name or id (e.g. \"thunderbolt\", \"ice-beam\"): power, accuracy, PP, type, \
         damage class, and effect text.",
    ),
    direct(
        "get_pokemon",
        "pokemon",
        "Fetch a Pokémon by name or id (e.g. \"pikachu\", \"charizard\", \"25\"): base stats, types, \
         abilities, forms, sprites, height, and weight.",
    ),
];

/// Look up a catalog entry by tool name
pub fn find(name: &str) -> Option<&'static Endpoint> {
    CATALOG.iter().find(|e| e.name == name)
}

/// Input schema shared by every tool, generated from [`LookupArgs`]
///
/// # Panics
///
/// Panics if the generated schema is not a JSON object (should never happen).
pub fn input_schema() -> Arc<JsonObject> {
    static SCHEMA: OnceLock<Arc<JsonObject>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            let schema = schemars::schema_for!(LookupArgs);
            let serde_json::Value::Object(object) =
                serde_json::to_value(&schema).expect("generated schema serializes to JSON")
            else {
                panic!("generated schema must be a JSON object");
            };
            Arc::new(object)
        })
        .clone()
}

/// MCP tool descriptors for the whole catalog
pub fn tools() -> Vec<Tool> {
    let schema = input_schema();
    CATALOG
        .iter()
        .map(|e| Tool::new(e.name, e.description, Arc::clone(&schema)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_covers_every_resource() {
        let paths: HashSet<_> = CATALOG.iter().map(|e| e.path).collect();
        for path in [
            "berry",
            "berry-firmness",
            "berry-flavor",
            "contest-type",
            "contest-effect",
            "encounter-method",
            "encounter-condition",
            "evolution-chain",
            "generation",
            "pokedex",
            "item",
            "item-attribute",
            "item-category",
            "item-fling-effect",
            "location",
            "location-area",
            "region",
            "machine",
            "move",
            "pokemon",
        ] {
            assert!(paths.contains(path), "missing {path}");
        }
        assert_eq!(CATALOG.len(), 20);
    }

    #[test]
    fn tool_names_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn only_evolution_chain_resolves_an_id() {
        let composed: Vec<_> = CATALOG
            .iter()
            .filter(|e| e.step != LookupStep::Direct)
            .map(|e| e.name)
            .collect();
        assert_eq!(composed, ["get_evolution_chain"]);
        assert_eq!(
            find("get_evolution_chain").unwrap().step,
            LookupStep::ResolveId { via: "pokemon" }
        );
    }

    #[test]
    fn find_unknown_tool() {
        assert!(find("get_trainer").is_none());
        assert_eq!(find("get_move").unwrap().path, "move");
    }

    #[test]
    fn schema_requires_name_string() {
        let schema = input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(schema["required"], serde_json::json!(["name"]));
    }

    #[test]
    fn every_tool_publishes_the_lookup_schema() {
        for tool in tools() {
            assert!(!tool.input_schema.is_empty(), "{} has an empty schema", tool.name);
            assert_eq!(tool.input_schema["properties"]["name"]["type"], "string");
        }
    }

    #[test]
    fn tools_carry_descriptions() {
        let tools = tools();
        assert_eq!(tools.len(), CATALOG.len());
        assert!(tools.iter().all(|t| t.description.as_deref().is_some_and(|d| !d.is_empty())));
    }
}
