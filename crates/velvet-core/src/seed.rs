//! Catalog seeding: the master list of arcanas and personas.
//!
//! The store starts empty; a [`CatalogSeed`] fills the reference
//! tables once. Seeds are JSON documents so a custom catalog can be
//! dropped in without recompiling; [`default_catalog`] is the built-in
//! one. Seeding is the only write path for arcanas and personas —
//! after it, only ownership ever changes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{VelvetError, VelvetResult};
use crate::model::ArcanaId;
use crate::progression::{LEVEL_CAP, LEVEL_MIN};
use crate::store::Store;

const DEFAULT_CATALOG_JSON: &str = include_str!("default_catalog.json");

/// One persona row of a catalog seed, referencing its arcana by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSeed {
    /// Persona name.
    pub name: String,
    /// Level in 1-99.
    pub level: u32,
    /// Name of the arcana this persona belongs to; must appear in the
    /// seed's arcana list.
    pub arcana: String,
}

/// A full catalog: arcanas plus the personas that reference them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSeed {
    /// Arcana names, in insertion order.
    pub arcanas: Vec<String>,
    /// Personas, each tagged with an arcana name.
    pub personas: Vec<PersonaSeed>,
}

impl CatalogSeed {
    /// Parse a seed from its JSON form.
    pub fn from_json(json: &str) -> VelvetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert every arcana and persona into the store. Fails without
    /// partial effect on a persona referencing an undeclared arcana
    /// name or carrying a level outside 1-99 (checked before any
    /// insert).
    pub fn apply(&self, store: &Store) -> VelvetResult<()> {
        for persona in &self.personas {
            if !self.arcanas.contains(&persona.arcana) {
                return Err(VelvetError::UnknownArcana(persona.arcana.clone()));
            }
            if !(LEVEL_MIN..=LEVEL_CAP).contains(&persona.level) {
                return Err(VelvetError::InvalidLevel {
                    name: persona.name.clone(),
                    level: persona.level,
                });
            }
        }

        let mut ids: HashMap<&str, ArcanaId> = HashMap::new();
        for name in &self.arcanas {
            let arcana = store.insert_arcana(name)?;
            ids.insert(name.as_str(), arcana.id);
        }
        for persona in &self.personas {
            let arcana_id = ids[persona.arcana.as_str()];
            store.insert_persona(&persona.name, persona.level, arcana_id)?;
        }
        Ok(())
    }
}

/// The built-in catalog: the major arcanas with personas spread over
/// the full 1-99 level range.
pub fn default_catalog() -> CatalogSeed {
    CatalogSeed::from_json(DEFAULT_CATALOG_JSON)
        .unwrap_or_else(|e| unreachable!("built-in catalog is valid JSON: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_parses() {
        let seed = default_catalog();
        assert!(seed.arcanas.len() >= 10);
        assert!(seed.personas.len() >= 30);
    }

    #[test]
    fn default_catalog_is_well_formed() {
        let seed = default_catalog();
        for persona in &seed.personas {
            assert!((1..=99).contains(&persona.level), "{}", persona.name);
            assert!(seed.arcanas.contains(&persona.arcana), "{}", persona.name);
        }
        // Level-1 players must always have something to summon.
        assert!(seed.personas.iter().any(|p| p.level == 1));
    }

    #[test]
    fn apply_populates_the_store() {
        let store = Store::open_in_memory().unwrap();
        let seed = default_catalog();
        seed.apply(&store).unwrap();

        let arcanas = store.arcanas().unwrap();
        assert_eq!(arcanas.len(), seed.arcanas.len());

        let fool = arcanas.iter().find(|a| a.name == "Fool").unwrap();
        assert!(!store.personas_by_arcana(fool.id).unwrap().is_empty());
    }

    #[test]
    fn apply_rejects_undeclared_arcana() {
        let store = Store::open_in_memory().unwrap();
        let seed = CatalogSeed {
            arcanas: vec!["Fool".to_string()],
            personas: vec![PersonaSeed {
                name: "Pixie".to_string(),
                level: 2,
                arcana: "Magician".to_string(),
            }],
        };
        let result = seed.apply(&store);
        assert!(matches!(result, Err(VelvetError::UnknownArcana(_))));
        // Checked up front: nothing was inserted.
        assert!(store.arcanas().unwrap().is_empty());
    }

    #[test]
    fn apply_rejects_out_of_range_level() {
        let store = Store::open_in_memory().unwrap();
        let seed = CatalogSeed {
            arcanas: vec!["Fool".to_string()],
            personas: vec![PersonaSeed {
                name: "Overlord".to_string(),
                level: 150,
                arcana: "Fool".to_string(),
            }],
        };
        let result = seed.apply(&store);
        assert!(matches!(
            result,
            Err(VelvetError::InvalidLevel { level: 150, .. })
        ));
        assert!(store.arcanas().unwrap().is_empty());

        let seed = CatalogSeed {
            arcanas: vec!["Fool".to_string()],
            personas: vec![PersonaSeed {
                name: "Void".to_string(),
                level: 0,
                arcana: "Fool".to_string(),
            }],
        };
        assert!(matches!(
            seed.apply(&store),
            Err(VelvetError::InvalidLevel { level: 0, .. })
        ));
    }

    #[test]
    fn custom_seed_from_json() {
        let json = r#"{
            "arcanas": ["Fool"],
            "personas": [{ "name": "Orpheus", "level": 1, "arcana": "Fool" }]
        }"#;
        let seed = CatalogSeed::from_json(json).unwrap();
        let store = Store::open_in_memory().unwrap();
        seed.apply(&store).unwrap();
        assert_eq!(store.arcanas().unwrap().len(), 1);
    }

    #[test]
    fn malformed_json_is_a_seed_error() {
        let result = CatalogSeed::from_json("{ not json");
        assert!(matches!(result, Err(VelvetError::Seed(_))));
    }
}
