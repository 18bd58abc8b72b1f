//! Read-only view over the persona catalog.
//!
//! The catalog is the master set of personas and arcanas seeded into
//! the store. Nothing here mutates; random selection from the returned
//! candidates is the caller's job.

use std::ops::RangeInclusive;

use crate::error::VelvetResult;
use crate::model::{Arcana, ArcanaId, Persona, PersonaId};
use crate::store::Store;

/// Pure-read facade over the store's catalog tables.
pub struct Catalog<'a> {
    store: &'a Store,
}

impl<'a> Catalog<'a> {
    /// Create a catalog view over a store.
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All catalog personas with level in the inclusive range, whose
    /// arcana is not in `exclude_arcanas` and whose id is not in
    /// `exclude_ids`. Order is unspecified.
    pub fn personas_in_level_range(
        &self,
        levels: RangeInclusive<u32>,
        exclude_arcanas: &[ArcanaId],
        exclude_ids: &[PersonaId],
    ) -> VelvetResult<Vec<Persona>> {
        self.store
            .personas_in_level_range(*levels.start(), *levels.end(), exclude_arcanas, exclude_ids)
    }

    /// All arcanas.
    pub fn arcanas(&self) -> VelvetResult<Vec<Arcana>> {
        self.store.arcanas()
    }

    /// All personas belonging to one arcana.
    pub fn personas_by_arcana(&self, arcana: ArcanaId) -> VelvetResult<Vec<Persona>> {
        self.store.personas_by_arcana(arcana)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let fool = store.insert_arcana("Fool").unwrap();
        let magician = store.insert_arcana("Magician").unwrap();
        store.insert_persona("Izanagi", 1, fool.id).unwrap();
        store.insert_persona("Orpheus", 3, fool.id).unwrap();
        store.insert_persona("Pixie", 2, magician.id).unwrap();
        store.insert_persona("Surt", 52, magician.id).unwrap();
        store
    }

    #[test]
    fn range_is_inclusive() {
        let store = test_store();
        let catalog = Catalog::new(&store);
        let found = catalog.personas_in_level_range(1..=3, &[], &[]).unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn excludes_arcanas() {
        let store = test_store();
        let catalog = Catalog::new(&store);
        let arcanas = catalog.arcanas().unwrap();
        let fool = arcanas.iter().find(|a| a.name == "Fool").unwrap();

        let found = catalog
            .personas_in_level_range(1..=99, &[fool.id], &[])
            .unwrap();
        assert!(found.iter().all(|p| p.arcana_id != fool.id));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn personas_by_arcana_sorted_by_level() {
        let store = test_store();
        let catalog = Catalog::new(&store);
        let arcanas = catalog.arcanas().unwrap();
        let magician = arcanas.iter().find(|a| a.name == "Magician").unwrap();

        let found = catalog.personas_by_arcana(magician.id).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Pixie");
        assert_eq!(found[1].name, "Surt");
    }

    #[test]
    fn empty_range_yields_nothing() {
        let store = test_store();
        let catalog = Catalog::new(&store);
        let found = catalog.personas_in_level_range(80..=90, &[], &[]).unwrap();
        assert!(found.is_empty());
    }
}
