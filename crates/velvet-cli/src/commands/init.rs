use std::fs;
use std::path::Path;

use colored::Colorize;

use velvet_core::Store;
use velvet_core::seed::{self, CatalogSeed};

pub fn run(db: &Path, catalog: Option<&Path>) -> Result<(), String> {
    if db.exists() {
        return Err(format!("{} already exists", db.display()));
    }

    let catalog_seed = match catalog {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            CatalogSeed::from_json(&json).map_err(|e| e.to_string())?
        }
        None => seed::default_catalog(),
    };

    let store = Store::open(db).map_err(|e| e.to_string())?;
    catalog_seed.apply(&store).map_err(|e| e.to_string())?;

    println!("  {} {}", "Created".bold(), db.display());
    println!(
        "  Seeded {} arcanas and {} personas",
        catalog_seed.arcanas.len(),
        catalog_seed.personas.len()
    );
    Ok(())
}
