use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use velvet_core::ArcanaId;
use velvet_core::catalog::Catalog;

pub fn run(db: &Path, personas_of: Option<i64>) -> Result<(), String> {
    let store = super::open_store(db)?;
    let catalog = Catalog::new(&store);

    match personas_of {
        Some(id) => {
            if store
                .arcana_by_id(ArcanaId(id))
                .map_err(|e| e.to_string())?
                .is_none()
            {
                return Err(format!("no such arcana: {id}"));
            }
            let personas = catalog
                .personas_by_arcana(ArcanaId(id))
                .map_err(|e| e.to_string())?;
            if personas.is_empty() {
                println!("  No personas for that arcana.");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Name", "Level"]);
            for persona in &personas {
                table.add_row(vec![persona.name.clone(), persona.level.to_string()]);
            }
            println!("{table}");
        }
        None => {
            let arcanas = catalog.arcanas().map_err(|e| e.to_string())?;
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Id", "Arcana"]);
            for arcana in &arcanas {
                table.add_row(vec![arcana.id.to_string(), arcana.name.clone()]);
            }
            println!("{table}");
            println!();
            println!("  {} arcanas", arcanas.len());
        }
    }
    Ok(())
}
