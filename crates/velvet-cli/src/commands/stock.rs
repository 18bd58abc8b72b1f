use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use velvet_core::{GameConfig, GameSession};

pub fn run(db: &Path, name: &str) -> Result<(), String> {
    let store = super::open_store(db)?;
    let session =
        GameSession::open(store, name, GameConfig::default()).map_err(|e| e.to_string())?;

    let entries = session.list_stock().map_err(|e| e.to_string())?;
    if entries.is_empty() {
        println!("  Stock is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Level", "Arcana"]);
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.name.clone(),
            entry.level.to_string(),
            entry.arcana_name.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {}/{} personas in stock",
        entries.len(),
        session.stock_capacity()
    );
    Ok(())
}
