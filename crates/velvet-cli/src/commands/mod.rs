pub mod arcanas;
pub mod init;
pub mod play;
pub mod stock;

use std::path::Path;

use velvet_core::Store;

/// Open an existing game database, refusing to create one implicitly.
fn open_store(db: &Path) -> Result<Store, String> {
    if !db.exists() {
        return Err(format!(
            "database {} not found (run `velvet init` first)",
            db.display()
        ));
    }
    Store::open(db).map_err(|e| e.to_string())
}
