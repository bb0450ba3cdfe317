//! Storage initialization
//!
//! Handles first-run setup: a blank ledger is seeded with example lines so a
//! new user sees how items and salaries are totalled.

use tracing::info;

use crate::config::paths::FincalcPaths;
use crate::error::FincalcError;
use crate::models::Document;

use super::ledger::load_document;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Returns `true` if example data was written. An existing ledger that
/// already has lines or folders is left alone; an unreadable one is moved
/// aside first (see [`load_document`]).
pub fn initialize_storage(paths: &FincalcPaths) -> Result<bool, FincalcError> {
    paths.ensure_directories()?;

    let (document, _) = load_document(&paths.ledger_file());
    if !document.is_blank() {
        return Ok(false);
    }

    let seeded = Document {
        history: document.history,
        settings: document.settings,
        ..Document::with_examples()
    };
    write_json_atomic(paths.ledger_file(), &seeded)?;
    info!(path = %paths.ledger_file().display(), "seeded ledger with example data");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Folder, Item};
    use crate::storage::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_seeds_examples() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FincalcPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(!paths.is_initialized());
        assert!(initialize_storage(&paths).unwrap());
        assert!(paths.is_initialized());

        let doc: Document = read_json(paths.ledger_file()).unwrap().unwrap();
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.expenses.len(), 1);
    }

    #[test]
    fn test_initialize_keeps_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FincalcPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut doc = Document::default();
        doc.folders.push(Folder::new("Clients"));
        doc.items.push(Item::new("Mine", 1.0, 1.0, Default::default()));
        write_json_atomic(paths.ledger_file(), &doc).unwrap();

        assert!(!initialize_storage(&paths).unwrap());

        let reloaded: Document = read_json(paths.ledger_file()).unwrap().unwrap();
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn test_initialize_keeps_unreadable_ledger_aside() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FincalcPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let original = r#"{"items": [{"description": "Big job"}], "expenses": [{"category": "Alquiler"}]}"#;
        std::fs::write(paths.ledger_file(), original).unwrap();

        assert!(initialize_storage(&paths).unwrap());

        let backups: Vec<_> = std::fs::read_dir(paths.data_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.to_string_lossy().contains(".corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), original);
    }
}
