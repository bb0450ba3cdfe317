//! YAML Export functionality
//!
//! Exports the whole document to YAML for a human-readable copy. A YAML file
//! with the same shape can also be imported.

use std::io::Write;

use crate::error::{FincalcError, FincalcResult};
use crate::services::import::ImportDocument;
use crate::storage::Storage;

/// Export the stored document to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FincalcResult<()> {
    let document = storage.ledger.snapshot()?;

    let export_err = |e: std::io::Error| FincalcError::Export(e.to_string());
    writeln!(writer, "# fincalc ledger export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339()).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", env!("CARGO_PKG_VERSION")).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &document).map_err(|e| FincalcError::Export(e.to_string()))?;

    Ok(())
}

/// Decode a YAML document for import
pub fn import_from_yaml(yaml_str: &str) -> FincalcResult<ImportDocument> {
    serde_yaml::from_str(yaml_str)
        .map_err(|e| FincalcError::Import(format!("Invalid document: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FincalcPaths;
    use crate::models::Document;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FincalcPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        storage.ledger.replace(Document::with_examples()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();

        let yaml_string = String::from_utf8(output).unwrap();
        assert!(yaml_string.starts_with("# fincalc ledger export"));
        assert!(yaml_string.contains("pricePerUnit"));
        assert!(yaml_string.contains("Team salaries"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let (_temp_dir, storage) = create_test_storage();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();

        let yaml_string = String::from_utf8(output).unwrap();
        let imported = import_from_yaml(&yaml_string).unwrap();

        let original = storage.ledger.snapshot().unwrap();
        assert_eq!(imported.items.unwrap(), original.items);
        assert_eq!(imported.expenses.unwrap(), original.expenses);
        assert_eq!(imported.settings, Some(original.settings));
    }
}
