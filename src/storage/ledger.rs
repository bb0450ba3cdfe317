//! Ledger repository for JSON storage
//!
//! Owns the single canonical [`Document`] and persists it to ledger.json.
//! Every mutation runs on a working copy under the write lock, is committed
//! only if it succeeds, and is written through to disk before the lock is
//! released, so two mutations never interleave.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{FincalcError, FincalcResult};
use crate::models::Document;

use super::file_io::{read_json, write_json_atomic};

/// How the document was obtained by [`LedgerRepository::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The persisted document was decoded
    Loaded,
    /// Nothing was persisted yet; the default document is in use
    Missing,
    /// The persisted document was unreadable; the default document is in use
    ///
    /// `backup` is where the unreadable file was moved, so the next save
    /// cannot overwrite it.
    Recovered {
        reason: String,
        backup: Option<PathBuf>,
    },
}

/// Path an unreadable ledger is moved to: `<file>.corrupt-<timestamp>`
fn corrupt_backup_path(path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".corrupt-{}", stamp));
    path.with_file_name(name)
}

/// Read a document from disk, falling back to the default on any failure
///
/// An unreadable file is renamed out of the way before the default is
/// returned.
pub fn load_document(path: &Path) -> (Document, LoadOutcome) {
    match read_json::<Document, _>(path) {
        Ok(Some(document)) => (document, LoadOutcome::Loaded),
        Ok(None) => (Document::default(), LoadOutcome::Missing),
        Err(e) => {
            let target = corrupt_backup_path(path);
            let backup = match fs::rename(path, &target) {
                Ok(()) => Some(target),
                Err(rename_err) => {
                    warn!(path = %path.display(), error = %rename_err, "could not move unreadable ledger aside");
                    None
                }
            };

            warn!(
                path = %path.display(),
                backup = %backup.as_deref().map(|b| b.display().to_string()).unwrap_or_default(),
                error = %e,
                "ledger unreadable, starting from defaults"
            );
            (
                Document::default(),
                LoadOutcome::Recovered {
                    reason: e.to_string(),
                    backup,
                },
            )
        }
    }
}

/// Repository for the ledger document
pub struct LedgerRepository {
    path: PathBuf,
    data: RwLock<Document>,
}

impl LedgerRepository {
    /// Create a new repository holding the default document
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Document::default()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document from disk
    ///
    /// Never fails: a missing or corrupt file yields the default document.
    pub fn load(&self) -> FincalcResult<LoadOutcome> {
        let (document, outcome) = load_document(&self.path);

        let mut data = self.data.write().map_err(|e| {
            FincalcError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = document;

        debug!(outcome = ?outcome, "ledger loaded");
        Ok(outcome)
    }

    /// Save the current document to disk
    pub fn save(&self) -> FincalcResult<()> {
        let data = self.data.read().map_err(|e| {
            FincalcError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_json_atomic(&self.path, &*data)
    }

    /// Get a deep copy of the whole document
    pub fn snapshot(&self) -> FincalcResult<Document> {
        self.read(Document::clone)
    }

    /// Run a read-only query against the document
    pub fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> FincalcResult<T> {
        let data = self.data.read().map_err(|e| {
            FincalcError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(f(&data))
    }

    /// Apply a mutation and write the result through to disk
    ///
    /// If `f` fails, the document is left exactly as it was. If the write
    /// fails, the in-memory document keeps the change and the error is
    /// returned to the caller.
    pub fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Document) -> FincalcResult<T>,
    ) -> FincalcResult<T> {
        let mut data = self.data.write().map_err(|e| {
            FincalcError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut working = data.clone();
        let output = f(&mut working)?;
        *data = working;

        write_json_atomic(&self.path, &*data)?;
        Ok(output)
    }

    /// Replace the whole document and save it
    pub fn replace(&self, document: Document) -> FincalcResult<()> {
        self.mutate(|doc| {
            *doc = document;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, Measure};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LedgerRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let repo = LedgerRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_missing_file_loads_default() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.load().unwrap(), LoadOutcome::Missing);
        assert_eq!(repo.snapshot().unwrap(), Document::default());
    }

    #[test]
    fn test_corrupt_file_loads_default() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(repo.path(), "{\"items\": [ oops").unwrap();

        let outcome = repo.load().unwrap();
        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));

        let doc = repo.snapshot().unwrap();
        assert!(doc.items.is_empty());
        assert!(doc.expenses.is_empty());
        assert!(doc.folders.is_empty());
        assert!(doc.history.is_empty());
        assert_eq!(doc.settings.exchange_rate.value(), 350.0);
        assert!(!doc.settings.show_usd);
    }

    #[test]
    fn test_wrong_shape_loads_default() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(repo.path(), r#"{"items": 42}"#).unwrap();

        assert!(matches!(repo.load().unwrap(), LoadOutcome::Recovered { .. }));
        assert_eq!(repo.snapshot().unwrap(), Document::default());
    }

    #[test]
    fn test_unreadable_file_is_kept_aside() {
        let (temp_dir, repo) = create_test_repo();
        let original = r#"{"items": [{"description": "Big job"}],
            "expenses": [{"category": "Alquiler", "price": 5}],
            "folders": [{"name": "Clients"}]}"#;
        fs::write(repo.path(), original).unwrap();

        let backup = match repo.load().unwrap() {
            LoadOutcome::Recovered { backup, .. } => backup.unwrap(),
            other => panic!("expected recovery, got {:?}", other),
        };
        assert!(backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("ledger.json.corrupt-"));

        repo.mutate(|doc| {
            doc.items.push(Item::default());
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&backup).unwrap(), original);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_mutate_writes_through() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.mutate(|doc| {
            doc.items.push(Item::new("Pipe", 20.0, 10.0, Measure::Meter));
            Ok(())
        })
        .unwrap();

        let reloaded = LedgerRepository::new(repo.path().to_path_buf());
        assert_eq!(reloaded.load().unwrap(), LoadOutcome::Loaded);
        assert_eq!(reloaded.snapshot().unwrap().items.len(), 1);
    }

    #[test]
    fn test_failed_mutation_leaves_document_untouched() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let result: FincalcResult<()> = repo.mutate(|doc| {
            doc.items.push(Item::default());
            Err(FincalcError::Validation("rejected".into()))
        });

        assert!(result.unwrap_err().is_validation());
        assert!(repo.snapshot().unwrap().items.is_empty());
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_replace() {
        let (_temp_dir, repo) = create_test_repo();
        repo.replace(Document::with_examples()).unwrap();

        assert_eq!(repo.read(|doc| doc.items.len()).unwrap(), 1);
        assert!(repo.path().exists());
    }
}
