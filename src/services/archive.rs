//! Archive service
//!
//! Folders hold jobs: frozen copies of the live ledger (or of one item) with
//! their totals. A job can be inserted back into the ledger any number of
//! times; each insertion appends fresh copies of its lines.

use chrono::Utc;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{FincalcError, FincalcResult};
use crate::models::{
    Amount, Document, Expense, Folder, FolderId, Item, ItemId, Job, JobId,
};
use crate::storage::Storage;

use super::calculator;

/// A folder with its jobs' summaries recomputed from their lines
#[derive(Debug, Clone)]
pub struct FolderSummary {
    pub folder: Folder,
    /// Sum of the net balances of all jobs
    pub net_balance: Amount,
}

/// Suffix appended to an item's description when it is archived on its own
pub const SINGLE_ITEM_SUFFIX: &str = " (item)";

/// Create an empty folder
pub fn create_folder(doc: &mut Document, name: &str) -> FincalcResult<Folder> {
    let folder = Folder::new(name.trim());
    folder
        .validate()
        .map_err(|e| FincalcError::Validation(e.to_string()))?;

    doc.folders.push(folder.clone());
    Ok(folder)
}

fn target_folder<'d>(doc: &'d mut Document, folder_id: &FolderId) -> FincalcResult<&'d mut Folder> {
    doc.folder_mut(folder_id).ok_or_else(|| {
        FincalcError::Validation(format!("No folder selected: {} does not exist", folder_id))
    })
}

fn new_job(name: &str, items: Vec<Item>, expenses: Vec<Expense>) -> Job {
    let summary = calculator::snapshot_summary(&items, &expenses);
    Job {
        id: JobId::new(),
        name: name.to_string(),
        created_at: Utc::now(),
        items,
        expenses,
        summary,
    }
}

/// Archive a copy of the live ledger as a new job in a folder
///
/// Requires an existing folder and a non-empty name.
pub fn archive_ledger(doc: &mut Document, folder_id: &FolderId, job_name: &str) -> FincalcResult<Job> {
    let job_name = job_name.trim();
    if job_name.is_empty() {
        return Err(FincalcError::Validation("Job name cannot be empty".into()));
    }

    let job = new_job(job_name, doc.items.clone(), doc.expenses.clone());
    target_folder(doc, folder_id)?.jobs.push(job.clone());
    Ok(job)
}

/// Archive a copy of one live item as a new job in a folder
pub fn archive_item(doc: &mut Document, folder_id: &FolderId, item_id: &ItemId) -> FincalcResult<Job> {
    let item = doc
        .item(item_id)
        .cloned()
        .ok_or_else(|| FincalcError::item_not_found(item_id.as_str()))?;

    let name = format!("{}{}", item.description, SINGLE_ITEM_SUFFIX);
    let job = new_job(&name, vec![item], Vec::new());
    target_folder(doc, folder_id)?.jobs.push(job.clone());
    Ok(job)
}

/// Append copies of a job's lines to the live ledger under fresh IDs
///
/// Returns the number of items and expenses inserted.
pub fn insert_job(doc: &mut Document, folder_id: &FolderId, job_id: &JobId) -> FincalcResult<(usize, usize)> {
    let folder = doc
        .folder(folder_id)
        .ok_or_else(|| FincalcError::folder_not_found(folder_id.as_str()))?;
    let job = folder
        .job(job_id)
        .ok_or_else(|| FincalcError::job_not_found(job_id.as_str()))?;

    let items: Vec<_> = job.items.iter().map(Item::with_fresh_id).collect();
    let expenses: Vec<_> = job.expenses.iter().map(Expense::with_fresh_id).collect();
    let counts = (items.len(), expenses.len());

    doc.items.extend(items);
    doc.expenses.extend(expenses);
    Ok(counts)
}

/// Remove a folder together with all of its jobs
pub fn delete_folder(doc: &mut Document, folder_id: &FolderId) -> FincalcResult<Folder> {
    let index = doc
        .folders
        .iter()
        .position(|f| &f.id == folder_id)
        .ok_or_else(|| FincalcError::folder_not_found(folder_id.as_str()))?;
    Ok(doc.folders.remove(index))
}

/// Remove one job; the folder stays even when it becomes empty
pub fn delete_job(doc: &mut Document, folder_id: &FolderId, job_id: &JobId) -> FincalcResult<Job> {
    let folder = doc
        .folder_mut(folder_id)
        .ok_or_else(|| FincalcError::folder_not_found(folder_id.as_str()))?;
    let index = folder
        .jobs
        .iter()
        .position(|j| &j.id == job_id)
        .ok_or_else(|| FincalcError::job_not_found(job_id.as_str()))?;
    Ok(folder.jobs.remove(index))
}

/// Rewrite every job's cached summary from its lines
pub fn refresh_job_summaries(folder: &mut Folder) {
    for job in &mut folder.jobs {
        job.summary = calculator::snapshot_summary(&job.items, &job.expenses);
    }
}

/// Service for folders and jobs
pub struct ArchiveService<'a> {
    storage: &'a Storage,
}

impl<'a> ArchiveService<'a> {
    /// Create a new archive service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Find a folder by ID or name (case-insensitive)
    pub fn find_folder(&self, identifier: &str) -> FincalcResult<Option<Folder>> {
        self.storage.ledger.read(|doc| {
            doc.find_folder(identifier)
                .or_else(|| {
                    let id = super::match_id(doc.folders.iter().map(|f| f.id.as_str()), identifier)?;
                    doc.folders.iter().find(|f| f.id.as_str() == id)
                })
                .cloned()
        })
    }

    /// Resolve a folder identifier to its ID, failing if it does not exist
    pub fn resolve_folder(&self, identifier: &str) -> FincalcResult<FolderId> {
        self.find_folder(identifier)?
            .map(|f| f.id)
            .ok_or_else(|| FincalcError::folder_not_found(identifier))
    }

    /// Resolve a full or unambiguous partial job ID within a folder
    pub fn resolve_job(&self, folder_id: &FolderId, identifier: &str) -> FincalcResult<JobId> {
        self.storage
            .ledger
            .read(|doc| {
                doc.folder(folder_id).and_then(|folder| {
                    super::match_id(folder.jobs.iter().map(|j| j.id.as_str()), identifier)
                        .map(JobId::from_string)
                })
            })?
            .ok_or_else(|| FincalcError::job_not_found(identifier))
    }

    /// All folders, with job summaries recomputed
    pub fn list(&self) -> FincalcResult<Vec<FolderSummary>> {
        self.storage.ledger.read(|doc| {
            doc.folders
                .iter()
                .cloned()
                .map(|mut folder| {
                    refresh_job_summaries(&mut folder);
                    let net_balance = folder.jobs.iter().map(|j| j.summary.net_balance()).sum();
                    FolderSummary { folder, net_balance }
                })
                .collect()
        })
    }

    /// Get a folder with its job summaries recomputed
    pub fn get(&self, folder_id: &FolderId) -> FincalcResult<Folder> {
        let mut folder = self
            .storage
            .ledger
            .read(|doc| doc.folder(folder_id).cloned())?
            .ok_or_else(|| FincalcError::folder_not_found(folder_id.as_str()))?;
        refresh_job_summaries(&mut folder);
        Ok(folder)
    }

    /// Create a folder
    pub fn create_folder(&self, name: &str) -> FincalcResult<Folder> {
        let folder = self.storage.ledger.mutate(|doc| create_folder(doc, name))?;

        info!(id = %folder.id, name = %folder.name, "folder created");
        self.storage.log_create(
            EntityType::Folder,
            folder.id.as_str(),
            Some(folder.name.clone()),
            &folder,
        );
        Ok(folder)
    }

    /// Archive the live ledger as a job
    pub fn archive_ledger(&self, folder_id: &FolderId, job_name: &str) -> FincalcResult<Job> {
        let job = self
            .storage
            .ledger
            .mutate(|doc| archive_ledger(doc, folder_id, job_name))?;
        self.log_job_created(&job);
        Ok(job)
    }

    /// Archive one live item as a job
    pub fn archive_item(&self, folder_id: &FolderId, item_id: &ItemId) -> FincalcResult<Job> {
        let job = self
            .storage
            .ledger
            .mutate(|doc| archive_item(doc, folder_id, item_id))?;
        self.log_job_created(&job);
        Ok(job)
    }

    fn log_job_created(&self, job: &Job) {
        info!(id = %job.id, items = job.items.len(), expenses = job.expenses.len(), "job archived");
        self.storage
            .log_create(EntityType::Job, job.id.as_str(), Some(job.name.clone()), job);
    }

    /// Insert copies of a job's lines into the live ledger
    pub fn insert_job(&self, folder_id: &FolderId, job_id: &JobId) -> FincalcResult<(usize, usize)> {
        let counts = self
            .storage
            .ledger
            .mutate(|doc| insert_job(doc, folder_id, job_id))?;

        self.storage.log_update(
            EntityType::Ledger,
            "ledger",
            None,
            &serde_json::Value::Null,
            &serde_json::json!({ "fromJob": job_id, "items": counts.0, "expenses": counts.1 }),
            Some(format!("inserted {} items, {} expenses from job", counts.0, counts.1)),
        );
        Ok(counts)
    }

    /// Delete a folder and its jobs
    pub fn delete_folder(&self, folder_id: &FolderId) -> FincalcResult<Folder> {
        let folder = self
            .storage
            .ledger
            .mutate(|doc| delete_folder(doc, folder_id))?;

        self.storage.log_delete(
            EntityType::Folder,
            folder.id.as_str(),
            Some(folder.name.clone()),
            &folder,
        );
        Ok(folder)
    }

    /// Delete one job
    pub fn delete_job(&self, folder_id: &FolderId, job_id: &JobId) -> FincalcResult<Job> {
        let job = self
            .storage
            .ledger
            .mutate(|doc| delete_job(doc, folder_id, job_id))?;

        self.storage
            .log_delete(EntityType::Job, job.id.as_str(), Some(job.name.clone()), &job);
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FincalcPaths;
    use crate::models::{ExpenseCategory, Measure, Summary};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn ledger_doc() -> Document {
        let mut doc = Document::default();
        doc.items.push(Item::new("Pipe", 20.0, 10.0, Measure::Meter));
        doc.items.push(Item::new("Valve", 5.0, 2.0, Measure::Unit));
        doc.expenses.push(Expense::new("Team", ExpenseCategory::Salaries, 1.0, None));
        doc
    }

    fn doc_with_folder() -> (Document, FolderId) {
        let mut doc = ledger_doc();
        let folder = create_folder(&mut doc, "Clients").unwrap();
        (doc, folder.id)
    }

    #[test]
    fn test_create_folder_requires_name() {
        let mut doc = Document::default();
        let err = create_folder(&mut doc, "   ").unwrap_err();
        assert!(err.is_validation());
        assert!(doc.folders.is_empty());

        let folder = create_folder(&mut doc, "  Clients ").unwrap();
        assert_eq!(folder.name, "Clients");
        assert!(folder.jobs.is_empty());
    }

    #[test]
    fn test_create_folder_accepts_long_name() {
        let mut doc = Document::default();
        let name = "Obra ".repeat(40);

        let folder = create_folder(&mut doc, &name).unwrap();

        assert_eq!(folder.name, name.trim());
        assert_eq!(doc.folders.len(), 1);
    }

    #[test]
    fn test_archive_ledger() {
        let (mut doc, folder_id) = doc_with_folder();

        let job = archive_ledger(&mut doc, &folder_id, "March").unwrap();

        assert_eq!(job.items, doc.items);
        assert_eq!(job.expenses, doc.expenses);
        assert_eq!(job.summary.subtotal().value(), 210.0);
        assert_eq!(job.summary.total_expenses().value(), 30.0);
        assert_eq!(doc.folder(&folder_id).unwrap().jobs.len(), 1);
    }

    #[test]
    fn test_archive_is_a_deep_copy() {
        let (mut doc, folder_id) = doc_with_folder();
        archive_ledger(&mut doc, &folder_id, "March").unwrap();

        doc.items[0].description = "Changed".into();
        doc.items.clear();

        let job = &doc.folder(&folder_id).unwrap().jobs[0];
        assert_eq!(job.items.len(), 2);
        assert_eq!(job.items[0].description, "Pipe");
    }

    #[test]
    fn test_archive_validation() {
        let (mut doc, folder_id) = doc_with_folder();
        let before = doc.clone();

        assert!(archive_ledger(&mut doc, &folder_id, "  ").unwrap_err().is_validation());
        assert!(archive_ledger(&mut doc, &FolderId::from_string("folder_x"), "March")
            .unwrap_err()
            .is_validation());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_archive_single_item() {
        let (mut doc, folder_id) = doc_with_folder();
        let item_id = doc.items[0].id.clone();

        let job = archive_item(&mut doc, &folder_id, &item_id).unwrap();

        assert_eq!(job.name, "Pipe (item)");
        assert_eq!(job.items.len(), 1);
        assert!(job.expenses.is_empty());
        assert_eq!(job.summary.net_balance().value(), 200.0);
    }

    #[test]
    fn test_insert_job_round_trip() {
        let (mut doc, folder_id) = doc_with_folder();
        let job = archive_ledger(&mut doc, &folder_id, "March").unwrap();
        let before_ids: HashSet<_> = doc.items.iter().map(|i| i.id.clone()).collect();
        let job_ids: HashSet<_> = job.items.iter().map(|i| i.id.clone()).collect();

        let (items, expenses) = insert_job(&mut doc, &folder_id, &job.id).unwrap();
        assert_eq!((items, expenses), (2, 1));
        assert_eq!(doc.items.len(), 4);

        let inserted = &doc.items[2..];
        let inserted_ids: HashSet<_> = inserted.iter().map(|i| i.id.clone()).collect();
        assert_eq!(inserted_ids.len(), 2);
        assert!(inserted_ids.is_disjoint(&before_ids));
        assert!(inserted_ids.is_disjoint(&job_ids));

        // Inserting again appends another copy.
        insert_job(&mut doc, &folder_id, &job.id).unwrap();
        assert_eq!(doc.items.len(), 6);
        assert_eq!(doc.expenses.len(), 3);
    }

    #[test]
    fn test_insert_unknown_job() {
        let (mut doc, folder_id) = doc_with_folder();
        let err = insert_job(&mut doc, &folder_id, &JobId::from_string("job_x")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_job_keeps_folder() {
        let (mut doc, folder_id) = doc_with_folder();
        let job = archive_ledger(&mut doc, &folder_id, "March").unwrap();

        delete_job(&mut doc, &folder_id, &job.id).unwrap();

        let folder = doc.folder(&folder_id).unwrap();
        assert!(folder.jobs.is_empty());
        assert!(delete_job(&mut doc, &folder_id, &job.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_folder_cascades() {
        let (mut doc, folder_id) = doc_with_folder();
        archive_ledger(&mut doc, &folder_id, "March").unwrap();
        archive_ledger(&mut doc, &folder_id, "April").unwrap();

        let removed = delete_folder(&mut doc, &folder_id).unwrap();
        assert_eq!(removed.jobs.len(), 2);
        assert!(doc.folders.is_empty());
        assert!(delete_folder(&mut doc, &folder_id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_service_list_recomputes_summaries() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FincalcPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        storage.ledger.replace(ledger_doc()).unwrap();

        let service = ArchiveService::new(&storage);
        let folder = service.create_folder("Clients").unwrap();
        service.archive_ledger(&folder.id, "March").unwrap();

        // Corrupt the cached summary; listing must not trust it.
        storage
            .ledger
            .mutate(|doc| {
                doc.folders[0].jobs[0].summary = Summary::default();
                Ok(())
            })
            .unwrap();

        let listed = service.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].folder.jobs[0].summary.net_balance().value(), 180.0);
        assert_eq!(listed[0].net_balance.value(), 180.0);

        assert_eq!(service.resolve_folder("clients").unwrap(), folder.id);
        assert!(service.resolve_folder("nope").unwrap_err().is_not_found());
    }
}
