//! Folder and job models
//!
//! A folder is a named container of jobs. A job is an archived copy of a
//! ledger (or of a single item) taken at a point in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Expense;
use super::ids::{FolderId, JobId};
use super::item::Item;
use super::summary::Summary;

/// An archived ledger snapshot stored inside a folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique identifier within the jobs of all folders
    #[serde(default)]
    pub id: JobId,

    /// Job name
    #[serde(default)]
    pub name: String,

    /// When the job was archived
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Archived income lines
    #[serde(default)]
    pub items: Vec<Item>,

    /// Archived expenses
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// Cached totals for the archived lines
    #[serde(default)]
    pub summary: Summary,
}

impl Job {
    /// Copy of this job under a freshly generated ID
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: JobId::new(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} items, {} expenses)",
            self.name,
            self.items.len(),
            self.expenses.len()
        )
    }
}

/// A named container of archived jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier within folders
    #[serde(default)]
    pub id: FolderId,

    /// Folder name
    #[serde(default)]
    pub name: String,

    /// Archived jobs, oldest first
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl Folder {
    /// Create a new, empty folder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FolderId::new(),
            name: name.into(),
            jobs: Vec::new(),
        }
    }

    /// Find a job by ID
    pub fn job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| &j.id == id)
    }

    /// Copy of this folder with a fresh folder ID and fresh IDs for every job
    pub fn with_fresh_ids(&self) -> Self {
        Self {
            id: FolderId::new(),
            name: self.name.clone(),
            jobs: self.jobs.iter().map(Job::with_fresh_id).collect(),
        }
    }

    /// Validate the folder
    pub fn validate(&self) -> Result<(), FolderValidationError> {
        if self.name.trim().is_empty() {
            return Err(FolderValidationError::EmptyName);
        }

        Ok(())
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} jobs)", self.name, self.jobs.len())
    }
}

/// Validation errors for folders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderValidationError {
    EmptyName,
}

impl fmt::Display for FolderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Folder name cannot be empty"),
        }
    }
}

impl std::error::Error for FolderValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measure;

    fn sample_job() -> Job {
        Job {
            id: JobId::new(),
            name: "March install".into(),
            created_at: Utc::now(),
            items: vec![Item::new("Pipe", 20.0, 10.0, Measure::Meter)],
            expenses: Vec::new(),
            summary: Summary::default(),
        }
    }

    #[test]
    fn test_new_folder_is_empty() {
        let folder = Folder::new("Clients");
        assert_eq!(folder.name, "Clients");
        assert!(folder.jobs.is_empty());
        assert!(folder.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let folder = Folder::new("   ");
        assert_eq!(folder.validate(), Err(FolderValidationError::EmptyName));

        // Long names are accepted as-is
        let folder = Folder::new("a".repeat(250));
        assert!(folder.validate().is_ok());
    }

    #[test]
    fn test_with_fresh_ids() {
        let mut folder = Folder::new("Clients");
        folder.jobs.push(sample_job());
        folder.jobs.push(sample_job());

        let copy = folder.with_fresh_ids();
        assert_ne!(copy.id, folder.id);
        assert_eq!(copy.jobs.len(), 2);
        for (original, copied) in folder.jobs.iter().zip(&copy.jobs) {
            assert_ne!(original.id, copied.id);
            assert_eq!(original.items, copied.items);
        }
    }

    #[test]
    fn test_job_lookup() {
        let mut folder = Folder::new("Clients");
        let job = sample_job();
        let id = job.id.clone();
        folder.jobs.push(job);

        assert!(folder.job(&id).is_some());
        assert!(folder.job(&JobId::new()).is_none());
    }

    #[test]
    fn test_job_serialization_shape() {
        let job = sample_job();
        let json = serde_json::to_value(&job).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("summary").is_some());
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
    }
}
