//! Storage layer for fincalc
//!
//! Provides JSON file storage with atomic writes for the ledger document,
//! plus the audit log that records every change to it.

pub mod file_io;
pub mod init;
pub mod ledger;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use ledger::{load_document, LedgerRepository, LoadOutcome};

use serde::Serialize;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FincalcPaths;
use crate::error::FincalcError;

/// Main storage coordinator: the ledger document and its audit trail
pub struct Storage {
    paths: FincalcPaths,
    pub ledger: LedgerRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance holding the default document
    pub fn new(paths: FincalcPaths) -> Result<Self, FincalcError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.ledger_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create a Storage instance and load the persisted document
    pub fn open(paths: FincalcPaths) -> Result<Self, FincalcError> {
        let storage = Self::new(paths)?;
        storage.load()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FincalcPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load the document from disk (falls back to defaults, see [`LedgerRepository::load`])
    pub fn load(&self) -> Result<LoadOutcome, FincalcError> {
        self.ledger.load()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity));
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) {
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ));
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity));
    }

    /// Record an import in the audit log
    pub fn log_import(&self, mode: impl Into<String>, summary: impl Into<String>) {
        self.write_audit(AuditEntry::import(mode, summary));
    }

    // The ledger change is already committed; a lost audit line is only reported.
    fn write_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            warn!(error = %e, entity = %entry.entity_type, "failed to write audit entry");
        }
    }
}
