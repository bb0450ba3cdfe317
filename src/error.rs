//! Custom error types for fincalc
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for fincalc operations
#[derive(Error, Debug)]
pub enum FincalcError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A rejected operation: missing name, no folder selected, empty month
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An import document without the expected top-level fields
    ///
    /// The caller must confirm explicitly before the import proceeds.
    #[error("Unexpected document structure: missing {}", .missing.join(", "))]
    StructuralMismatch { missing: Vec<&'static str> },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FincalcError {
    /// Create a "not found" error for items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for folders
    pub fn folder_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Folder",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for jobs
    pub fn job_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Job",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for history months
    pub fn month_not_found(month: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "History month",
            identifier: month.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a structural mismatch awaiting confirmation
    pub fn is_structural_mismatch(&self) -> bool {
        matches!(self, Self::StructuralMismatch { .. })
    }
}

impl From<std::io::Error> for FincalcError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FincalcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fincalc operations
pub type FincalcResult<T> = Result<T, FincalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FincalcError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FincalcError::folder_not_found("Clients");
        assert_eq!(err.to_string(), "Folder not found: Clients");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_month_not_found_error() {
        let err = FincalcError::month_not_found("2024-05");
        assert_eq!(err.to_string(), "History month not found: 2024-05");
    }

    #[test]
    fn test_structural_mismatch_display() {
        let err = FincalcError::StructuralMismatch {
            missing: vec!["items", "expenses"],
        };
        assert_eq!(
            err.to_string(),
            "Unexpected document structure: missing items, expenses"
        );
        assert!(err.is_structural_mismatch());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FincalcError = io_err.into();
        assert!(matches!(err, FincalcError::Io(_)));
    }
}
