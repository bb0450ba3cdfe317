//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. IDs are opaque strings so that documents
//! written by other tools (e.g. `item_k3j9x0a`) load unchanged; freshly
//! generated IDs are a prefix followed by a v4 UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Wrap an existing identifier string
            pub fn from_string(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form used in tables (prefix + first 8 characters)
            pub fn short(&self) -> &str {
                let end = self
                    .0
                    .char_indices()
                    .nth($prefix.len() + 8)
                    .map(|(i, _)| i)
                    .unwrap_or(self.0.len());
                &self.0[..end]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(ItemId, "item_");
define_id!(ExpenseId, "exp_");
define_id!(FolderId, "folder_");
define_id!(JobId, "job_");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_creation() {
        let id = ItemId::new();
        assert!(id.as_str().starts_with("item_"));
        assert_eq!(id.as_str().len(), "item_".len() + 32);
    }

    #[test]
    fn test_id_short_form() {
        let id = FolderId::new();
        assert!(id.short().starts_with("folder_"));
        assert_eq!(id.short().len(), "folder_".len() + 8);

        let legacy = ItemId::from_string("item_ab");
        assert_eq!(legacy.short(), "item_ab");
    }

    #[test]
    fn test_id_equality() {
        let id1 = JobId::new();
        let id2 = id1.clone();
        assert_eq!(id1, id2);

        let id3 = JobId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_serialization() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_legacy_id_is_preserved() {
        let id: ItemId = serde_json::from_str("\"item_k3j9x0a\"").unwrap();
        assert_eq!(id.as_str(), "item_k3j9x0a");
        assert_eq!(id.to_string(), "item_k3j9x0a");
    }

    #[test]
    fn test_parse_trims_input() {
        let id: FolderId = "  folder_1 ".parse().unwrap();
        assert_eq!(id.as_str(), "folder_1");
    }
}
