//! Validated item name
//!
//! The name doubles as the document id in the remote store, so it is kept
//! byte-for-byte as given: it is case-sensitive and never trimmed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length of a document id, in bytes.
const MAX_NAME_BYTES: usize = 1500;

// ============================================================================
// ItemName
// ============================================================================

/// A validated item name (non-blank, no `/`, not a reserved id, <=1500 bytes, exact)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Create a new validated item name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty or contains only whitespace
    /// - The name contains a `/` (it would address a nested document)
    /// - The name is `.` or `..` (not addressable as a path segment)
    /// - The name matches `__*__`, reserved by the document store
    /// - The name exceeds 1500 bytes
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Item name cannot be empty"));
        }
        if name.contains('/') {
            return Err(DomainError::validation("Item name cannot contain '/'"));
        }
        if name == "." || name == ".." {
            return Err(DomainError::validation("Item name cannot be '.' or '..'"));
        }
        if name.len() >= 4 && name.starts_with("__") && name.ends_with("__") {
            return Err(DomainError::validation(
                "Item names of the form __name__ are reserved",
            ));
        }
        if name.len() > MAX_NAME_BYTES {
            return Err(DomainError::validation(format!(
                "Item name cannot exceed {} bytes",
                MAX_NAME_BYTES
            )));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ItemName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ItemName {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ItemName> for String {
    fn from(name: ItemName) -> String {
        name.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
