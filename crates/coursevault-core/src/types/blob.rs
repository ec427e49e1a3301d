//! Opaque reference to document content held by the external blob store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque storage reference for one document version.
///
/// The core stores only this reference plus size and name per version;
/// upload/download bytes flow through the external blob storage
/// collaborator, never through the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(pub String);

impl BlobRef {
    /// Create a blob reference from a storage key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Return the storage key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BlobRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlobRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}
