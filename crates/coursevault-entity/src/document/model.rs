//! Document version entity.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursevault_core::types::{BlobRef, DocumentId, HeadingId, PrincipalId};

/// One uploaded file revision attached to a heading.
///
/// Versions sharing the same (heading, file name) identity are strictly
/// increasing; re-uploading a name creates a new version rather than
/// overwriting. The highest version is "current".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique version identifier.
    pub id: DocumentId,
    /// The heading this version is attached to.
    pub heading_id: HeadingId,
    /// Logical file name.
    pub file_name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Sequential version number, starting at 1.
    pub version: i32,
    /// Opaque reference into the external blob store.
    pub blob_ref: BlobRef,
    /// The principal who uploaded this version.
    pub uploaded_by: PrincipalId,
    /// When this version was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Select the current (highest) version per logical file name.
    pub fn current_versions(documents: &[Document]) -> Vec<&Document> {
        let mut latest: HashMap<&str, &Document> = HashMap::new();
        for doc in documents {
            match latest.get(doc.file_name.as_str()) {
                Some(existing) if existing.version >= doc.version => {}
                _ => {
                    latest.insert(doc.file_name.as_str(), doc);
                }
            }
        }
        let mut current: Vec<&Document> = latest.into_values().collect();
        current.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        current
    }
}
