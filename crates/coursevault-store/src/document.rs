//! Document store — keyed by id with a (heading, file name) version index.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursevault_core::types::{DocumentId, HeadingId};
use coursevault_core::AppResult;
use coursevault_entity::document::Document;

/// Persistence interface for document versions.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Persist a new document version.
    async fn create(&self, document: &Document) -> AppResult<()>;

    /// Find a document version by id.
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>>;

    /// Delete exactly one document version. Returns `true` if it existed.
    async fn delete(&self, id: DocumentId) -> AppResult<bool>;

    /// All versions attached to a heading, ordered by file name then version.
    async fn find_by_heading(&self, heading_id: HeadingId) -> AppResult<Vec<Document>>;

    /// All versions attached to any of the given headings.
    async fn find_by_headings(&self, heading_ids: &[HeadingId]) -> AppResult<Vec<Document>>;

    /// Delete every version attached to the given headings in one write.
    /// Returns the number removed.
    async fn delete_by_headings(&self, heading_ids: &[HeadingId]) -> AppResult<u64>;

    /// The highest version number for a (heading, file name) identity.
    async fn max_version(&self, heading_id: HeadingId, file_name: &str)
    -> AppResult<Option<i32>>;
}

/// In-memory document store using a Tokio RwLock for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    /// Document versions keyed by id.
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, document: &Document) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id).cloned())
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(&id).is_some())
    }

    async fn find_by_heading(&self, heading_id: HeadingId) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().await;
        let mut found: Vec<Document> = documents
            .values()
            .filter(|d| d.heading_id == heading_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.file_name.cmp(&b.file_name).then(a.version.cmp(&b.version)));
        Ok(found)
    }

    async fn find_by_headings(&self, heading_ids: &[HeadingId]) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().await;
        let mut found: Vec<Document> = documents
            .values()
            .filter(|d| heading_ids.contains(&d.heading_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.file_name.cmp(&b.file_name).then(a.version.cmp(&b.version)));
        Ok(found)
    }

    async fn delete_by_headings(&self, heading_ids: &[HeadingId]) -> AppResult<u64> {
        let mut documents = self.documents.write().await;
        let removed: Vec<DocumentId> = documents
            .values()
            .filter(|d| heading_ids.contains(&d.heading_id))
            .map(|d| d.id)
            .collect();
        for id in &removed {
            documents.remove(id);
        }
        Ok(removed.len() as u64)
    }

    async fn max_version(
        &self,
        heading_id: HeadingId,
        file_name: &str,
    ) -> AppResult<Option<i32>> {
        let documents = self.documents.read().await;
        Ok(documents
            .values()
            .filter(|d| d.heading_id == heading_id && d.file_name == file_name)
            .map(|d| d.version)
            .max())
    }
}
