//! Heading store — keyed by id with a parent index for tree traversal.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursevault_core::types::{CourseFileId, HeadingId};
use coursevault_core::{AppError, AppResult};
use coursevault_entity::heading::Heading;

/// Persistence interface for headings.
#[async_trait]
pub trait HeadingStore: Send + Sync + 'static {
    /// Persist a new heading.
    async fn create(&self, heading: &Heading) -> AppResult<()>;

    /// Persist a batch of headings in one atomic write (template seeding).
    async fn create_many(&self, headings: &[Heading]) -> AppResult<()>;

    /// Find a heading by id.
    async fn find_by_id(&self, id: HeadingId) -> AppResult<Option<Heading>>;

    /// Rename a heading.
    async fn rename(&self, id: HeadingId, title: &str) -> AppResult<()>;

    /// Set the explicit completed flag.
    async fn set_completed(&self, id: HeadingId, completed: bool) -> AppResult<()>;

    /// Set the sibling ordering index.
    async fn set_order(&self, id: HeadingId, order_index: i32) -> AppResult<()>;

    /// All headings of a course file, ordered by `order_index`.
    async fn find_by_course_file(&self, course_file_id: CourseFileId) -> AppResult<Vec<Heading>>;

    /// Direct children of a heading, ordered by `order_index`.
    async fn find_children(&self, parent_id: HeadingId) -> AppResult<Vec<Heading>>;

    /// Delete a heading and all its descendants under one write lock.
    /// Returns the ids removed, the given heading first.
    async fn delete_subtree(&self, id: HeadingId) -> AppResult<Vec<HeadingId>>;

    /// Delete every heading of a course file. Returns the ids removed.
    async fn delete_by_course_file(&self, course_file_id: CourseFileId)
    -> AppResult<Vec<HeadingId>>;
}

/// In-memory heading store using a Tokio RwLock for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryHeadingStore {
    /// Headings keyed by id.
    headings: Arc<RwLock<HashMap<HeadingId, Heading>>>,
}

impl MemoryHeadingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_subtree(
        headings: &HashMap<HeadingId, Heading>,
        root: HeadingId,
        out: &mut Vec<HeadingId>,
    ) {
        out.push(root);
        let children: Vec<HeadingId> = headings
            .values()
            .filter(|h| h.parent_id == Some(root))
            .map(|h| h.id)
            .collect();
        for child in children {
            Self::collect_subtree(headings, child, out);
        }
    }
}

#[async_trait]
impl HeadingStore for MemoryHeadingStore {
    async fn create(&self, heading: &Heading) -> AppResult<()> {
        let mut headings = self.headings.write().await;
        headings.insert(heading.id, heading.clone());
        Ok(())
    }

    async fn create_many(&self, batch: &[Heading]) -> AppResult<()> {
        let mut headings = self.headings.write().await;
        for heading in batch {
            headings.insert(heading.id, heading.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: HeadingId) -> AppResult<Option<Heading>> {
        let headings = self.headings.read().await;
        Ok(headings.get(&id).cloned())
    }

    async fn rename(&self, id: HeadingId, title: &str) -> AppResult<()> {
        let mut headings = self.headings.write().await;
        let heading = headings
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("heading {id} not found")))?;
        heading.title = title.to_string();
        Ok(())
    }

    async fn set_completed(&self, id: HeadingId, completed: bool) -> AppResult<()> {
        let mut headings = self.headings.write().await;
        let heading = headings
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("heading {id} not found")))?;
        heading.completed = completed;
        Ok(())
    }

    async fn set_order(&self, id: HeadingId, order_index: i32) -> AppResult<()> {
        let mut headings = self.headings.write().await;
        let heading = headings
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("heading {id} not found")))?;
        heading.order_index = order_index;
        Ok(())
    }

    async fn find_by_course_file(&self, course_file_id: CourseFileId) -> AppResult<Vec<Heading>> {
        let headings = self.headings.read().await;
        let mut found: Vec<Heading> = headings
            .values()
            .filter(|h| h.course_file_id == course_file_id)
            .cloned()
            .collect();
        found.sort_by_key(|h| h.order_index);
        Ok(found)
    }

    async fn find_children(&self, parent_id: HeadingId) -> AppResult<Vec<Heading>> {
        let headings = self.headings.read().await;
        let mut found: Vec<Heading> = headings
            .values()
            .filter(|h| h.parent_id == Some(parent_id))
            .cloned()
            .collect();
        found.sort_by_key(|h| h.order_index);
        Ok(found)
    }

    async fn delete_subtree(&self, id: HeadingId) -> AppResult<Vec<HeadingId>> {
        let mut headings = self.headings.write().await;
        if !headings.contains_key(&id) {
            return Err(AppError::not_found(format!("heading {id} not found")));
        }
        let mut removed = Vec::new();
        Self::collect_subtree(&headings, id, &mut removed);
        for heading_id in &removed {
            headings.remove(heading_id);
        }
        Ok(removed)
    }

    async fn delete_by_course_file(
        &self,
        course_file_id: CourseFileId,
    ) -> AppResult<Vec<HeadingId>> {
        let mut headings = self.headings.write().await;
        let removed: Vec<HeadingId> = headings
            .values()
            .filter(|h| h.course_file_id == course_file_id)
            .map(|h| h.id)
            .collect();
        for heading_id in &removed {
            headings.remove(heading_id);
        }
        Ok(removed)
    }
}
