//! Comment store — keyed by id with course-file, heading, and document indexes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursevault_core::types::{CommentId, CourseFileId, DocumentId, HeadingId, PrincipalId};
use coursevault_core::{AppError, AppResult};
use coursevault_entity::comment::{Comment, Reply};

/// Persistence interface for comment threads.
#[async_trait]
pub trait CommentStore: Send + Sync + 'static {
    /// Persist a new comment thread root.
    async fn create(&self, comment: &Comment) -> AppResult<()>;

    /// Find a comment by id.
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>>;

    /// Append a reply to an existing thread.
    async fn append_reply(&self, comment_id: CommentId, reply: &Reply) -> AppResult<()>;

    /// All threads anchored to a course file, newest first.
    async fn find_by_course_file(&self, course_file_id: CourseFileId) -> AppResult<Vec<Comment>>;

    /// All threads anchored to any of the given course files, newest first.
    async fn find_by_course_files(
        &self,
        course_file_ids: &[CourseFileId],
    ) -> AppResult<Vec<Comment>>;

    /// Heading-scoped threads on the given heading, newest first.
    /// Document-scoped threads carry their heading too but belong to the
    /// document view, so they are excluded here.
    async fn find_by_heading(&self, heading_id: HeadingId) -> AppResult<Vec<Comment>>;

    /// All threads scoped to the given document version, newest first.
    async fn find_by_document(&self, document_id: DocumentId) -> AppResult<Vec<Comment>>;

    /// All threads authored by the given principal, newest first.
    async fn find_by_author(&self, author_id: PrincipalId) -> AppResult<Vec<Comment>>;

    /// Delete every thread referencing one of the given headings in one
    /// write. Returns the number removed.
    async fn delete_by_headings(&self, heading_ids: &[HeadingId]) -> AppResult<u64>;

    /// Delete every thread scoped to the given document version. Returns
    /// the number removed.
    async fn delete_by_document(&self, document_id: DocumentId) -> AppResult<u64>;

    /// Delete every thread anchored to the given course file. Returns the
    /// number removed.
    async fn delete_by_course_file(&self, course_file_id: CourseFileId) -> AppResult<u64>;
}

/// In-memory comment store using a Tokio RwLock for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryCommentStore {
    /// Comment threads keyed by id.
    comments: Arc<RwLock<HashMap<CommentId, Comment>>>,
}

impl MemoryCommentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_newest_first(mut comments: Vec<Comment>) -> Vec<Comment> {
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn create(&self, comment: &Comment) -> AppResult<()> {
        let mut comments = self.comments.write().await;
        comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments.get(&id).cloned())
    }

    async fn append_reply(&self, comment_id: CommentId, reply: &Reply) -> AppResult<()> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .get_mut(&comment_id)
            .ok_or_else(|| AppError::not_found(format!("comment {comment_id} not found")))?;
        comment.replies.push(reply.clone());
        Ok(())
    }

    async fn find_by_course_file(&self, course_file_id: CourseFileId) -> AppResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(Self::sorted_newest_first(
            comments
                .values()
                .filter(|c| c.course_file_id == course_file_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_course_files(
        &self,
        course_file_ids: &[CourseFileId],
    ) -> AppResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(Self::sorted_newest_first(
            comments
                .values()
                .filter(|c| course_file_ids.contains(&c.course_file_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_heading(&self, heading_id: HeadingId) -> AppResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(Self::sorted_newest_first(
            comments
                .values()
                .filter(|c| c.is_heading_scoped() && c.heading_id == Some(heading_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_document(&self, document_id: DocumentId) -> AppResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(Self::sorted_newest_first(
            comments
                .values()
                .filter(|c| c.document_id == Some(document_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_author(&self, author_id: PrincipalId) -> AppResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(Self::sorted_newest_first(
            comments
                .values()
                .filter(|c| c.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn delete_by_headings(&self, heading_ids: &[HeadingId]) -> AppResult<u64> {
        let mut comments = self.comments.write().await;
        let removed: Vec<CommentId> = comments
            .values()
            .filter(|c| c.heading_id.is_some_and(|h| heading_ids.contains(&h)))
            .map(|c| c.id)
            .collect();
        for id in &removed {
            comments.remove(id);
        }
        Ok(removed.len() as u64)
    }

    async fn delete_by_document(&self, document_id: DocumentId) -> AppResult<u64> {
        let mut comments = self.comments.write().await;
        let removed: Vec<CommentId> = comments
            .values()
            .filter(|c| c.document_id == Some(document_id))
            .map(|c| c.id)
            .collect();
        for id in &removed {
            comments.remove(id);
        }
        Ok(removed.len() as u64)
    }

    async fn delete_by_course_file(&self, course_file_id: CourseFileId) -> AppResult<u64> {
        let mut comments = self.comments.write().await;
        let removed: Vec<CommentId> = comments
            .values()
            .filter(|c| c.course_file_id == course_file_id)
            .map(|c| c.id)
            .collect();
        for id in &removed {
            comments.remove(id);
        }
        Ok(removed.len() as u64)
    }
}
