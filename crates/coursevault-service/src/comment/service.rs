//! Posting, replying to, and listing comment threads.

use std::sync::Arc;

use tracing::{info, warn};

use coursevault_auth::assignment;
use coursevault_auth::evaluator::PermissionEvaluator;
use coursevault_core::config::LimitsConfig;
use coursevault_core::events::{CommentEvent, DomainEvent, EventPayload};
use coursevault_core::traits::NotificationDispatcher;
use coursevault_core::types::{CommentId, CourseFileId, DepartmentId, DocumentId, HeadingId};
use coursevault_core::{AppError, AppResult};
use coursevault_entity::comment::{Comment, Reply};
use coursevault_entity::course_file::CourseFile;
use coursevault_entity::principal::{Capability, Principal};
use coursevault_store::{CommentStore, CourseFileStore, DocumentStore, HeadingStore};

use crate::notification::NotificationRules;

/// Manages discussion threads on course files, headings, and document
/// versions.
///
/// Anyone who can read a course file can read and post to its threads.
/// Posted comments and replies are immutable.
#[derive(Clone)]
pub struct CommentService {
    /// Comment store.
    comment_store: Arc<dyn CommentStore>,
    /// Course file store.
    course_file_store: Arc<dyn CourseFileStore>,
    /// Heading store.
    heading_store: Arc<dyn HeadingStore>,
    /// Document store.
    document_store: Arc<dyn DocumentStore>,
    /// Permission evaluator.
    evaluator: Arc<PermissionEvaluator>,
    /// Notification dispatcher.
    dispatcher: Arc<dyn NotificationDispatcher>,
    /// Subscriber resolution rules.
    rules: NotificationRules,
    /// Input limits.
    limits: LimitsConfig,
}

/// Request to post a new comment thread.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PostCommentRequest {
    /// The course file the comment is anchored to.
    pub course_file_id: CourseFileId,
    /// Optional heading scope.
    pub heading_id: Option<HeadingId>,
    /// Optional document-version scope.
    pub document_id: Option<DocumentId>,
    /// Comment text.
    pub text: String,
}

impl CommentService {
    /// Creates a new comment service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        comment_store: Arc<dyn CommentStore>,
        course_file_store: Arc<dyn CourseFileStore>,
        heading_store: Arc<dyn HeadingStore>,
        document_store: Arc<dyn DocumentStore>,
        evaluator: Arc<PermissionEvaluator>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        rules: NotificationRules,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            comment_store,
            course_file_store,
            heading_store,
            document_store,
            evaluator,
            dispatcher,
            rules,
            limits,
        }
    }

    /// Posts a new comment thread.
    ///
    /// A document-scoped comment implicitly carries its document's
    /// heading; supplying a conflicting heading is rejected. The scope
    /// references must all resolve within the anchoring course file.
    pub async fn post(&self, principal: &Principal, req: PostCommentRequest) -> AppResult<Comment> {
        let course_file = self.require_view(principal, req.course_file_id).await?;
        self.validate_text(&req.text)?;

        let heading_id = match (req.document_id, req.heading_id) {
            (Some(document_id), supplied) => {
                let document = self
                    .document_store
                    .find_by_id(document_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::invalid_scope(format!("document {document_id} not found"))
                    })?;
                if supplied.is_some_and(|h| h != document.heading_id) {
                    return Err(AppError::invalid_scope(format!(
                        "document {document_id} does not belong to the supplied heading"
                    )));
                }
                let heading = self.require_heading_in(&course_file, document.heading_id).await?;
                Some(heading.id)
            }
            (None, Some(heading_id)) => {
                let heading = self.require_heading_in(&course_file, heading_id).await?;
                Some(heading.id)
            }
            (None, None) => None,
        };

        let comment = Comment::new(
            req.course_file_id,
            heading_id,
            req.document_id,
            principal.id,
            principal.display_name.clone(),
            principal.acting_role,
            req.text,
        );
        self.comment_store.create(&comment).await?;

        info!(
            comment_id = %comment.id,
            course_file_id = %req.course_file_id,
            author_id = %principal.id,
            "Comment posted"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::Comment(CommentEvent::Posted {
                comment_id: comment.id,
                course_file_id: comment.course_file_id,
                heading_id: comment.heading_id,
                document_id: comment.document_id,
            }),
        )
        .await;

        Ok(comment)
    }

    /// Appends a reply to an existing thread. Replies do not nest.
    pub async fn reply(
        &self,
        principal: &Principal,
        comment_id: CommentId,
        text: &str,
    ) -> AppResult<Reply> {
        let comment = self
            .comment_store
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("comment {comment_id} not found")))?;
        let course_file = self.require_view(principal, comment.course_file_id).await?;
        self.validate_text(text)?;

        let reply = Reply::new(
            principal.id,
            principal.display_name.clone(),
            principal.acting_role,
            text,
        );
        self.comment_store.append_reply(comment_id, &reply).await?;

        info!(comment_id = %comment_id, author_id = %principal.id, "Reply posted");

        self.emit(
            principal,
            &course_file,
            EventPayload::Comment(CommentEvent::Replied {
                comment_id,
                course_file_id: comment.course_file_id,
            }),
        )
        .await;

        Ok(reply)
    }

    /// Every thread on a course file, newest first.
    pub async fn list_for_course_file(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<Vec<Comment>> {
        self.require_view(principal, course_file_id).await?;
        self.comment_store.find_by_course_file(course_file_id).await
    }

    /// Heading-scoped threads on a heading, newest first. Document-scoped
    /// threads live in the document view only.
    pub async fn list_for_heading(
        &self,
        principal: &Principal,
        heading_id: HeadingId,
    ) -> AppResult<Vec<Comment>> {
        let heading = self
            .heading_store
            .find_by_id(heading_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("heading {heading_id} not found")))?;
        self.require_view(principal, heading.course_file_id).await?;
        self.comment_store.find_by_heading(heading_id).await
    }

    /// Threads scoped to one document version, newest first.
    pub async fn list_for_document(
        &self,
        principal: &Principal,
        document_id: DocumentId,
    ) -> AppResult<Vec<Comment>> {
        let document = self
            .document_store
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("document {document_id} not found")))?;
        let heading = self
            .heading_store
            .find_by_id(document.heading_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("heading {} not found", document.heading_id))
            })?;
        self.require_view(principal, heading.course_file_id).await?;
        self.comment_store.find_by_document(document_id).await
    }

    /// Threads the principal authored, newest first.
    pub async fn list_mine(&self, principal: &Principal) -> AppResult<Vec<Comment>> {
        self.comment_store.find_by_author(principal.id).await
    }

    /// Every thread across a department's course files. Requires report
    /// access within that department (or admin).
    pub async fn list_for_department(
        &self,
        principal: &Principal,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Comment>> {
        self.evaluator.require(principal, Capability::ReportsView)?;
        if !principal.is_admin() && principal.department_id != Some(department_id) {
            return Err(AppError::unauthorized(format!(
                "principal {} is not in department {department_id}",
                principal.id
            )));
        }
        let course_files = self.course_file_store.find_by_department(department_id).await?;
        let ids: Vec<CourseFileId> = course_files.iter().map(|f| f.id).collect();
        self.comment_store.find_by_course_files(&ids).await
    }

    async fn require_view(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<CourseFile> {
        let course_file = self
            .course_file_store
            .find_by_id(course_file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("course file {course_file_id} not found")))?;
        if !assignment::can_view(principal, &course_file) {
            return Err(AppError::unauthorized(format!(
                "principal {} may not view course file {course_file_id}",
                principal.id
            )));
        }
        Ok(course_file)
    }

    async fn require_heading_in(
        &self,
        course_file: &CourseFile,
        heading_id: HeadingId,
    ) -> AppResult<coursevault_entity::heading::Heading> {
        let heading = self
            .heading_store
            .find_by_id(heading_id)
            .await?
            .ok_or_else(|| AppError::invalid_scope(format!("heading {heading_id} not found")))?;
        if heading.course_file_id != course_file.id {
            return Err(AppError::invalid_scope(format!(
                "heading {heading_id} belongs to a different course file"
            )));
        }
        Ok(heading)
    }

    fn validate_text(&self, text: &str) -> AppResult<()> {
        if text.trim().is_empty() {
            return Err(AppError::validation("comment text cannot be empty"));
        }
        if text.chars().count() > self.limits.max_comment_length {
            return Err(AppError::validation(format!(
                "comment exceeds {} characters",
                self.limits.max_comment_length
            )));
        }
        Ok(())
    }

    async fn emit(&self, principal: &Principal, course_file: &CourseFile, payload: EventPayload) {
        let event = DomainEvent::new(Some(principal.id), payload);
        let recipients = self
            .rules
            .comment_subscribers(course_file, principal.id)
            .await;
        if let Err(e) = self.dispatcher.dispatch(&recipients, &event).await {
            warn!(event_id = %event.id, error = %e, "Notification dispatch failed");
        }
    }
}
