//! Heading and document mutations with workflow gates.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use coursevault_auth::assignment;
use coursevault_auth::evaluator::PermissionEvaluator;
use coursevault_core::config::LimitsConfig;
use coursevault_core::events::{DomainEvent, EventPayload, StructureEvent};
use coursevault_core::traits::NotificationDispatcher;
use coursevault_core::types::{BlobRef, CourseFileId, DocumentId, HeadingId};
use coursevault_core::{AppError, AppResult};
use coursevault_entity::course_file::CourseFile;
use coursevault_entity::document::Document;
use coursevault_entity::heading::{CourseFileTree, Heading};
use coursevault_entity::principal::{Capability, Principal};
use coursevault_store::{CommentStore, CourseFileStore, DocumentStore, HeadingStore};

use crate::notification::NotificationRules;
use crate::structure::completion;
use crate::structure::tree;

/// Manages a course file's heading tree and document versions.
///
/// Structure mutations are allowed only to the owning teacher and only
/// while the file is in an editable status. Template-origin headings can
/// never be renamed or deleted.
#[derive(Clone)]
pub struct StructureService {
    /// Course file store.
    course_file_store: Arc<dyn CourseFileStore>,
    /// Heading store.
    heading_store: Arc<dyn HeadingStore>,
    /// Document store.
    document_store: Arc<dyn DocumentStore>,
    /// Comment store.
    comment_store: Arc<dyn CommentStore>,
    /// Permission evaluator.
    evaluator: Arc<PermissionEvaluator>,
    /// Notification dispatcher.
    dispatcher: Arc<dyn NotificationDispatcher>,
    /// Subscriber resolution rules.
    rules: NotificationRules,
    /// Input limits.
    limits: LimitsConfig,
}

/// Request to add a heading.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateHeadingRequest {
    /// The owning course file.
    pub course_file_id: CourseFileId,
    /// Parent heading; `None` for root level.
    pub parent_id: Option<HeadingId>,
    /// Heading title.
    pub title: String,
    /// 1-based position among siblings; appended last when omitted.
    pub order_index: Option<i32>,
}

/// Request to upload a document version.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadDocumentRequest {
    /// The heading the document attaches to.
    pub heading_id: HeadingId,
    /// Logical file name; versions share it.
    pub file_name: String,
    /// MIME type, when the caller knows it.
    pub content_type: Option<String>,
    /// Size of the uploaded payload in bytes.
    pub size_bytes: u64,
}

impl StructureService {
    /// Creates a new structure service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        course_file_store: Arc<dyn CourseFileStore>,
        heading_store: Arc<dyn HeadingStore>,
        document_store: Arc<dyn DocumentStore>,
        comment_store: Arc<dyn CommentStore>,
        evaluator: Arc<PermissionEvaluator>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        rules: NotificationRules,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            course_file_store,
            heading_store,
            document_store,
            comment_store,
            evaluator,
            dispatcher,
            rules,
            limits,
        }
    }

    /// The full display tree for a course file.
    pub async fn get_tree(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<CourseFileTree> {
        self.require_view(principal, course_file_id).await?;
        let headings = self.heading_store.find_by_course_file(course_file_id).await?;
        let heading_ids: Vec<HeadingId> = headings.iter().map(|h| h.id).collect();
        let documents = self.document_store.find_by_headings(&heading_ids).await?;
        Ok(tree::build_tree(headings, documents))
    }

    /// Completion percentage across all headings of a course file.
    pub async fn completion(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<u8> {
        let tree = self.get_tree(principal, course_file_id).await?;
        Ok(completion::completion_percent(&tree))
    }

    /// Adds a teacher-defined heading beneath an existing parent or at
    /// root level, at the requested sibling position (appended when none
    /// is given). Siblings are renumbered so indexes stay unique.
    pub async fn create_heading(
        &self,
        principal: &Principal,
        req: CreateHeadingRequest,
    ) -> AppResult<Heading> {
        let course_file = self.require_editable_owner(principal, req.course_file_id).await?;
        self.validate_title(&req.title)?;

        if let Some(parent_id) = req.parent_id {
            let parent = self
                .heading_store
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::invalid_parent(format!("parent heading {parent_id} not found"))
                })?;
            if parent.course_file_id != course_file.id {
                return Err(AppError::invalid_parent(format!(
                    "parent heading {parent_id} belongs to a different course file"
                )));
            }
            let depth = self.depth_of(&parent).await?;
            if depth + 1 > self.limits.max_heading_depth {
                return Err(AppError::validation(format!(
                    "heading tree depth limit of {} exceeded",
                    self.limits.max_heading_depth
                )));
            }
        }

        let siblings = self.siblings_of(course_file.id, req.parent_id).await?;
        let position = self.resolve_position(req.order_index, siblings.len() + 1)?;

        let heading = Heading::new(course_file.id, req.parent_id, req.title, position as i32);
        self.heading_store.create(&heading).await?;

        let mut ordered: Vec<HeadingId> = siblings.iter().map(|h| h.id).collect();
        ordered.insert(position - 1, heading.id);
        self.renumber(&ordered).await?;

        info!(
            course_file_id = %course_file.id,
            heading_id = %heading.id,
            title = %heading.title,
            "Heading created"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::Structure(StructureEvent::HeadingCreated {
                heading_id: heading.id,
                course_file_id: course_file.id,
                parent_id: heading.parent_id,
                title: heading.title.clone(),
            }),
        )
        .await;

        Ok(heading)
    }

    /// Renames a teacher-defined heading.
    pub async fn rename_heading(
        &self,
        principal: &Principal,
        heading_id: HeadingId,
        title: &str,
    ) -> AppResult<()> {
        let heading = self.find_heading(heading_id).await?;
        let course_file = self
            .require_editable_owner(principal, heading.course_file_id)
            .await?;
        if heading.is_template_origin {
            return Err(AppError::template_node_immutable(format!(
                "heading {heading_id} was seeded from the template and cannot be renamed"
            )));
        }
        self.validate_title(title)?;
        self.heading_store.rename(heading_id, title).await?;

        info!(heading_id = %heading_id, title = %title, "Heading renamed");

        self.emit(
            principal,
            &course_file,
            EventPayload::Structure(StructureEvent::HeadingRenamed {
                heading_id,
                title: title.to_string(),
            }),
        )
        .await;
        Ok(())
    }

    /// Moves a teacher-defined heading to a new position among its
    /// siblings. Positions past the end clamp to last; all siblings are
    /// renumbered 1..n.
    pub async fn reorder_heading(
        &self,
        principal: &Principal,
        heading_id: HeadingId,
        order_index: i32,
    ) -> AppResult<()> {
        let heading = self.find_heading(heading_id).await?;
        let course_file = self
            .require_editable_owner(principal, heading.course_file_id)
            .await?;
        if heading.is_template_origin {
            return Err(AppError::template_node_immutable(format!(
                "heading {heading_id} was seeded from the template and cannot be moved"
            )));
        }

        let siblings = self.siblings_of(course_file.id, heading.parent_id).await?;
        let mut ordered: Vec<HeadingId> =
            siblings.iter().map(|h| h.id).filter(|id| *id != heading_id).collect();
        let position = self.resolve_position(Some(order_index), ordered.len() + 1)?;
        ordered.insert(position - 1, heading_id);
        self.renumber(&ordered).await?;

        info!(
            heading_id = %heading_id,
            order_index = position,
            "Heading reordered"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::Structure(StructureEvent::HeadingReordered {
                heading_id,
                order_index: position as i32,
            }),
        )
        .await;
        Ok(())
    }

    /// Deletes a teacher-defined heading together with its entire
    /// subtree, its documents, and the comments that referenced them.
    pub async fn delete_heading(
        &self,
        principal: &Principal,
        heading_id: HeadingId,
    ) -> AppResult<usize> {
        let heading = self.find_heading(heading_id).await?;
        let course_file = self
            .require_editable_owner(principal, heading.course_file_id)
            .await?;
        if heading.is_template_origin {
            return Err(AppError::template_node_immutable(format!(
                "heading {heading_id} was seeded from the template and cannot be deleted"
            )));
        }

        let removed = self.heading_store.delete_subtree(heading_id).await?;
        self.document_store.delete_by_headings(&removed).await?;
        self.comment_store.delete_by_headings(&removed).await?;

        info!(
            heading_id = %heading_id,
            cascade_count = removed.len(),
            "Heading subtree deleted"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::Structure(StructureEvent::HeadingDeleted {
                heading_id,
                cascade_count: removed.len(),
            }),
        )
        .await;
        Ok(removed.len())
    }

    /// Sets the explicit completed flag on a heading.
    pub async fn set_completed(
        &self,
        principal: &Principal,
        heading_id: HeadingId,
        completed: bool,
    ) -> AppResult<()> {
        let heading = self.find_heading(heading_id).await?;
        let course_file = self
            .require_editable_owner(principal, heading.course_file_id)
            .await?;
        self.heading_store.set_completed(heading_id, completed).await?;

        self.emit(
            principal,
            &course_file,
            EventPayload::Structure(StructureEvent::HeadingCompletedSet {
                heading_id,
                completed,
            }),
        )
        .await;
        Ok(())
    }

    /// Uploads a new document version to a heading. Versions under the
    /// same (heading, file name) identity are assigned `max + 1`; earlier
    /// versions stay retained.
    pub async fn upload_document(
        &self,
        principal: &Principal,
        req: UploadDocumentRequest,
    ) -> AppResult<Document> {
        let heading = self.find_heading(req.heading_id).await?;
        let course_file = self
            .require_editable_owner(principal, heading.course_file_id)
            .await?;
        self.evaluator.require(principal, Capability::DocumentUpload)?;

        if req.file_name.trim().is_empty() {
            return Err(AppError::validation("file name cannot be empty"));
        }
        if req.size_bytes > self.limits.max_file_size_bytes() {
            return Err(AppError::validation(format!(
                "document exceeds the {} MB size limit",
                self.limits.max_file_size_mb
            )));
        }

        let version = self
            .document_store
            .max_version(req.heading_id, &req.file_name)
            .await?
            .unwrap_or(0)
            + 1;

        let document = Document {
            id: DocumentId::new(),
            heading_id: req.heading_id,
            file_name: req.file_name.clone(),
            content_type: req.content_type,
            size_bytes: req.size_bytes,
            version,
            blob_ref: BlobRef::new(format!(
                "blobs/{}/{}/{}/v{version}",
                course_file.id, req.heading_id, req.file_name
            )),
            uploaded_by: principal.id,
            uploaded_at: Utc::now(),
        };
        self.document_store.create(&document).await?;

        info!(
            course_file_id = %course_file.id,
            heading_id = %req.heading_id,
            file_name = %document.file_name,
            version = version,
            "Document version uploaded"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::Structure(StructureEvent::DocumentUploaded {
                document_id: document.id,
                heading_id: document.heading_id,
                file_name: document.file_name.clone(),
                version,
                size_bytes: document.size_bytes,
            }),
        )
        .await;

        Ok(document)
    }

    /// Deletes one document version and its document-scoped comments.
    pub async fn delete_document(
        &self,
        principal: &Principal,
        document_id: DocumentId,
    ) -> AppResult<()> {
        let document = self
            .document_store
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("document {document_id} not found")))?;
        let heading = self.find_heading(document.heading_id).await?;
        let course_file = self
            .require_editable_owner(principal, heading.course_file_id)
            .await?;

        self.document_store.delete(document_id).await?;
        self.comment_store.delete_by_document(document_id).await?;

        info!(
            document_id = %document_id,
            file_name = %document.file_name,
            version = document.version,
            "Document version deleted"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::Structure(StructureEvent::DocumentDeleted {
                document_id,
                heading_id: document.heading_id,
            }),
        )
        .await;
        Ok(())
    }

    async fn find_heading(&self, heading_id: HeadingId) -> AppResult<Heading> {
        self.heading_store
            .find_by_id(heading_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("heading {heading_id} not found")))
    }

    /// Siblings under a parent (or the root level), ordered by index.
    async fn siblings_of(
        &self,
        course_file_id: CourseFileId,
        parent_id: Option<HeadingId>,
    ) -> AppResult<Vec<Heading>> {
        match parent_id {
            Some(parent_id) => self.heading_store.find_children(parent_id).await,
            None => Ok(self
                .heading_store
                .find_by_course_file(course_file_id)
                .await?
                .into_iter()
                .filter(|h| h.parent_id.is_none())
                .collect()),
        }
    }

    /// Resolves a requested 1-based position against the sibling count
    /// after insertion. Too-large indexes clamp to last.
    fn resolve_position(&self, requested: Option<i32>, max: usize) -> AppResult<usize> {
        match requested {
            None => Ok(max),
            Some(index) if index < 1 => Err(AppError::validation(format!(
                "order index must be at least 1, got {index}"
            ))),
            Some(index) => Ok((index as usize).min(max)),
        }
    }

    /// Rewrites the order index of each heading to its slot in `ordered`.
    async fn renumber(&self, ordered: &[HeadingId]) -> AppResult<()> {
        for (slot, id) in ordered.iter().enumerate() {
            self.heading_store.set_order(*id, slot as i32 + 1).await?;
        }
        Ok(())
    }

    /// Depth of a heading in its tree, root level = 1.
    async fn depth_of(&self, heading: &Heading) -> AppResult<u32> {
        let mut depth = 1;
        let mut parent_id = heading.parent_id;
        while let Some(id) = parent_id {
            let parent = self.find_heading(id).await?;
            parent_id = parent.parent_id;
            depth += 1;
        }
        Ok(depth)
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

    async fn require_editable_owner(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<CourseFile> {
        let course_file = self
            .course_file_store
            .find_by_id(course_file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("course file {course_file_id} not found")))?;
        assignment::require_owner(principal, &course_file)?;
        if course_file.archived || !course_file.status.is_editable() {
            return Err(AppError::not_editable(format!(
                "course file {course_file_id} is {} and cannot be modified",
                course_file.status
            )));
        }
        Ok(course_file)
    }

    fn validate_title(&self, title: &str) -> AppResult<()> {
        if title.trim().is_empty() {
            return Err(AppError::validation("heading title cannot be empty"));
        }
        if title.chars().count() > self.limits.max_title_length {
            return Err(AppError::validation(format!(
                "heading title exceeds {} characters",
                self.limits.max_title_length
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
