//! Course-file CRUD and listing operations with permission enforcement.

use std::sync::Arc;

use tracing::{info, warn};

use coursevault_auth::assignment;
use coursevault_auth::evaluator::PermissionEvaluator;
use coursevault_core::config::WorkflowConfig;
use coursevault_core::events::{CourseFileEvent, DomainEvent, EventPayload};
use coursevault_core::traits::{NotificationDispatcher, TemplateCatalog, TemplateHeading};
use coursevault_core::types::{CourseFileId, CourseId, DepartmentId};
use coursevault_core::{AppError, AppResult, ErrorKind};
use coursevault_entity::course_file::{CourseFile, CourseFileStatus};
use coursevault_entity::heading::Heading;
use coursevault_entity::principal::{Capability, Principal, Role};
use coursevault_store::{CommentStore, CourseFileStore, DocumentStore, HeadingStore};

use crate::notification::NotificationRules;

/// Manages course-file creation, lookup, archival, and listings.
#[derive(Clone)]
pub struct CourseFileService {
    /// Course file store.
    course_file_store: Arc<dyn CourseFileStore>,
    /// Heading store.
    heading_store: Arc<dyn HeadingStore>,
    /// Document store.
    document_store: Arc<dyn DocumentStore>,
    /// Comment store.
    comment_store: Arc<dyn CommentStore>,
    /// Template catalog.
    template_catalog: Arc<dyn TemplateCatalog>,
    /// Permission evaluator.
    evaluator: Arc<PermissionEvaluator>,
    /// Notification dispatcher.
    dispatcher: Arc<dyn NotificationDispatcher>,
    /// Subscriber resolution rules.
    rules: NotificationRules,
    /// Workflow defaults.
    workflow: WorkflowConfig,
}

/// Request to create a new course file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateCourseFileRequest {
    /// The course the dossier covers.
    pub course_id: CourseId,
    /// Academic year; the configured default when omitted.
    pub academic_year: Option<String>,
    /// Section designation.
    pub section: String,
}

impl CourseFileService {
    /// Creates a new course file service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        course_file_store: Arc<dyn CourseFileStore>,
        heading_store: Arc<dyn HeadingStore>,
        document_store: Arc<dyn DocumentStore>,
        comment_store: Arc<dyn CommentStore>,
        template_catalog: Arc<dyn TemplateCatalog>,
        evaluator: Arc<PermissionEvaluator>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        rules: NotificationRules,
        workflow: WorkflowConfig,
    ) -> Self {
        Self {
            course_file_store,
            heading_store,
            document_store,
            comment_store,
            template_catalog,
            evaluator,
            dispatcher,
            rules,
            workflow,
        }
    }

    /// Creates a new draft course file, seeding its structure from the
    /// department template.
    pub async fn create(
        &self,
        principal: &Principal,
        req: CreateCourseFileRequest,
    ) -> AppResult<CourseFile> {
        if principal.acting_role != Role::Teacher {
            return Err(AppError::unauthorized(
                "only a principal acting as teacher may create a course file",
            ));
        }
        self.evaluator.require(principal, Capability::CourseFileCreate)?;

        let department_id = principal.department_id.ok_or_else(|| {
            AppError::validation("principal has no department; cannot create a course file")
        })?;

        if req.section.trim().is_empty() {
            return Err(AppError::validation("section cannot be empty"));
        }
        let academic_year = req
            .academic_year
            .filter(|y| !y.trim().is_empty())
            .unwrap_or_else(|| self.workflow.default_academic_year.clone());

        if let Some(existing) = self
            .course_file_store
            .find_active(req.course_id, principal.id, &academic_year, &req.section)
            .await?
        {
            return Err(AppError::conflict(format!(
                "an active course file already exists for this course, year, and section ({})",
                existing.id
            )));
        }

        let course_file = CourseFile::new(
            req.course_id,
            principal.id,
            department_id,
            academic_year,
            req.section,
        );
        self.course_file_store.create(&course_file).await?;

        let seeded = if self.workflow.seed_from_template {
            self.seed_structure(&course_file, department_id).await?
        } else {
            0
        };

        info!(
            course_file_id = %course_file.id,
            teacher_id = %principal.id,
            seeded_headings = seeded,
            "Course file created"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::CourseFile(CourseFileEvent::Created {
                course_file_id: course_file.id,
                course_id: course_file.course_id,
                teacher_id: course_file.teacher_id,
                department_id,
                seeded_headings: seeded,
            }),
        )
        .await;

        Ok(course_file)
    }

    /// Gets a course file, enforcing read access.
    pub async fn get(
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

    /// Deletes a draft course file and its structure. Only the owner may
    /// delete, and only while the file has never been submitted.
    pub async fn delete_draft(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<()> {
        let course_file = self.get(principal, course_file_id).await?;
        assignment::require_owner(principal, &course_file)?;
        if course_file.status != CourseFileStatus::Draft {
            return Err(AppError::not_editable(format!(
                "course file {course_file_id} is {}; only drafts can be deleted",
                course_file.status
            )));
        }

        let removed_headings = self
            .heading_store
            .delete_by_course_file(course_file_id)
            .await?;
        self.document_store
            .delete_by_headings(&removed_headings)
            .await?;
        self.comment_store
            .delete_by_course_file(course_file_id)
            .await?;
        self.course_file_store.delete(course_file_id).await?;

        info!(
            course_file_id = %course_file_id,
            headings_removed = removed_headings.len(),
            "Draft course file deleted"
        );

        self.emit(
            principal,
            &course_file,
            EventPayload::CourseFile(CourseFileEvent::Deleted { course_file_id }),
        )
        .await;

        Ok(())
    }

    /// Archives an approved course file, freeing its active tuple for a
    /// future offering.
    pub async fn archive(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<CourseFile> {
        let mut course_file = self.get(principal, course_file_id).await?;
        assignment::require_owner(principal, &course_file)?;
        if course_file.status != CourseFileStatus::Approved {
            return Err(AppError::validation(format!(
                "course file {course_file_id} is {}; only approved files can be archived",
                course_file.status
            )));
        }
        if course_file.archived {
            return Err(AppError::conflict(format!(
                "course file {course_file_id} is already archived"
            )));
        }

        self.course_file_store.set_archived(course_file_id, true).await?;
        course_file.archived = true;

        info!(course_file_id = %course_file_id, "Course file archived");

        self.emit(
            principal,
            &course_file,
            EventPayload::CourseFile(CourseFileEvent::Archived { course_file_id }),
        )
        .await;

        Ok(course_file)
    }

    /// Lists the principal's own course files, newest first.
    pub async fn list_mine(&self, principal: &Principal) -> AppResult<Vec<CourseFile>> {
        self.course_file_store.find_by_teacher(principal.id).await
    }

    /// Lists every course file in a department. Requires report access
    /// within that department (or admin).
    pub async fn list_for_department(
        &self,
        principal: &Principal,
        department_id: DepartmentId,
    ) -> AppResult<Vec<CourseFile>> {
        self.evaluator.require(principal, Capability::ReportsView)?;
        if !principal.is_admin() && principal.department_id != Some(department_id) {
            return Err(AppError::unauthorized(format!(
                "principal {} is not in department {department_id}",
                principal.id
            )));
        }
        self.course_file_store.find_by_department(department_id).await
    }

    /// Submitted files awaiting the acting Subject Head, across their
    /// assigned courses.
    pub async fn pending_for_subject_head(
        &self,
        principal: &Principal,
    ) -> AppResult<Vec<CourseFile>> {
        if principal.acting_role != Role::SubjectHead {
            return Err(AppError::unauthorized(
                "the pending review queue requires acting role subject_head",
            ));
        }
        self.evaluator.require(principal, Capability::FileApprove)?;
        self.course_file_store
            .find_by_courses_and_status(&principal.assigned_course_ids, CourseFileStatus::Submitted)
            .await
    }

    /// Files under HOD review in the acting HOD's department.
    pub async fn pending_for_hod(&self, principal: &Principal) -> AppResult<Vec<CourseFile>> {
        if principal.acting_role != Role::Hod {
            return Err(AppError::unauthorized(
                "the HOD review queue requires acting role hod",
            ));
        }
        self.evaluator.require(principal, Capability::FileApprove)?;
        let department_id = principal
            .department_id
            .ok_or_else(|| AppError::validation("acting HOD has no department"))?;
        self.course_file_store
            .find_by_department_and_status(department_id, CourseFileStatus::UnderReviewHod)
            .await
    }

    /// Seed template-origin headings for a new course file. A missing
    /// department template leaves the structure empty rather than failing
    /// creation.
    async fn seed_structure(
        &self,
        course_file: &CourseFile,
        department_id: DepartmentId,
    ) -> AppResult<usize> {
        let template = match self.template_catalog.department_template(department_id).await {
            Ok(template) => template,
            Err(e) if e.kind == ErrorKind::NotFound => {
                warn!(
                    course_file_id = %course_file.id,
                    department_id = %department_id,
                    "No template registered; course file starts empty"
                );
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let mut headings = Vec::with_capacity(template.count());
        collect_template_headings(course_file.id, None, &template.headings, &mut headings);
        self.heading_store.create_many(&headings).await?;
        Ok(headings.len())
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

/// Flatten a nested template into persistable headings, depth-first with
/// 1-based sibling indexes.
fn collect_template_headings(
    course_file_id: CourseFileId,
    parent_id: Option<coursevault_core::types::HeadingId>,
    entries: &[TemplateHeading],
    out: &mut Vec<Heading>,
) {
    for (index, entry) in entries.iter().enumerate() {
        let heading = Heading::template_origin(
            course_file_id,
            parent_id,
            entry.title.clone(),
            (index + 1) as i32,
        );
        let heading_id = heading.id;
        out.push(heading);
        collect_template_headings(course_file_id, Some(heading_id), &entry.children, out);
    }
}
