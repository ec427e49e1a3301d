//! The approval state machine: transition execution and history.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use coursevault_auth::assignment;
use coursevault_auth::evaluator::PermissionEvaluator;
use coursevault_core::events::{CourseFileEvent, DomainEvent, EventPayload};
use coursevault_core::traits::NotificationDispatcher;
use coursevault_core::types::{ApprovalId, CourseFileId};
use coursevault_core::{AppError, AppResult};
use coursevault_entity::approval::{ApprovalAction, ApprovalTransition};
use coursevault_entity::comment::Comment;
use coursevault_entity::course_file::CourseFile;
use coursevault_entity::principal::Principal;
use coursevault_store::{ApprovalStore, CommentStore, CourseFileStore};

use crate::notification::NotificationRules;

/// Executes approval transitions and serves the transition log.
///
/// Every transition is validated completely before the first write:
/// the edge must exist in the transition table, the actor must pass the
/// stage's role, assignment, and capability gates, and a return must
/// carry a comment. Only then do the status update, the history record,
/// and the optional thread comment land.
#[derive(Clone)]
pub struct ApprovalService {
    /// Course file store.
    course_file_store: Arc<dyn CourseFileStore>,
    /// Approval history store.
    approval_store: Arc<dyn ApprovalStore>,
    /// Comment store.
    comment_store: Arc<dyn CommentStore>,
    /// Permission evaluator.
    evaluator: Arc<PermissionEvaluator>,
    /// Notification dispatcher.
    dispatcher: Arc<dyn NotificationDispatcher>,
    /// Subscriber resolution rules.
    rules: NotificationRules,
}

impl ApprovalService {
    /// Creates a new approval service.
    pub fn new(
        course_file_store: Arc<dyn CourseFileStore>,
        approval_store: Arc<dyn ApprovalStore>,
        comment_store: Arc<dyn CommentStore>,
        evaluator: Arc<PermissionEvaluator>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        rules: NotificationRules,
    ) -> Self {
        Self {
            course_file_store,
            approval_store,
            comment_store,
            evaluator,
            dispatcher,
            rules,
        }
    }

    /// Applies an approval action to a course file.
    ///
    /// A non-empty comment accompanying any action is also posted as a
    /// file-scoped thread, so review feedback shows up in the discussion
    /// alongside the history record.
    pub async fn transition(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
        action: ApprovalAction,
        comment: Option<&str>,
    ) -> AppResult<CourseFile> {
        let mut course_file = self
            .course_file_store
            .find_by_id(course_file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("course file {course_file_id} not found")))?;

        if course_file.archived {
            return Err(AppError::not_editable(format!(
                "course file {course_file_id} is archived"
            )));
        }

        let from_status = course_file.status;
        let to_status = action.next_status(from_status).ok_or_else(|| {
            AppError::invalid_transition(format!(
                "action '{action}' is not allowed from status {from_status}"
            ))
        })?;

        self.evaluator
            .authorize_transition(principal, &course_file, action)?;

        let comment_text = comment.map(str::trim).filter(|c| !c.is_empty());
        if action.requires_comment() && comment_text.is_none() {
            return Err(AppError::missing_comment(format!(
                "action '{action}' requires a comment explaining the return"
            )));
        }

        self.course_file_store
            .set_status(course_file_id, to_status)
            .await?;
        course_file.status = to_status;

        let transition = ApprovalTransition {
            id: ApprovalId::new(),
            course_file_id,
            from_status,
            to_status,
            action,
            stage: action.stage(from_status),
            actor_id: principal.id,
            actor_name: principal.display_name.clone(),
            actor_role: principal.acting_role,
            comment: comment_text.map(str::to_string),
            acted_at: Utc::now(),
        };
        self.approval_store.append(&transition).await?;

        if let Some(text) = comment_text {
            let thread = Comment::new(
                course_file_id,
                None,
                None,
                principal.id,
                principal.display_name.clone(),
                principal.acting_role,
                text,
            );
            self.comment_store.create(&thread).await?;
        }

        info!(
            course_file_id = %course_file_id,
            action = %action,
            from_status = %from_status,
            to_status = %to_status,
            actor_id = %principal.id,
            "Approval transition applied"
        );

        let event = DomainEvent::new(
            Some(principal.id),
            EventPayload::CourseFile(CourseFileEvent::Transitioned {
                course_file_id,
                action: action.to_string(),
                from_status: from_status.to_string(),
                to_status: to_status.to_string(),
                comment: transition.comment.clone(),
            }),
        );
        let recipients = self
            .rules
            .transition_subscribers(&course_file, to_status, principal.id)
            .await;
        if let Err(e) = self.dispatcher.dispatch(&recipients, &event).await {
            warn!(event_id = %event.id, error = %e, "Notification dispatch failed");
        }

        Ok(course_file)
    }

    /// Full approval history for a course file, oldest first.
    pub async fn history(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<Vec<ApprovalTransition>> {
        self.require_view(principal, course_file_id).await?;
        self.approval_store.find_by_course_file(course_file_id).await
    }

    /// The most recent transition for a course file, if any.
    pub async fn last_transition(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<Option<ApprovalTransition>> {
        self.require_view(principal, course_file_id).await?;
        self.approval_store.find_latest(course_file_id).await
    }

    async fn require_view(
        &self,
        principal: &Principal,
        course_file_id: CourseFileId,
    ) -> AppResult<()> {
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
        Ok(())
    }
}
