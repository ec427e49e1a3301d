//! Approval transition audit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursevault_core::types::{ApprovalId, CourseFileId, PrincipalId};

use crate::course_file::CourseFileStatus;
use crate::principal::Role;

use super::{ApprovalAction, ApprovalStage};

/// An immutable audit entry produced by every state change.
///
/// Every return transition carries a non-empty comment; forward and
/// approve transitions may carry none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalTransition {
    /// Unique record identifier.
    pub id: ApprovalId,
    /// The course file that transitioned.
    pub course_file_id: CourseFileId,
    /// Status before the transition.
    pub from_status: CourseFileStatus,
    /// Status after the transition.
    pub to_status: CourseFileStatus,
    /// The action that was taken.
    pub action: ApprovalAction,
    /// The stage responsible for the action.
    pub stage: ApprovalStage,
    /// The acting principal.
    pub actor_id: PrincipalId,
    /// The acting principal's display name.
    pub actor_name: String,
    /// The acting role at the time of the action.
    pub actor_role: Role,
    /// Reviewer/teacher comment, when one was given.
    pub comment: Option<String>,
    /// When the action was taken.
    pub acted_at: DateTime<Utc>,
}
