//! Approval actions and the transition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::course_file::CourseFileStatus;

/// The reviewer stage responsible for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStage {
    /// The owning teacher (submit/resubmit).
    Teacher,
    /// The Subject Head assigned to the course.
    SubjectHead,
    /// The HOD of the owning department.
    Hod,
}

/// An action requested against the approval state machine.
///
/// `Forward` (Subject Head → HOD review) and `Approve` (HOD → terminal)
/// are deliberately distinct actions even though some surfaces label both
/// "approve".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    /// Teacher submits a draft for review.
    Submit,
    /// Teacher resubmits a returned file.
    Resubmit,
    /// Subject Head forwards a submitted file to the HOD.
    Forward,
    /// A reviewer returns the file to the teacher. Requires a comment.
    Return,
    /// HOD grants final approval.
    Approve,
}

impl ApprovalAction {
    /// The transition table: the status this action leads to from the
    /// given status, or `None` when no edge exists.
    pub fn next_status(&self, from: CourseFileStatus) -> Option<CourseFileStatus> {
        use CourseFileStatus as S;
        match (self, from) {
            (Self::Submit, S::Draft) => Some(S::Submitted),
            (Self::Resubmit, S::ReturnedBySubjectHead | S::ReturnedByHod) => Some(S::Submitted),
            (Self::Forward, S::Submitted) => Some(S::UnderReviewHod),
            (Self::Return, S::Submitted) => Some(S::ReturnedBySubjectHead),
            (Self::Return, S::UnderReviewHod) => Some(S::ReturnedByHod),
            (Self::Approve, S::UnderReviewHod) => Some(S::Approved),
            _ => None,
        }
    }

    /// Whether this action requires a non-empty comment.
    pub fn requires_comment(&self) -> bool {
        matches!(self, Self::Return)
    }

    /// The stage acting when this action is taken from the given status.
    ///
    /// Only meaningful for (action, status) pairs that have an edge in the
    /// transition table.
    pub fn stage(&self, from: CourseFileStatus) -> ApprovalStage {
        match self {
            Self::Submit | Self::Resubmit => ApprovalStage::Teacher,
            Self::Forward => ApprovalStage::SubjectHead,
            Self::Approve => ApprovalStage::Hod,
            Self::Return => match from {
                CourseFileStatus::UnderReviewHod => ApprovalStage::Hod,
                _ => ApprovalStage::SubjectHead,
            },
        }
    }

    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Resubmit => "resubmit",
            Self::Forward => "forward",
            Self::Return => "return",
            Self::Approve => "approve",
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApprovalAction {
    type Err = coursevault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submit" => Ok(Self::Submit),
            "resubmit" => Ok(Self::Resubmit),
            "forward" => Ok(Self::Forward),
            "return" => Ok(Self::Return),
            "approve" => Ok(Self::Approve),
            _ => Err(coursevault_core::AppError::validation(format!(
                "Invalid approval action: '{s}'. Expected one of: submit, resubmit, forward, return, approve"
            ))),
        }
    }
}

impl fmt::Display for ApprovalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Teacher => write!(f, "teacher"),
            Self::SubjectHead => write!(f, "subject_head"),
            Self::Hod => write!(f, "hod"),
        }
    }
}
