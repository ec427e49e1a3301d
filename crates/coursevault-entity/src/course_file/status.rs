//! Course file status enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The approval pipeline status of a course file.
///
/// `Draft` is the initial state and `Approved` is terminal. The two
/// returned states record *which* reviewer bounced the file so that
/// resubmission flows and metrics can address the correct stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseFileStatus {
    /// Being assembled by the owning teacher.
    Draft,
    /// Submitted, awaiting the Subject Head.
    Submitted,
    /// Forwarded by the Subject Head, awaiting the HOD.
    UnderReviewHod,
    /// Returned to the teacher by the Subject Head.
    ReturnedBySubjectHead,
    /// Returned to the teacher by the HOD.
    ReturnedByHod,
    /// Final approval granted. Terminal.
    Approved,
}

impl CourseFileStatus {
    /// Whether the owning teacher may mutate the structure tree.
    ///
    /// Once submitted or under review the tree is frozen so the version a
    /// reviewer is approving is stable; approved files stay frozen.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            Self::Draft | Self::ReturnedBySubjectHead | Self::ReturnedByHod
        )
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether a reviewer currently holds the file.
    pub fn is_in_review(&self) -> bool {
        matches!(self, Self::Submitted | Self::UnderReviewHod)
    }

    /// Return the status as its persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::UnderReviewHod => "UNDER_REVIEW_HOD",
            Self::ReturnedBySubjectHead => "RETURNED_BY_SUBJECT_HEAD",
            Self::ReturnedByHod => "RETURNED_BY_HOD",
            Self::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for CourseFileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CourseFileStatus {
    type Err = coursevault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "SUBMITTED" => Ok(Self::Submitted),
            "UNDER_REVIEW_HOD" => Ok(Self::UnderReviewHod),
            "RETURNED_BY_SUBJECT_HEAD" => Ok(Self::ReturnedBySubjectHead),
            "RETURNED_BY_HOD" => Ok(Self::ReturnedByHod),
            "APPROVED" => Ok(Self::Approved),
            _ => Err(coursevault_core::AppError::validation(format!(
                "Invalid course file status: '{s}'"
            ))),
        }
    }
}
