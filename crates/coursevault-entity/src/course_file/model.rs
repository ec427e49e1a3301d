//! Course file entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursevault_core::types::{CourseFileId, CourseId, DepartmentId, PrincipalId};

use super::CourseFileStatus;

/// One teacher's per-offering dossier subject to the approval workflow.
///
/// Exactly one course file per (course, teacher, academic year, section)
/// tuple is active (non-archived) at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseFile {
    /// Unique course file identifier.
    pub id: CourseFileId,
    /// The course this dossier covers.
    pub course_id: CourseId,
    /// The owning teacher.
    pub teacher_id: PrincipalId,
    /// The owning teacher's department, resolved at creation time.
    pub department_id: DepartmentId,
    /// Academic year, e.g. `"2025-2026"`.
    pub academic_year: String,
    /// Section designation, e.g. `"A"`.
    pub section: String,
    /// Current approval status.
    pub status: CourseFileStatus,
    /// Whether this file has been archived, freeing its active tuple.
    pub archived: bool,
    /// When the course file was created.
    pub created_at: DateTime<Utc>,
}

impl CourseFile {
    /// Create a new draft course file.
    pub fn new(
        course_id: CourseId,
        teacher_id: PrincipalId,
        department_id: DepartmentId,
        academic_year: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: CourseFileId::new(),
            course_id,
            teacher_id,
            department_id,
            academic_year: academic_year.into(),
            section: section.into(),
            status: CourseFileStatus::Draft,
            archived: false,
            created_at: Utc::now(),
        }
    }

    /// Whether the given principal owns this course file.
    pub fn is_owned_by(&self, principal_id: PrincipalId) -> bool {
        self.teacher_id == principal_id
    }
}
