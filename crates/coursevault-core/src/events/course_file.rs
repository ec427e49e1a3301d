//! Course-file lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::{CourseFileId, CourseId, DepartmentId, PrincipalId};

/// Events related to the course-file approval lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CourseFileEvent {
    /// A course file was created (seeded from a template).
    Created {
        /// The course file ID.
        course_file_id: CourseFileId,
        /// The course this dossier covers.
        course_id: CourseId,
        /// The owning teacher.
        teacher_id: PrincipalId,
        /// The owning department.
        department_id: DepartmentId,
        /// Number of template-origin headings seeded.
        seeded_headings: usize,
    },
    /// A course file moved through an approval transition.
    Transitioned {
        /// The course file ID.
        course_file_id: CourseFileId,
        /// The approval action taken (display form, e.g. `"forward"`).
        action: String,
        /// Status before the transition.
        from_status: String,
        /// Status after the transition.
        to_status: String,
        /// The reviewer/teacher comment, when one was given.
        comment: Option<String>,
    },
    /// A draft course file was deleted by its owner.
    Deleted {
        /// The course file ID.
        course_file_id: CourseFileId,
    },
    /// An approved course file was archived, freeing its active tuple.
    Archived {
        /// The course file ID.
        course_file_id: CourseFileId,
    },
}
