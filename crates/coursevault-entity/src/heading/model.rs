//! Heading entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursevault_core::types::{CourseFileId, HeadingId};

/// A node in the per-course-file structure tree.
///
/// Template-origin headings are seeded atomically when the course file is
/// instantiated and can never be renamed or deleted; only new child
/// headings may be added beneath them. The flag is persisted explicitly,
/// never inferred from the parent reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    /// Unique heading identifier.
    pub id: HeadingId,
    /// The course file that owns this heading.
    pub course_file_id: CourseFileId,
    /// Parent heading; `None` means root-level.
    pub parent_id: Option<HeadingId>,
    /// Heading title.
    pub title: String,
    /// Sibling ordering index.
    pub order_index: i32,
    /// Whether this heading was seeded from the template.
    pub is_template_origin: bool,
    /// Explicit completion flag, settable by the owning teacher.
    pub completed: bool,
    /// When the heading was created.
    pub created_at: DateTime<Utc>,
}

impl Heading {
    /// Create a new teacher-added heading.
    pub fn new(
        course_file_id: CourseFileId,
        parent_id: Option<HeadingId>,
        title: impl Into<String>,
        order_index: i32,
    ) -> Self {
        Self {
            id: HeadingId::new(),
            course_file_id,
            parent_id,
            title: title.into(),
            order_index,
            is_template_origin: false,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Create a template-origin heading seeded at course-file creation.
    pub fn template_origin(
        course_file_id: CourseFileId,
        parent_id: Option<HeadingId>,
        title: impl Into<String>,
        order_index: i32,
    ) -> Self {
        Self {
            is_template_origin: true,
            ..Self::new(course_file_id, parent_id, title, order_index)
        }
    }
}
