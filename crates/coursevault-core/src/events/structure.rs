//! Structure-tree events: headings and document versions.

use serde::{Deserialize, Serialize};

use crate::types::{CourseFileId, DocumentId, HeadingId};

/// Events related to heading and document mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StructureEvent {
    /// A heading was added to a course file's tree.
    HeadingCreated {
        /// The new heading ID.
        heading_id: HeadingId,
        /// The owning course file.
        course_file_id: CourseFileId,
        /// The parent heading, if not root-level.
        parent_id: Option<HeadingId>,
        /// The heading title.
        title: String,
    },
    /// A non-template heading was renamed.
    HeadingRenamed {
        /// The heading ID.
        heading_id: HeadingId,
        /// The new title.
        title: String,
    },
    /// A non-template heading was deleted, cascading to its subtree.
    HeadingDeleted {
        /// The deleted heading ID.
        heading_id: HeadingId,
        /// Total headings removed, including descendants.
        cascade_count: usize,
    },
    /// A non-template heading was moved to a new position among its
    /// siblings.
    HeadingReordered {
        /// The heading ID.
        heading_id: HeadingId,
        /// The new sibling position, 1-based.
        order_index: i32,
    },
    /// A heading's explicit completed flag was changed.
    HeadingCompletedSet {
        /// The heading ID.
        heading_id: HeadingId,
        /// The new flag value.
        completed: bool,
    },
    /// A document version was uploaded to a heading.
    DocumentUploaded {
        /// The new document version ID.
        document_id: DocumentId,
        /// The heading it is attached to.
        heading_id: HeadingId,
        /// The logical file name.
        file_name: String,
        /// The version number assigned.
        version: i32,
        /// Size in bytes.
        size_bytes: u64,
    },
    /// One document version was deleted.
    DocumentDeleted {
        /// The deleted document version ID.
        document_id: DocumentId,
        /// The heading it was attached to.
        heading_id: HeadingId,
    },
}
