//! Comment-thread events.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, CourseFileId, DocumentId, HeadingId};

/// Events related to discussion threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommentEvent {
    /// A new comment thread was posted.
    Posted {
        /// The comment ID.
        comment_id: CommentId,
        /// The course file the comment is anchored to.
        course_file_id: CourseFileId,
        /// Optional heading scope.
        heading_id: Option<HeadingId>,
        /// Optional document-version scope.
        document_id: Option<DocumentId>,
    },
    /// A reply was appended to an existing comment thread.
    Replied {
        /// The thread the reply belongs to.
        comment_id: CommentId,
        /// The course file the thread is anchored to.
        course_file_id: CourseFileId,
    },
}
