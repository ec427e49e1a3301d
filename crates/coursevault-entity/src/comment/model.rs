//! Comment and reply entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursevault_core::types::{CommentId, CourseFileId, DocumentId, HeadingId, PrincipalId, ReplyId};

use crate::principal::Role;

/// A discussion thread anchored to a course file, optionally further
/// scoped to a heading or a specific document version.
///
/// A document-scoped comment implicitly also belongs to that document's
/// heading and course file. Posted comments are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// The course file this comment is anchored to.
    pub course_file_id: CourseFileId,
    /// Optional heading scope.
    pub heading_id: Option<HeadingId>,
    /// Optional document-version scope.
    pub document_id: Option<DocumentId>,
    /// The authoring principal.
    pub author_id: PrincipalId,
    /// The author's display name.
    pub author_name: String,
    /// The author's acting role at the time of posting.
    pub author_role: Role,
    /// Comment text.
    pub text: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
    /// Ordered replies. Replies do not themselves accept replies.
    pub replies: Vec<Reply>,
}

/// A single reply within a comment thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    /// Unique reply identifier.
    pub id: ReplyId,
    /// The authoring principal.
    pub author_id: PrincipalId,
    /// The author's display name.
    pub author_name: String,
    /// The author's acting role at the time of replying.
    pub author_role: Role,
    /// Reply text.
    pub text: String,
    /// When the reply was posted.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment thread root.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        course_file_id: CourseFileId,
        heading_id: Option<HeadingId>,
        document_id: Option<DocumentId>,
        author_id: PrincipalId,
        author_name: impl Into<String>,
        author_role: Role,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: CommentId::new(),
            course_file_id,
            heading_id,
            document_id,
            author_id,
            author_name: author_name.into(),
            author_role,
            text: text.into(),
            created_at: Utc::now(),
            replies: Vec::new(),
        }
    }

    /// Whether this comment appears in the heading-only view: scoped to a
    /// heading with no document scope.
    pub fn is_heading_scoped(&self) -> bool {
        self.heading_id.is_some() && self.document_id.is_none()
    }
}

impl Reply {
    /// Create a new reply.
    pub fn new(
        author_id: PrincipalId,
        author_name: impl Into<String>,
        author_role: Role,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: ReplyId::new(),
            author_id,
            author_name: author_name.into(),
            author_role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
