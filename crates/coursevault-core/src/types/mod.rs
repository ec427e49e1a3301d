//! Shared value types used across CourseVault crates.

pub mod blob;
pub mod id;

pub use blob::BlobRef;
pub use id::{
    ApprovalId, CommentId, CourseFileId, CourseId, DepartmentId, DocumentId, HeadingId,
    PrincipalId, ReplyId, TemplateId,
};
