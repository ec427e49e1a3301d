//! # coursevault-service
//!
//! Business logic services for CourseVault. Each service orchestrates the
//! stores, the permission evaluator, and the notification dispatcher; all
//! authorization decisions and workflow invariants are enforced here, not
//! in the stores.

pub mod approval;
pub mod comment;
pub mod course_file;
pub mod notification;
pub mod structure;

pub use approval::ApprovalService;
pub use comment::CommentService;
pub use course_file::CourseFileService;
pub use notification::{LogDispatcher, NotificationRules};
pub use structure::StructureService;
