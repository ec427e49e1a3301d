//! # coursevault-store
//!
//! Store traits and in-memory implementations for CourseVault entities.
//!
//! Each module defines an `async_trait` store interface plus a
//! `Memory*Store` backed by `tokio::sync::RwLock<HashMap>`. Reads clone
//! state out under a read lock (snapshot semantics), so a concurrent
//! completion computation never observes a half-applied delete cascade.
//! Suitable for single-node deployments and the test harness; a database
//! implementation plugs in behind the same traits.

pub mod approval;
pub mod comment;
pub mod course_file;
pub mod document;
pub mod heading;
pub mod template;

pub use approval::{ApprovalStore, MemoryApprovalStore};
pub use comment::{CommentStore, MemoryCommentStore};
pub use course_file::{CourseFileStore, MemoryCourseFileStore};
pub use document::{DocumentStore, MemoryDocumentStore};
pub use heading::{HeadingStore, MemoryHeadingStore};
pub use template::MemoryTemplateCatalog;
