//! Comment-thread operations.

pub mod service;

pub use service::{CommentService, PostCommentRequest};
