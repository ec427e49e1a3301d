//! Course-file lifecycle operations.

pub mod service;

pub use service::{CourseFileService, CreateCourseFileRequest};
