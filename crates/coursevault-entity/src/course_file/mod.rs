//! Course file entity and its approval status.

pub mod model;
pub mod status;

pub use model::CourseFile;
pub use status::CourseFileStatus;
