//! Heading entities and tree structures.

pub mod model;
pub mod tree;

pub use model::Heading;
pub use tree::{CourseFileTree, HeadingTreeNode};
