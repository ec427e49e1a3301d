//! Heading-tree and document-version operations.

pub mod completion;
pub mod service;
pub mod tree;

pub use service::{CreateHeadingRequest, StructureService, UploadDocumentRequest};
