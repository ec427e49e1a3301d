//! # coursevault-entity
//!
//! Domain entity models for CourseVault. Every struct in this crate
//! represents a persisted record or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod approval;
pub mod comment;
pub mod course_file;
pub mod document;
pub mod heading;
pub mod principal;
