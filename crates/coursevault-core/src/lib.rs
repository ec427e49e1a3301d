//! # coursevault-core
//!
//! Core crate for CourseVault. Contains the unified error system, typed
//! identifiers, domain events, configuration schemas, and the traits
//! through which external collaborators (template catalog, blob storage,
//! notification delivery) are consumed.
//!
//! This crate has **no** internal dependencies on other CourseVault crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
