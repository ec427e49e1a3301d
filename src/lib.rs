//! # CourseVault
//!
//! A course-file lifecycle engine: teachers assemble per-offering
//! dossiers against a department template, documents accumulate retained
//! versions under headings, reviewers move files through a two-stage
//! approval state machine, and discussion threads anchor to any level of
//! the structure.
//!
//! This facade re-exports the workspace crates:
//!
//! - [`core`] — errors, config, ids, domain events, collaborator traits
//! - [`entity`] — the domain model
//! - [`auth`] — role policies and the permission evaluator
//! - [`store`] — store traits and in-memory implementations
//! - [`service`] — the business logic services

pub use coursevault_auth as auth;
pub use coursevault_core as core;
pub use coursevault_entity as entity;
pub use coursevault_service as service;
pub use coursevault_store as store;
