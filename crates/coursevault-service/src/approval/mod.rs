//! Approval workflow operations.

pub mod service;

pub use service::ApprovalService;
