//! Approval workflow entities: actions, stages, and the audit record.

pub mod action;
pub mod model;

pub use action::{ApprovalAction, ApprovalStage};
pub use model::ApprovalTransition;
