//! # coursevault-auth
//!
//! Authorization for CourseVault. Resolves a principal's effective
//! capability set from the role policy table and answers point-in-time
//! authorization questions, including the assignment-gated transition
//! checks of the approval workflow.
//!
//! ## Modules
//!
//! - `policies` — role → capability mapping with the `all` wildcard
//! - `evaluator` — `can`/`can_any`/`resolve` and `authorize_transition`
//! - `assignment` — reviewer-assignment and read-access gates

pub mod assignment;
pub mod evaluator;
pub mod policies;

pub use evaluator::PermissionEvaluator;
pub use policies::RolePolicies;
