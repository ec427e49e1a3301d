//! Principals, roles, and capabilities.

pub mod capability;
pub mod model;
pub mod role;

pub use capability::{Capability, CapabilitySet};
pub use model::Principal;
pub use role::Role;
