//! Permission evaluation — capability resolution and transition authorization.

use coursevault_core::{AppError, AppResult};
use coursevault_entity::approval::{ApprovalAction, ApprovalStage};
use coursevault_entity::course_file::CourseFile;
use coursevault_entity::principal::{Capability, CapabilitySet, Principal, Role};

use crate::assignment;
use crate::policies::RolePolicies;

/// Resolves a principal's effective capability set and answers
/// point-in-time authorization questions.
///
/// Capabilities are always resolved against the principal's *acting*
/// role, never silently against the base role.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    /// The role policy table.
    policies: RolePolicies,
}

impl PermissionEvaluator {
    /// Creates an evaluator with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RolePolicies::new(),
        }
    }

    /// Creates an evaluator with custom policies.
    pub fn with_policies(policies: RolePolicies) -> Self {
        Self { policies }
    }

    /// Resolve the principal's effective capability set.
    pub fn resolve(&self, principal: &Principal) -> CapabilitySet {
        self.policies.capabilities_for(principal.acting_role)
    }

    /// Whether the principal holds the capability (wildcard or explicit).
    pub fn can(&self, principal: &Principal, cap: Capability) -> bool {
        self.resolve(principal).allows(cap)
    }

    /// Whether the principal holds at least one of the capabilities.
    pub fn can_any(&self, principal: &Principal, caps: &[Capability]) -> bool {
        self.resolve(principal).allows_any(caps)
    }

    /// Require a capability, failing `Unauthorized` when absent.
    pub fn require(&self, principal: &Principal, cap: Capability) -> AppResult<()> {
        if self.can(principal, cap) {
            Ok(())
        } else {
            Err(AppError::unauthorized(format!(
                "role '{}' does not hold capability '{cap}'",
                principal.acting_role
            )))
        }
    }

    /// Authorize an approval action on a course file.
    ///
    /// Beyond the generic capability, this checks *assignment*: the stage
    /// implied by (action, current status) must match the acting role, the
    /// teacher stage requires ownership, the Subject Head stage requires
    /// course assignment, and the HOD stage requires the owning
    /// department. The assignment check is a hard gate — the wildcard does
    /// not bypass it.
    pub fn authorize_transition(
        &self,
        principal: &Principal,
        course_file: &CourseFile,
        action: ApprovalAction,
    ) -> AppResult<()> {
        let stage = action.stage(course_file.status);
        match stage {
            ApprovalStage::Teacher => {
                self.require_acting_role(principal, Role::Teacher, action)?;
                assignment::require_owner(principal, course_file)?;
                self.require(principal, Capability::FileSubmit)
            }
            ApprovalStage::SubjectHead => {
                self.require_acting_role(principal, Role::SubjectHead, action)?;
                assignment::require_subject_head_assignment(principal, course_file)?;
                self.require(principal, Capability::FileApprove)
            }
            ApprovalStage::Hod => {
                self.require_acting_role(principal, Role::Hod, action)?;
                assignment::require_same_department(principal, course_file)?;
                self.require(principal, Capability::FileApprove)
            }
        }
    }

    fn require_acting_role(
        &self,
        principal: &Principal,
        required: Role,
        action: ApprovalAction,
    ) -> AppResult<()> {
        if principal.acting_role == required {
            Ok(())
        } else {
            Err(AppError::unauthorized(format!(
                "action '{action}' requires acting role '{required}', principal is acting as '{}'",
                principal.acting_role
            )))
        }
    }
}

impl Default for PermissionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
