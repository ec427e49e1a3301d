//! Role-to-capability mapping definitions.

use std::collections::HashMap;

use coursevault_entity::principal::{Capability, CapabilitySet, Role};

/// Defines the mapping from each role to its set of capabilities.
#[derive(Debug, Clone)]
pub struct RolePolicies {
    /// Role → capability set.
    policies: HashMap<Role, CapabilitySet>,
}

impl RolePolicies {
    /// Creates the default policy set.
    ///
    /// Admin and HOD hold the `all` wildcard; Subject Head and Teacher
    /// hold explicit capabilities only.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Teacher: assembles and submits their own course files.
        let teacher: CapabilitySet = [
            Capability::CourseFileCreate,
            Capability::DocumentUpload,
            Capability::FileSubmit,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Teacher, teacher);

        // Subject Head: first-stage review plus reports.
        let subject_head: CapabilitySet = [Capability::FileApprove, Capability::ReportsView]
            .into_iter()
            .collect();
        policies.insert(Role::SubjectHead, subject_head);

        // HOD: wildcard, with department management called out explicitly.
        let hod: CapabilitySet = [
            Capability::All,
            Capability::FileApprove,
            Capability::DepartmentManage,
            Capability::ReportsView,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Hod, hod);

        // Admin: wildcard.
        let admin: CapabilitySet = [Capability::All].into_iter().collect();
        policies.insert(Role::Admin, admin);

        Self { policies }
    }

    /// Creates a policy table from custom role mappings.
    pub fn with_policies(policies: HashMap<Role, CapabilitySet>) -> Self {
        Self { policies }
    }

    /// Return the capability set for a role. Unknown roles hold nothing.
    pub fn capabilities_for(&self, role: Role) -> CapabilitySet {
        self.policies.get(&role).cloned().unwrap_or_default()
    }

    /// Whether the role allows the capability.
    pub fn allows(&self, role: Role, cap: Capability) -> bool {
        self.policies.get(&role).is_some_and(|set| set.allows(cap))
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::new()
    }
}
