//! Principal entity.

use serde::{Deserialize, Serialize};

use coursevault_core::types::{CourseId, DepartmentId, PrincipalId};
use coursevault_core::{AppError, AppResult};

use super::Role;

/// An authenticated principal as supplied by the identity provider.
///
/// A principal carries a fixed base role plus a selectable acting role
/// from an allowed set, so a teacher who is also a Subject Head (or an
/// HOD viewing as a teacher) is modeled explicitly rather than inferred.
/// Authorization is always evaluated against the acting role. Switching
/// is a pure state change with no side effects on stored entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Unique principal identifier.
    pub id: PrincipalId,
    /// Display name.
    pub display_name: String,
    /// The fixed base role.
    pub base_role: Role,
    /// Roles this principal is allowed to act as (always includes base).
    pub allowed_roles: Vec<Role>,
    /// The currently selected acting role.
    pub acting_role: Role,
    /// The principal's department, if any.
    pub department_id: Option<DepartmentId>,
    /// Courses this principal reviews as Subject Head.
    pub assigned_course_ids: Vec<CourseId>,
}

impl Principal {
    /// Create a principal acting as their base role.
    pub fn new(id: PrincipalId, display_name: impl Into<String>, base_role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            base_role,
            allowed_roles: vec![base_role],
            acting_role: base_role,
            department_id: None,
            assigned_course_ids: Vec::new(),
        }
    }

    /// Add an alternate role this principal may act as.
    pub fn with_alternate_role(mut self, role: Role) -> Self {
        if !self.allowed_roles.contains(&role) {
            self.allowed_roles.push(role);
        }
        self
    }

    /// Set the principal's department.
    pub fn in_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Set the courses this principal reviews as Subject Head.
    pub fn with_assigned_courses(mut self, course_ids: Vec<CourseId>) -> Self {
        self.assigned_course_ids = course_ids;
        self
    }

    /// Switch the acting role. Fails `Unauthorized` when the role is not
    /// in the allowed set.
    pub fn acting_as(&self, role: Role) -> AppResult<Self> {
        if !self.allowed_roles.contains(&role) {
            return Err(AppError::unauthorized(format!(
                "principal {} may not act as '{role}' (allowed: {:?})",
                self.id, self.allowed_roles
            )));
        }
        let mut switched = self.clone();
        switched.acting_role = role;
        Ok(switched)
    }

    /// Whether the acting role is admin.
    pub fn is_admin(&self) -> bool {
        self.acting_role.is_admin()
    }

    /// Whether this principal is assigned to review the given course.
    pub fn is_assigned_to(&self, course_id: CourseId) -> bool {
        self.assigned_course_ids.contains(&course_id)
    }
}
