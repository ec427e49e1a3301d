//! Reviewer-assignment and read-access gates.
//!
//! Assignment is a hard gate independent of capability flags: a Subject
//! Head may only act on course files for courses they are assigned to
//! review, and an HOD may only act within their own department.

use coursevault_core::{AppError, AppResult};
use coursevault_entity::course_file::CourseFile;
use coursevault_entity::principal::{Principal, Role};

/// Require that the principal owns the course file.
pub fn require_owner(principal: &Principal, course_file: &CourseFile) -> AppResult<()> {
    if course_file.is_owned_by(principal.id) {
        Ok(())
    } else {
        Err(AppError::unauthorized(format!(
            "principal {} does not own course file {}",
            principal.id, course_file.id
        )))
    }
}

/// Require that the principal is the Subject Head assigned to the course.
pub fn require_subject_head_assignment(
    principal: &Principal,
    course_file: &CourseFile,
) -> AppResult<()> {
    if principal.is_assigned_to(course_file.course_id) {
        Ok(())
    } else {
        Err(AppError::unauthorized(format!(
            "principal {} is not assigned to review course {}",
            principal.id, course_file.course_id
        )))
    }
}

/// Require that the principal's department matches the course file's.
pub fn require_same_department(principal: &Principal, course_file: &CourseFile) -> AppResult<()> {
    if principal.department_id == Some(course_file.department_id) {
        Ok(())
    } else {
        Err(AppError::unauthorized(format!(
            "principal {} is not in department {}",
            principal.id, course_file.department_id
        )))
    }
}

/// Whether the principal may read the course file (and therefore post to
/// and read its comment threads).
///
/// Read access goes to the owner, an admin, the HOD of the owning
/// department, and any Subject Head assigned to the course or acting
/// within the same department.
pub fn can_view(principal: &Principal, course_file: &CourseFile) -> bool {
    if course_file.is_owned_by(principal.id) {
        return true;
    }
    match principal.acting_role {
        Role::Admin => true,
        Role::Hod => principal.department_id == Some(course_file.department_id),
        Role::SubjectHead => {
            principal.is_assigned_to(course_file.course_id)
                || principal.department_id == Some(course_file.department_id)
        }
        Role::Teacher => false,
    }
}
