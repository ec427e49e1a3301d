//! Notification subscriber resolution rules — determines who should receive which notifications.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use coursevault_core::types::{CourseId, DepartmentId, PrincipalId};
use coursevault_entity::course_file::{CourseFile, CourseFileStatus};

/// Resolves which principals should receive notifications for a given
/// event.
///
/// The reviewer registry maps courses to their Subject Heads and
/// departments to their HODs; it is populated at wiring time from the
/// identity provider. The actor is always excluded from their own
/// notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationRules {
    /// Subject Heads registered per course.
    subject_heads: Arc<RwLock<HashMap<CourseId, Vec<PrincipalId>>>>,
    /// HODs registered per department.
    hods: Arc<RwLock<HashMap<DepartmentId, Vec<PrincipalId>>>>,
}

impl NotificationRules {
    /// Creates a rules engine with an empty reviewer registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a Subject Head as reviewer for a course.
    pub async fn register_subject_head(&self, course_id: CourseId, principal_id: PrincipalId) {
        let mut subject_heads = self.subject_heads.write().await;
        let reviewers = subject_heads.entry(course_id).or_default();
        if !reviewers.contains(&principal_id) {
            reviewers.push(principal_id);
        }
    }

    /// Register an HOD for a department.
    pub async fn register_hod(&self, department_id: DepartmentId, principal_id: PrincipalId) {
        let mut hods = self.hods.write().await;
        let reviewers = hods.entry(department_id).or_default();
        if !reviewers.contains(&principal_id) {
            reviewers.push(principal_id);
        }
    }

    /// Principals to notify after an approval transition.
    ///
    /// The file landing in `Submitted` notifies the course's Subject
    /// Heads, `UnderReviewHod` notifies the department's HODs, and a
    /// return or final approval notifies the owning teacher.
    pub async fn transition_subscribers(
        &self,
        course_file: &CourseFile,
        to_status: CourseFileStatus,
        exclude_actor: PrincipalId,
    ) -> Vec<PrincipalId> {
        let mut subscribers = match to_status {
            CourseFileStatus::Submitted => {
                let subject_heads = self.subject_heads.read().await;
                subject_heads
                    .get(&course_file.course_id)
                    .cloned()
                    .unwrap_or_default()
            }
            CourseFileStatus::UnderReviewHod => {
                let hods = self.hods.read().await;
                hods.get(&course_file.department_id)
                    .cloned()
                    .unwrap_or_default()
            }
            CourseFileStatus::ReturnedBySubjectHead
            | CourseFileStatus::ReturnedByHod
            | CourseFileStatus::Approved => vec![course_file.teacher_id],
            CourseFileStatus::Draft => Vec::new(),
        };
        subscribers.retain(|id| *id != exclude_actor);
        subscribers
    }

    /// Principals to notify about a comment or reply: the owning teacher
    /// plus every registered reviewer of the file.
    pub async fn comment_subscribers(
        &self,
        course_file: &CourseFile,
        exclude_actor: PrincipalId,
    ) -> Vec<PrincipalId> {
        let mut subscribers = vec![course_file.teacher_id];
        {
            let subject_heads = self.subject_heads.read().await;
            if let Some(reviewers) = subject_heads.get(&course_file.course_id) {
                for id in reviewers {
                    if !subscribers.contains(id) {
                        subscribers.push(*id);
                    }
                }
            }
        }
        {
            let hods = self.hods.read().await;
            if let Some(reviewers) = hods.get(&course_file.department_id) {
                for id in reviewers {
                    if !subscribers.contains(id) {
                        subscribers.push(*id);
                    }
                }
            }
        }
        subscribers.retain(|id| *id != exclude_actor);
        subscribers
    }
}
