//! Course file store — keyed by id, with teacher/department/tuple lookups.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursevault_core::types::{CourseFileId, CourseId, DepartmentId, PrincipalId};
use coursevault_core::{AppError, AppResult};
use coursevault_entity::course_file::{CourseFile, CourseFileStatus};

/// Persistence interface for course files.
#[async_trait]
pub trait CourseFileStore: Send + Sync + 'static {
    /// Persist a new course file.
    async fn create(&self, course_file: &CourseFile) -> AppResult<()>;

    /// Find a course file by id.
    async fn find_by_id(&self, id: CourseFileId) -> AppResult<Option<CourseFile>>;

    /// Update the status of a course file.
    async fn set_status(&self, id: CourseFileId, status: CourseFileStatus) -> AppResult<()>;

    /// Mark a course file archived.
    async fn set_archived(&self, id: CourseFileId, archived: bool) -> AppResult<()>;

    /// Delete a course file. Returns `true` if it existed.
    async fn delete(&self, id: CourseFileId) -> AppResult<bool>;

    /// All course files owned by a teacher.
    async fn find_by_teacher(&self, teacher_id: PrincipalId) -> AppResult<Vec<CourseFile>>;

    /// All course files in a department.
    async fn find_by_department(&self, department_id: DepartmentId) -> AppResult<Vec<CourseFile>>;

    /// Course files in a department with the given status.
    async fn find_by_department_and_status(
        &self,
        department_id: DepartmentId,
        status: CourseFileStatus,
    ) -> AppResult<Vec<CourseFile>>;

    /// Course files for any of the given courses with the given status.
    async fn find_by_courses_and_status(
        &self,
        course_ids: &[CourseId],
        status: CourseFileStatus,
    ) -> AppResult<Vec<CourseFile>>;

    /// The active (non-archived) course file for the identity tuple, if any.
    async fn find_active(
        &self,
        course_id: CourseId,
        teacher_id: PrincipalId,
        academic_year: &str,
        section: &str,
    ) -> AppResult<Option<CourseFile>>;
}

/// In-memory course file store using a Tokio RwLock for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryCourseFileStore {
    /// Course files keyed by id.
    files: Arc<RwLock<HashMap<CourseFileId, CourseFile>>>,
}

impl MemoryCourseFileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseFileStore for MemoryCourseFileStore {
    async fn create(&self, course_file: &CourseFile) -> AppResult<()> {
        let mut files = self.files.write().await;
        files.insert(course_file.id, course_file.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CourseFileId) -> AppResult<Option<CourseFile>> {
        let files = self.files.read().await;
        Ok(files.get(&id).cloned())
    }

    async fn set_status(&self, id: CourseFileId, status: CourseFileStatus) -> AppResult<()> {
        let mut files = self.files.write().await;
        let file = files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("course file {id} not found")))?;
        file.status = status;
        Ok(())
    }

    async fn set_archived(&self, id: CourseFileId, archived: bool) -> AppResult<()> {
        let mut files = self.files.write().await;
        let file = files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("course file {id} not found")))?;
        file.archived = archived;
        Ok(())
    }

    async fn delete(&self, id: CourseFileId) -> AppResult<bool> {
        let mut files = self.files.write().await;
        Ok(files.remove(&id).is_some())
    }

    async fn find_by_teacher(&self, teacher_id: PrincipalId) -> AppResult<Vec<CourseFile>> {
        let files = self.files.read().await;
        let mut found: Vec<CourseFile> = files
            .values()
            .filter(|f| f.teacher_id == teacher_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_department(&self, department_id: DepartmentId) -> AppResult<Vec<CourseFile>> {
        let files = self.files.read().await;
        let mut found: Vec<CourseFile> = files
            .values()
            .filter(|f| f.department_id == department_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_department_and_status(
        &self,
        department_id: DepartmentId,
        status: CourseFileStatus,
    ) -> AppResult<Vec<CourseFile>> {
        let files = self.files.read().await;
        let mut found: Vec<CourseFile> = files
            .values()
            .filter(|f| f.department_id == department_id && f.status == status)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_courses_and_status(
        &self,
        course_ids: &[CourseId],
        status: CourseFileStatus,
    ) -> AppResult<Vec<CourseFile>> {
        let files = self.files.read().await;
        let mut found: Vec<CourseFile> = files
            .values()
            .filter(|f| f.status == status && course_ids.contains(&f.course_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_active(
        &self,
        course_id: CourseId,
        teacher_id: PrincipalId,
        academic_year: &str,
        section: &str,
    ) -> AppResult<Option<CourseFile>> {
        let files = self.files.read().await;
        Ok(files
            .values()
            .find(|f| {
                !f.archived
                    && f.course_id == course_id
                    && f.teacher_id == teacher_id
                    && f.academic_year == academic_year
                    && f.section == section
            })
            .cloned())
    }
}
