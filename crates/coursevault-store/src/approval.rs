//! Approval history store — an append-only transition log per course file.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursevault_core::types::CourseFileId;
use coursevault_core::AppResult;
use coursevault_entity::approval::ApprovalTransition;

/// Persistence interface for the approval transition log.
#[async_trait]
pub trait ApprovalStore: Send + Sync + 'static {
    /// Append a transition record. Records are never updated or deleted.
    async fn append(&self, transition: &ApprovalTransition) -> AppResult<()>;

    /// Full history for a course file, oldest first.
    async fn find_by_course_file(
        &self,
        course_file_id: CourseFileId,
    ) -> AppResult<Vec<ApprovalTransition>>;

    /// The most recent transition for a course file, if any.
    async fn find_latest(
        &self,
        course_file_id: CourseFileId,
    ) -> AppResult<Option<ApprovalTransition>>;
}

/// In-memory approval store using a Tokio RwLock for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryApprovalStore {
    /// Transition logs keyed by course file, in append order.
    transitions: Arc<RwLock<HashMap<CourseFileId, Vec<ApprovalTransition>>>>,
}

impl MemoryApprovalStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApprovalStore for MemoryApprovalStore {
    async fn append(&self, transition: &ApprovalTransition) -> AppResult<()> {
        let mut transitions = self.transitions.write().await;
        transitions
            .entry(transition.course_file_id)
            .or_default()
            .push(transition.clone());
        Ok(())
    }

    async fn find_by_course_file(
        &self,
        course_file_id: CourseFileId,
    ) -> AppResult<Vec<ApprovalTransition>> {
        let transitions = self.transitions.read().await;
        let mut log = transitions.get(&course_file_id).cloned().unwrap_or_default();
        log.sort_by(|a, b| a.acted_at.cmp(&b.acted_at));
        Ok(log)
    }

    async fn find_latest(
        &self,
        course_file_id: CourseFileId,
    ) -> AppResult<Option<ApprovalTransition>> {
        let transitions = self.transitions.read().await;
        Ok(transitions
            .get(&course_file_id)
            .and_then(|log| log.last().cloned()))
    }
}
