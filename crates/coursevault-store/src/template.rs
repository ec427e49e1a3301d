//! In-memory template catalog keyed by department.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursevault_core::traits::{TemplateCatalog, TemplateStructure};
use coursevault_core::types::DepartmentId;
use coursevault_core::{AppError, AppResult};

/// Template catalog backed by a map from department to structure.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateCatalog {
    templates: Arc<RwLock<HashMap<DepartmentId, TemplateStructure>>>,
}

impl MemoryTemplateCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the template for a department.
    pub async fn insert(&self, department_id: DepartmentId, template: TemplateStructure) {
        let mut templates = self.templates.write().await;
        templates.insert(department_id, template);
    }
}

#[async_trait]
impl TemplateCatalog for MemoryTemplateCatalog {
    async fn department_template(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<TemplateStructure> {
        let templates = self.templates.read().await;
        templates.get(&department_id).cloned().ok_or_else(|| {
            AppError::not_found(format!("no template registered for department {department_id}"))
        })
    }
}
