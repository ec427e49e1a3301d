//! Template catalog collaborator.
//!
//! The catalog supplies an ordered, optionally nested list of heading
//! titles used to seed a new course file's template-origin headings. The
//! core calls it only at course-file creation time.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{DepartmentId, TemplateId};

/// One heading entry within a template, optionally nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateHeading {
    /// The heading title.
    pub title: String,
    /// Nested child headings, in order.
    #[serde(default)]
    pub children: Vec<TemplateHeading>,
}

impl TemplateHeading {
    /// Create a leaf template heading.
    pub fn leaf(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Total number of headings in this entry including descendants.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TemplateHeading::count).sum::<usize>()
    }
}

/// The ordered heading structure of one template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStructure {
    /// The template identifier.
    pub id: TemplateId,
    /// Root-level headings, in order.
    pub headings: Vec<TemplateHeading>,
}

impl TemplateStructure {
    /// Total number of headings including nested children.
    pub fn count(&self) -> usize {
        self.headings.iter().map(TemplateHeading::count).sum()
    }
}

/// Supplies the heading template for a department.
#[async_trait]
pub trait TemplateCatalog: Send + Sync + 'static {
    /// Return the template used for new course files in the department.
    async fn department_template(&self, department_id: DepartmentId)
    -> AppResult<TemplateStructure>;
}
