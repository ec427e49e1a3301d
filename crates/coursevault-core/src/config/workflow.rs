//! Approval workflow configuration.

use serde::{Deserialize, Serialize};

/// Settings for course-file creation and the approval workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Academic year applied when a caller does not supply one.
    #[serde(default = "default_academic_year")]
    pub default_academic_year: String,
    /// Whether new course files are seeded from the department template.
    #[serde(default = "default_true")]
    pub seed_from_template: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_academic_year: default_academic_year(),
            seed_from_template: default_true(),
        }
    }
}

fn default_academic_year() -> String {
    "2025-2026".to_string()
}

fn default_true() -> bool {
    true
}
