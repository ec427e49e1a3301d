//! Input limit configuration.

use serde::{Deserialize, Serialize};

/// Upper bounds enforced on structure and comment mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum nesting depth of the heading tree (root level = 1).
    #[serde(default = "default_max_heading_depth")]
    pub max_heading_depth: u32,
    /// Maximum length of a heading title in characters.
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    /// Maximum length of a comment or reply in characters.
    #[serde(default = "default_max_comment_length")]
    pub max_comment_length: usize,
    /// Maximum document size in megabytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl LimitsConfig {
    /// Maximum document size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_heading_depth: default_max_heading_depth(),
            max_title_length: default_max_title_length(),
            max_comment_length: default_max_comment_length(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

fn default_max_heading_depth() -> u32 {
    5
}

fn default_max_title_length() -> usize {
    200
}

fn default_max_comment_length() -> usize {
    4000
}

fn default_max_file_size_mb() -> u64 {
    50
}
