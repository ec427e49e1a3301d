//! Role enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Roles recognized by the permission system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owns course files and assembles their content.
    Teacher,
    /// First-stage reviewer, assigned per course.
    SubjectHead,
    /// Head of department, second-stage reviewer.
    Hod,
    /// Full system administrator.
    Admin,
}

impl Role {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role reviews course files.
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Self::SubjectHead | Self::Hod)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::SubjectHead => "subject_head",
            Self::Hod => "hod",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = coursevault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "teacher" => Ok(Self::Teacher),
            "subject_head" | "subjecthead" => Ok(Self::SubjectHead),
            "hod" => Ok(Self::Hod),
            "admin" => Ok(Self::Admin),
            _ => Err(coursevault_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: teacher, subject_head, hod, admin"
            ))),
        }
    }
}
