//! Named capabilities and capability sets.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named permission a role may hold.
///
/// `All` is the first-class wildcard, not a special-cased string
/// comparison: a set containing it allows every capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Wildcard: every capability.
    All,
    /// Create a new course file.
    CourseFileCreate,
    /// Upload document versions.
    DocumentUpload,
    /// Submit or resubmit a course file for review.
    FileSubmit,
    /// Act on a file in review (forward, return, approve).
    FileApprove,
    /// Manage department-level settings.
    DepartmentManage,
    /// View review and completion reports.
    ReportsView,
}

impl Capability {
    /// Return the capability as its persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::CourseFileCreate => "create_course_file",
            Self::DocumentUpload => "upload_document",
            Self::FileSubmit => "submit_file",
            Self::FileApprove => "approve_file",
            Self::DepartmentManage => "manage_dept",
            Self::ReportsView => "view_reports",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = coursevault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "create_course_file" => Ok(Self::CourseFileCreate),
            "upload_document" => Ok(Self::DocumentUpload),
            "submit_file" => Ok(Self::FileSubmit),
            "approve_file" => Ok(Self::FileApprove),
            "manage_dept" => Ok(Self::DepartmentManage),
            "view_reports" => Ok(Self::ReportsView),
            _ => Err(coursevault_core::AppError::validation(format!(
                "Unknown capability: '{s}'"
            ))),
        }
    }
}

/// A principal's effective capability set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilitySet {
    caps: HashSet<Capability>,
}

impl CapabilitySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a capability.
    pub fn insert(&mut self, cap: Capability) {
        self.caps.insert(cap);
    }

    /// Whether the wildcard is held.
    pub fn is_wildcard(&self) -> bool {
        self.caps.contains(&Capability::All)
    }

    /// Whether the given capability is allowed: wildcard held or the
    /// capability explicitly present.
    pub fn allows(&self, cap: Capability) -> bool {
        self.is_wildcard() || self.caps.contains(&cap)
    }

    /// Whether at least one of the given capabilities is allowed.
    pub fn allows_any(&self, caps: &[Capability]) -> bool {
        caps.iter().any(|c| self.allows(*c))
    }

    /// Iterate over the explicitly held capabilities.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.caps.iter()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            caps: iter.into_iter().collect(),
        }
    }
}
