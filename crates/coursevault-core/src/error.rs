//! Unified application error types for CourseVault.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The core never produces user-facing
//! strings; messages are diagnostic context (ids involved, current status,
//! attempted action) for the caller to translate.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// The principal lacks the permission or assignment for the action.
    Unauthorized,
    /// The requested approval action is not valid from the current status.
    InvalidTransition,
    /// A return action was attempted without a non-empty comment.
    MissingComment,
    /// A structure mutation was attempted while the course file status forbids it.
    NotEditable,
    /// A rename or delete was attempted on a template-origin heading.
    TemplateNodeImmutable,
    /// The named parent heading does not belong to the same course file.
    InvalidParent,
    /// A comment scope references a document outside the named heading or course file.
    InvalidScope,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate active course file, concurrent modification).
    Conflict,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::InvalidTransition => write!(f, "INVALID_TRANSITION"),
            Self::MissingComment => write!(f, "MISSING_COMMENT"),
            Self::NotEditable => write!(f, "NOT_EDITABLE"),
            Self::TemplateNodeImmutable => write!(f, "TEMPLATE_NODE_IMMUTABLE"),
            Self::InvalidParent => write!(f, "INVALID_PARENT"),
            Self::InvalidScope => write!(f, "INVALID_SCOPE"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout CourseVault.
///
/// All operations surface failures as an `AppError` carrying a typed
/// [`ErrorKind`] plus a diagnostic message. None of these are retried
/// internally — they are logical/authorization errors, not transient faults.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A diagnostic message for the caller.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create an invalid-transition error.
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTransition, message)
    }

    /// Create a missing-comment error.
    pub fn missing_comment(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingComment, message)
    }

    /// Create a not-editable error.
    pub fn not_editable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotEditable, message)
    }

    /// Create a template-node-immutable error.
    pub fn template_node_immutable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TemplateNodeImmutable, message)
    }

    /// Create an invalid-parent error.
    pub fn invalid_parent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParent, message)
    }

    /// Create an invalid-scope error.
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidScope, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
