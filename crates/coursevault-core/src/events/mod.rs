//! Domain events emitted by CourseVault operations.
//!
//! Events are handed to the notification dispatcher collaborator after the
//! authoritative state change commits. Delivery is fire-and-forget: a
//! dispatch failure never rolls back the core write.

pub mod comment;
pub mod course_file;
pub mod structure;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PrincipalId;

pub use comment::CommentEvent;
pub use course_file::CourseFileEvent;
pub use structure::StructureEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The principal who caused the event.
    pub actor_id: Option<PrincipalId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A course-file lifecycle event.
    CourseFile(CourseFileEvent),
    /// A structure-tree event (headings and document versions).
    Structure(StructureEvent),
    /// A comment-thread event.
    Comment(CommentEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<PrincipalId>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
