//! Notification dispatch collaborator.

use async_trait::async_trait;

use crate::events::DomainEvent;
use crate::result::AppResult;
use crate::types::PrincipalId;

/// Delivers domain events to interested principals.
///
/// Dispatch happens after the authoritative state change commits; a
/// delivery failure is logged by the caller and never rolls back the
/// core transition.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync + 'static {
    /// Deliver an event to the given recipients.
    async fn dispatch(&self, recipients: &[PrincipalId], event: &DomainEvent) -> AppResult<()>;
}
