//! Log-backed notification dispatcher.

use async_trait::async_trait;
use tracing::info;

use coursevault_core::events::DomainEvent;
use coursevault_core::traits::NotificationDispatcher;
use coursevault_core::types::PrincipalId;
use coursevault_core::AppResult;

/// Dispatcher that records deliveries in the structured log.
///
/// Stands in for a mail or push channel in single-node deployments and
/// in the test harness.
#[derive(Debug, Clone, Default)]
pub struct LogDispatcher;

impl LogDispatcher {
    /// Creates a new log dispatcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(&self, recipients: &[PrincipalId], event: &DomainEvent) -> AppResult<()> {
        if recipients.is_empty() {
            return Ok(());
        }
        info!(
            event_id = %event.id,
            recipients = recipients.len(),
            "Notification dispatched"
        );
        Ok(())
    }
}
