//! Notification subscriber resolution and dispatch.

pub mod dispatcher;
pub mod rules;

pub use dispatcher::LogDispatcher;
pub use rules::NotificationRules;
