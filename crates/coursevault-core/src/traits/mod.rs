//! Traits through which the core consumes its external collaborators.
//!
//! The core never authenticates credentials, stores bytes, or delivers
//! notifications itself; these seams are filled by implementations outside
//! the core.

pub mod notifier;
pub mod template;

pub use notifier::NotificationDispatcher;
pub use template::{TemplateCatalog, TemplateHeading, TemplateStructure};
