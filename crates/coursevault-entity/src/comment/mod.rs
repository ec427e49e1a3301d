//! Comment thread entities.

pub mod model;

pub use model::{Comment, Reply};
