//! Data model shared by every docmerge crate: the partial index record a
//! package contributes, and the errors raised when one is malformed.

pub mod error;
pub mod models;

pub use error::{ValidationError, ValidationResult};
pub use models::*;
