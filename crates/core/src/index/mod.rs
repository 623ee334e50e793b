//! Merged documentation index
//!
//! - **Arc-wrapped immutable data**: readers hold a `GlobalIndex` snapshot
//! - **Builder for writes**: `IndexBuilder` applies records, then `build()`s
//!   the next snapshot

pub mod builder;
pub mod global;

pub use builder::{IndexBuilder, IngestOutcome};
pub use global::{GlobalIndex, InsertOutcome, TraitImplementors};
