//! Merge engine
//!
//! Accumulates partial index records into one `GlobalIndex`. Ingest is
//! idempotent, and commutative over any set of records that registers each
//! package once.

pub mod merge;
mod sink;

pub use merge::MergeEngine;
