use std::sync::{PoisonError, RwLock};

use docmerge_api::PartialIndexRecord;

use crate::error::{DocmergeError, Result};
use crate::index::{GlobalIndex, IndexBuilder, IngestOutcome};
use crate::query::{IndexStats, QueryEngine};

/// Sole owner of the merged index for one session.
///
/// Ingests run one at a time under the write lock. Readers take a
/// `GlobalIndex` snapshot, which later ingests never modify.
pub struct MergeEngine {
    current: RwLock<GlobalIndex>,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeEngine {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(GlobalIndex::empty()),
        }
    }

    /// Merges one record. Callers are expected to have validated it.
    pub fn ingest(&self, record: PartialIndexRecord) -> Result<IngestOutcome> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| DocmergeError::Internal("global index lock poisoned".to_string()))?;

        let mut builder = IndexBuilder::from_index(std::mem::take(&mut *guard));
        let outcome = builder.apply_record(record);
        *guard = builder.build();

        tracing::debug!(
            package = %outcome.package,
            sidebar_changed = outcome.sidebar_changed,
            added = outcome.implementors_added,
            skipped = outcome.implementors_skipped,
            generation = guard.generation(),
            "ingested record"
        );
        Ok(outcome)
    }

    /// Get a snapshot of the current index
    pub fn snapshot(&self) -> GlobalIndex {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Query view over the latest committed state.
    pub fn query(&self) -> QueryEngine<GlobalIndex> {
        QueryEngine::new(self.snapshot())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::of(&self.snapshot())
    }
}
