//! One documentation session: the registration channel in front of a merge
//! engine that may or may not exist yet.

use std::sync::{Arc, OnceLock};

use docmerge_api::PartialIndexRecord;
use docmerge_ingest::{Delivery, DrainReport, DynRecordSink, IngestError, RegistrationChannel};

use crate::engine::MergeEngine;
use crate::error::{DocmergeError, Result};
use crate::index::GlobalIndex;
use crate::query::QueryEngine;
use crate::validate::validate;

#[derive(Default)]
pub struct Session {
    channel: RegistrationChannel<PartialIndexRecord>,
    engine: OnceLock<Arc<MergeEngine>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `record` and hands it to the engine, or holds it until the
    /// engine is attached. A rejected record never touches the index.
    pub fn register(&self, record: PartialIndexRecord) -> Result<Delivery> {
        if let Err(err) = validate(&record) {
            tracing::warn!(package = %record.package, "rejected record: {}", err);
            return Err(err.into());
        }

        let package = record.package.clone();
        let delivery = self.channel.register(record)?;
        tracing::debug!(%package, ?delivery, "record registered");
        Ok(delivery)
    }

    /// Attaches `engine` and replays every record registered so far.
    pub fn attach_engine(&self, engine: Arc<MergeEngine>) -> Result<DrainReport> {
        self.engine
            .set(Arc::clone(&engine))
            .map_err(|_| IngestError::AlreadyReady)?;

        let sink: DynRecordSink<PartialIndexRecord> = engine;
        let report = self.channel.on_engine_ready(sink)?;
        tracing::info!(
            replayed = report.delivered,
            failed = report.failed,
            "merge engine ready"
        );
        Ok(report)
    }

    /// Creates and attaches an engine unless one is already in place.
    /// Returns the drain report only when this call did the attaching.
    pub fn ensure_engine(&self) -> Result<Option<DrainReport>> {
        if self.engine.get().is_some() {
            return Ok(None);
        }
        match self.attach_engine(Arc::new(MergeEngine::new())) {
            Ok(report) => Ok(Some(report)),
            // Lost a race against another starter; theirs is the live one.
            Err(DocmergeError::Ingest(IngestError::AlreadyReady)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn start_engine(&self) -> Result<Arc<MergeEngine>> {
        self.ensure_engine()?;
        self.engine()
            .ok_or_else(|| DocmergeError::Internal("merge engine missing after start".to_string()))
    }

    pub fn engine(&self) -> Option<Arc<MergeEngine>> {
        self.engine.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.channel.is_ready()
    }

    pub fn pending_len(&self) -> usize {
        self.channel.pending_len()
    }

    /// Query view over the latest state; empty while no engine is attached.
    pub fn query(&self) -> QueryEngine<GlobalIndex> {
        match self.engine.get() {
            Some(engine) => engine.query(),
            None => QueryEngine::new(GlobalIndex::empty()),
        }
    }
}
