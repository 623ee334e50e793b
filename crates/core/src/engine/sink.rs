use docmerge_api::PartialIndexRecord;
use docmerge_ingest::{IngestError, RecordSink};

use super::MergeEngine;

impl RecordSink<PartialIndexRecord> for MergeEngine {
    fn ingest(&self, payload: PartialIndexRecord) -> Result<(), IngestError> {
        MergeEngine::ingest(self, payload)
            .map(|_| ())
            .map_err(|e| IngestError::Sink(e.to_string()))
    }
}
