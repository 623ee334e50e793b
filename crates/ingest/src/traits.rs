use crate::error::IngestError;

/// Destination of registered payloads once the consumer is ready.
pub trait RecordSink<P>: Send + Sync {
    fn ingest(&self, payload: P) -> Result<(), IngestError>;
}

impl<P, S> RecordSink<P> for std::sync::Arc<S>
where
    S: RecordSink<P> + ?Sized,
{
    fn ingest(&self, payload: P) -> Result<(), IngestError> {
        (**self).ingest(payload)
    }
}
