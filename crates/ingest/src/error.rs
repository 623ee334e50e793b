use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("engine already attached to this channel")]
    AlreadyReady,
    #[error("sink rejected payload: {0}")]
    Sink(String),
    #[error("lock poisoned: {0}")]
    Poisoned(&'static str),
}
