use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::IngestError;
use crate::pending::PendingBuffer;
use crate::traits::RecordSink;
use crate::types::{Delivery, DrainReport};

pub type DynRecordSink<P> = Arc<dyn RecordSink<P> + Send + Sync>;

enum ChannelState<P> {
    Buffering(PendingBuffer<P>),
    Forwarding(DynRecordSink<P>),
}

/// Single entry point for payloads that may arrive before their consumer.
///
/// Starts out buffering. `on_engine_ready` replays the buffer into the sink and
/// flips to forwarding while holding the state lock, so a concurrent `register`
/// lands either in the buffer before the drain or in the sink after it.
/// Delivery order into the sink is always registration order.
pub struct RegistrationChannel<P> {
    state: Mutex<ChannelState<P>>,
}

impl<P> Default for RegistrationChannel<P> {
    fn default() -> Self {
        Self {
            state: Mutex::new(ChannelState::Buffering(PendingBuffer::new())),
        }
    }
}

impl<P> RegistrationChannel<P> {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, ChannelState<P>>, IngestError> {
        self.state
            .lock()
            .map_err(|_| IngestError::Poisoned("registration channel"))
    }

    pub fn register(&self, payload: P) -> Result<Delivery, IngestError> {
        let mut state = self.state()?;
        match &mut *state {
            ChannelState::Buffering(pending) => {
                let position = pending.hold(payload);
                tracing::trace!(position, "payload buffered until engine is ready");
                Ok(Delivery::Buffered { position })
            }
            ChannelState::Forwarding(sink) => {
                sink.ingest(payload)?;
                Ok(Delivery::Forwarded)
            }
        }
    }

    /// Attaches the sink, replays everything buffered so far in arrival order,
    /// then switches to forwarding. A failing payload is logged and skipped.
    pub fn on_engine_ready(&self, sink: DynRecordSink<P>) -> Result<DrainReport, IngestError> {
        let mut state = self.state()?;
        let mut pending = match &mut *state {
            ChannelState::Forwarding(_) => return Err(IngestError::AlreadyReady),
            ChannelState::Buffering(pending) => std::mem::take(pending),
        };

        let mut report = DrainReport::default();
        for payload in pending.drain() {
            match sink.ingest(payload) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    tracing::warn!("Failed to deliver buffered payload: {}", err);
                    report.failed += 1;
                }
            }
        }

        *state = ChannelState::Forwarding(sink);
        tracing::info!(
            delivered = report.delivered,
            failed = report.failed,
            "registration channel switched to forwarding"
        );
        Ok(report)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state.lock().as_deref(), Ok(ChannelState::Forwarding(_)))
    }

    pub fn pending_len(&self) -> usize {
        match self.state.lock().as_deref() {
            Ok(ChannelState::Buffering(pending)) => pending.len(),
            _ => 0,
        }
    }
}
