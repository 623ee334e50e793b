use std::sync::{Arc, Mutex};

use docmerge_ingest::{Delivery, DynRecordSink, IngestError, RecordSink, RegistrationChannel};

#[derive(Default)]
struct CollectingSink {
    seen: Mutex<Vec<u32>>,
}

impl RecordSink<u32> for CollectingSink {
    fn ingest(&self, payload: u32) -> Result<(), IngestError> {
        if payload == 13 {
            return Err(IngestError::Sink("unlucky".to_string()));
        }
        self.seen.lock().expect("lock poisoned").push(payload);
        Ok(())
    }
}

impl CollectingSink {
    fn seen(&self) -> Vec<u32> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

#[test]
fn test_buffers_until_ready_then_forwards() {
    let channel = RegistrationChannel::new();
    assert!(!channel.is_ready());

    assert_eq!(channel.register(3).unwrap(), Delivery::Buffered { position: 0 });
    assert_eq!(channel.register(1).unwrap(), Delivery::Buffered { position: 1 });
    assert_eq!(channel.pending_len(), 2);

    let sink = Arc::new(CollectingSink::default());
    let report = channel
        .on_engine_ready(sink.clone() as DynRecordSink<u32>)
        .unwrap();
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, 0);
    assert!(channel.is_ready());
    assert_eq!(channel.pending_len(), 0);

    assert_eq!(channel.register(2).unwrap(), Delivery::Forwarded);
    assert_eq!(sink.seen(), vec![3, 1, 2]);
}

#[test]
fn test_second_ready_is_rejected() {
    let channel = RegistrationChannel::new();
    let sink = Arc::new(CollectingSink::default());
    channel
        .on_engine_ready(sink.clone() as DynRecordSink<u32>)
        .unwrap();

    let again = channel.on_engine_ready(sink as DynRecordSink<u32>);
    assert!(matches!(again, Err(IngestError::AlreadyReady)));
}

#[test]
fn test_failed_payload_does_not_stop_drain() {
    let channel = RegistrationChannel::new();
    for payload in [5, 13, 7] {
        channel.register(payload).unwrap();
    }

    let sink = Arc::new(CollectingSink::default());
    let report = channel
        .on_engine_ready(sink.clone() as DynRecordSink<u32>)
        .unwrap();
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(sink.seen(), vec![5, 7]);

    // After readiness the failure surfaces to the caller instead.
    assert!(matches!(channel.register(13), Err(IngestError::Sink(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_loses_nothing() {
    let channel = Arc::new(RegistrationChannel::new());
    let sink = Arc::new(CollectingSink::default());

    let mut tasks = Vec::new();
    for worker in 0..4u32 {
        let channel = Arc::clone(&channel);
        tasks.push(tokio::spawn(async move {
            for i in 0..50u32 {
                let payload = 1000 + worker * 100 + i;
                channel.register(payload).expect("register failed");
                tokio::task::yield_now().await;
            }
        }));
    }

    tokio::task::yield_now().await;
    channel
        .on_engine_ready(sink.clone() as DynRecordSink<u32>)
        .unwrap();

    for task in tasks {
        task.await.unwrap();
    }

    let mut seen = sink.seen();
    assert_eq!(seen.len(), 200);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 200);

    // Each worker's payloads keep their relative order.
    let per_worker: Vec<u32> = sink
        .seen()
        .into_iter()
        .filter(|p| (1000..1100).contains(p))
        .collect();
    let mut sorted = per_worker.clone();
    sorted.sort_unstable();
    assert_eq!(per_worker, sorted);
}
