//! Common test utilities: a scriptable stand-in for the wrapped client.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use stream_producer::{
    ClientError, ClientSettings, DeliveryCallback, DeliveryOutcome, ProducerClient, Record,
};

type Completion = Result<DeliveryOutcome, ClientError>;

struct StubState {
    defer_completions: bool,
    flush_delay: Duration,
    scripted: Mutex<VecDeque<Completion>>,
    pending: Mutex<Vec<(String, DeliveryCallback)>>,
    records: Mutex<Vec<Record>>,
    calls: Mutex<Vec<&'static str>>,
    flush_calls: AtomicUsize,
    release_calls: AtomicUsize,
    flush_error: Mutex<Option<ClientError>>,
    release_error: Mutex<Option<ClientError>>,
}

/// Scriptable producer client.
///
/// In immediate mode every `put_record` call consumes the next scripted
/// completion (default: a successful delivery) and fires the handler on the
/// spot. In deferred mode the handlers are parked until the test fires them
/// by partition key, which makes completion order fully controllable.
pub struct StubClient {
    state: Arc<StubState>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::with_options(false, Duration::ZERO)
    }

    /// Park completion handlers until the test fires them.
    pub fn deferred() -> Self {
        Self::with_options(true, Duration::ZERO)
    }

    /// Make `flush` sleep for `delay` before returning.
    pub fn with_flush_delay(delay: Duration) -> Self {
        Self::with_options(false, delay)
    }

    fn with_options(defer_completions: bool, flush_delay: Duration) -> Self {
        Self {
            state: Arc::new(StubState {
                defer_completions,
                flush_delay,
                scripted: Mutex::new(VecDeque::new()),
                pending: Mutex::new(Vec::new()),
                records: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
                flush_calls: AtomicUsize::new(0),
                release_calls: AtomicUsize::new(0),
                flush_error: Mutex::new(None),
                release_error: Mutex::new(None),
            }),
        }
    }

    /// A handle that stays valid after the client moves into the producer.
    pub fn handle(&self) -> StubClient {
        StubClient {
            state: Arc::clone(&self.state),
        }
    }

    /// Queue the completion handed to the next immediate-mode submission.
    pub fn script_completion(&self, completion: Completion) {
        self.state.scripted.lock().unwrap().push_back(completion);
    }

    pub fn fail_flush_with(&self, error: ClientError) {
        *self.state.flush_error.lock().unwrap() = Some(error);
    }

    pub fn fail_release_with(&self, error: ClientError) {
        *self.state.release_error.lock().unwrap() = Some(error);
    }

    /// Fire the parked completion for the record with `partition_key`.
    pub fn complete_pending(&self, partition_key: &str, completion: Completion) {
        let callback = {
            let mut pending = self.state.pending.lock().unwrap();
            let index = pending
                .iter()
                .position(|(key, _)| key == partition_key)
                .expect("no pending record with that partition key");
            pending.remove(index).1
        };
        callback(completion);
    }

    /// Drop the parked completion handler without invoking it.
    pub fn drop_pending(&self, partition_key: &str) {
        let mut pending = self.state.pending.lock().unwrap();
        let index = pending
            .iter()
            .position(|(key, _)| key == partition_key)
            .expect("no pending record with that partition key");
        drop(pending.remove(index));
    }

    pub fn pending_count(&self) -> usize {
        self.state.pending.lock().unwrap().len()
    }

    pub fn submitted_records(&self) -> Vec<Record> {
        self.state.records.lock().unwrap().clone()
    }

    pub fn flush_calls(&self) -> usize {
        self.state.flush_calls.load(Ordering::SeqCst)
    }

    pub fn release_calls(&self) -> usize {
        self.state.release_calls.load(Ordering::SeqCst)
    }

    /// Order in which flush and release were invoked.
    pub fn call_order(&self) -> Vec<&'static str> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl ProducerClient for StubClient {
    fn start(_settings: &ClientSettings) -> Result<Self, ClientError> {
        Ok(Self::new())
    }

    fn put_record(&self, record: Record, on_complete: DeliveryCallback) {
        let partition_key = record.partition_key.clone();
        self.state.records.lock().unwrap().push(record);

        if self.state.defer_completions {
            self.state
                .pending
                .lock()
                .unwrap()
                .push((partition_key, on_complete));
            return;
        }

        let completion = self
            .state
            .scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DeliveryOutcome::delivered("seq-0", "shard-0")));
        on_complete(completion);
    }

    fn flush(&self) -> Result<(), ClientError> {
        self.state.calls.lock().unwrap().push("flush");
        self.state.flush_calls.fetch_add(1, Ordering::SeqCst);
        if !self.state.flush_delay.is_zero() {
            // Runs on the blocking pool, so a real sleep is fine.
            std::thread::sleep(self.state.flush_delay);
        }
        match self.state.flush_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn release(&self) -> Result<(), ClientError> {
        self.state.calls.lock().unwrap().push("release");
        self.state.release_calls.fetch_add(1, Ordering::SeqCst);
        match self.state.release_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
