//! Producer contract and the adapter over a callback-based client.
//!
//! `submit` bridges the client's completion callback into a oneshot channel
//! awaited by the caller's task. `shutdown` runs the drain-then-release
//! sequence exactly once and broadcasts its result to every caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};
use tracing::{debug, error, info, warn};

use crate::client::{ClientError, DeliveryOutcome, ProducerClient};
use crate::config::ClientSettings;
use crate::error::{ProducerError, Result, ShutdownError};
use crate::record::Record;

/// The producer contract: submit records and await their outcomes, and shut
/// down gracefully exactly once.
#[async_trait]
pub trait RecordProducer: Send + Sync {
    /// Submit one record and suspend until the client reports its terminal
    /// state. Completions are independent per record; concurrent
    /// submissions resolve in whatever order the client finishes them.
    async fn submit(&self, record: Record) -> Result<DeliveryOutcome>;

    /// Drain every previously submitted record, then release the client's
    /// resources. Idempotent: all callers, concurrent or late, observe the
    /// result of the same single execution.
    async fn shutdown(&self) -> Result<()>;
}

/// Snapshot of producer activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerStats {
    /// Records handed to the client.
    pub records_submitted: u64,
    /// Records the client delivered.
    pub records_delivered: u64,
    /// Records that reached a failure state (failed outcome or client
    /// fault).
    pub records_failed: u64,
}

struct StatsTracker {
    submitted: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl StatsTracker {
    fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ProducerStats {
        ProducerStats {
            records_submitted: self.submitted.load(Ordering::Relaxed),
            records_delivered: self.delivered.load(Ordering::Relaxed),
            records_failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

type ShutdownResult = std::result::Result<(), ShutdownError>;

/// Adapter exposing a [`ProducerClient`] through the [`RecordProducer`]
/// contract.
pub struct StreamProducer<C> {
    client: Arc<C>,
    stats: StatsTracker,
    shutdown: OnceLock<watch::Receiver<Option<ShutdownResult>>>,
}

impl<C: ProducerClient> StreamProducer<C> {
    /// Validate `settings` and start the client.
    ///
    /// This is where the client's threads and buffers come to life; nothing
    /// is allocated before this call.
    pub fn start(settings: ClientSettings) -> Result<Self> {
        settings.validate().map_err(ProducerError::Config)?;
        let client = C::start(&settings)?;
        info!("started producer client in region {}", settings.region);
        Ok(Self::from_client(client))
    }

    /// Wrap an already-running client.
    pub fn from_client(client: C) -> Self {
        Self {
            client: Arc::new(client),
            stats: StatsTracker::new(),
            shutdown: OnceLock::new(),
        }
    }

    /// Snapshot of activity counters.
    pub fn stats(&self) -> ProducerStats {
        self.stats.snapshot()
    }

    /// Whether a shutdown has been triggered. It may still be draining.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.get().is_some()
    }

    /// The watch receiver for the single shutdown execution, spawning it on
    /// first access. The task is detached so waiter cancellation can
    /// neither abort nor re-trigger the sequence.
    fn shutdown_watch(&self) -> watch::Receiver<Option<ShutdownResult>> {
        self.shutdown
            .get_or_init(|| {
                let client = Arc::clone(&self.client);
                let (tx, rx) = watch::channel(None);
                tokio::spawn(async move {
                    let result = run_shutdown(client).await;
                    // The waiters may all be gone; the sequence still ran.
                    let _ = tx.send(Some(result));
                });
                rx
            })
            .clone()
    }
}

/// Drain, then release. Both phases are blocking calls into the client, so
/// they run on the blocking pool; a drain failure skips the release.
async fn run_shutdown<C: ProducerClient>(client: Arc<C>) -> ShutdownResult {
    info!("shutting down producer: draining outstanding records");
    let phases = tokio::task::spawn_blocking(move || {
        client
            .flush()
            .map_err(|e| ShutdownError::Drain(e.to_string()))?;
        client
            .release()
            .map_err(|e| ShutdownError::Release(e.to_string()))
    })
    .await;

    let result = match phases {
        Ok(result) => result,
        Err(join_error) => Err(ShutdownError::Aborted(join_error.to_string())),
    };

    match &result {
        Ok(()) => info!("producer shut down"),
        Err(e) => error!("producer shutdown failed: {}", e),
    }
    result
}

#[async_trait]
impl<C: ProducerClient> RecordProducer for StreamProducer<C> {
    async fn submit(&self, record: Record) -> Result<DeliveryOutcome> {
        self.stats.record_submitted();
        let stream_name = record.stream_name.clone();

        let (tx, rx) = oneshot::channel();
        self.client.put_record(
            record,
            Box::new(move |completion| {
                // The submitter may have been cancelled; a completion for a
                // dropped receiver is discarded.
                let _ = tx.send(completion);
            }),
        );

        let completion = rx.await.map_err(|_| {
            ClientError::Fault(
                "record completion handler was dropped without being invoked".to_string(),
            )
        })?;

        match completion {
            Ok(outcome) if outcome.is_successful() => {
                self.stats.record_delivered();
                debug!("delivered record to stream {}", stream_name);
                Ok(outcome)
            }
            Ok(outcome) => {
                self.stats.record_failed();
                warn!(
                    "record for stream {} failed after {} attempts",
                    stream_name,
                    outcome.attempts().len()
                );
                Err(ProducerError::delivery_failed(&outcome))
            }
            Err(client_error) => {
                self.stats.record_failed();
                error!(
                    "producer client fault on stream {}: {}",
                    stream_name, client_error
                );
                Err(ProducerError::Client(client_error))
            }
        }
    }

    async fn shutdown(&self) -> Result<()> {
        let mut rx = self.shutdown_watch();
        let outcome = match rx.wait_for(|state| state.is_some()).await {
            Ok(state) => state.clone(),
            // The sender is held by the shutdown task; losing it means the
            // task never reported.
            Err(_) => None,
        };
        outcome
            .unwrap_or_else(|| {
                Err(ShutdownError::Aborted(
                    "shutdown task ended without reporting a result".to_string(),
                ))
            })
            .map_err(ProducerError::from)
    }
}
