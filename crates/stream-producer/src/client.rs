//! Contract for the wrapped stream-producer client.
//!
//! The client is an opaque collaborator: it owns batching, aggregation,
//! retries, and network delivery on its internal threads. This module pins
//! down the surface the adapter relies on: a side-effecting constructor, a
//! callback-based record submission, a blocking drain, and a resource
//! release.

use thiserror::Error;

use crate::config::ClientSettings;
use crate::record::Record;

/// Completion handler passed to [`ProducerClient::put_record`].
///
/// The client must invoke it exactly once per record: with the delivery
/// outcome once the record reaches a terminal state, or with a
/// [`ClientError`] if the client faults before classifying the record.
pub type DeliveryCallback = Box<dyn FnOnce(Result<DeliveryOutcome, ClientError>) + Send + 'static>;

/// Error raised by the client outside of a delivery outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The client has been shut down and accepts no more work.
    #[error("producer client is shut down")]
    ShutDown,

    /// An internal client fault.
    #[error("producer client fault: {0}")]
    Fault(String),
}

/// One delivery attempt recorded by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    error_code: Option<String>,
    error_message: String,
}

impl DeliveryAttempt {
    /// Create an attempt record from its error message.
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_code: None,
            error_message: error_message.into(),
        }
    }

    /// Attach the client-side error code.
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Error code reported by the client, if any.
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// Error message reported by the client.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}

/// Terminal result for one submitted record.
///
/// Produced by the client once the record either reached the stream or
/// exhausted the client's internal retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    successful: bool,
    sequence_number: Option<String>,
    shard_id: Option<String>,
    attempts: Vec<DeliveryAttempt>,
}

impl DeliveryOutcome {
    /// Successful delivery, with the placement the stream assigned.
    pub fn delivered(sequence_number: impl Into<String>, shard_id: impl Into<String>) -> Self {
        Self {
            successful: true,
            sequence_number: Some(sequence_number.into()),
            shard_id: Some(shard_id.into()),
            attempts: Vec::new(),
        }
    }

    /// Failed delivery with the ordered attempt history.
    pub fn failed(attempts: Vec<DeliveryAttempt>) -> Self {
        Self {
            successful: false,
            sequence_number: None,
            shard_id: None,
            attempts,
        }
    }

    /// Attach the attempt history (a delivery can succeed after retries).
    pub fn with_attempts(mut self, attempts: Vec<DeliveryAttempt>) -> Self {
        self.attempts = attempts;
        self
    }

    /// Whether the record was ultimately delivered.
    pub fn is_successful(&self) -> bool {
        self.successful
    }

    /// Sequence number assigned by the stream (present on success).
    pub fn sequence_number(&self) -> Option<&str> {
        self.sequence_number.as_deref()
    }

    /// Shard the record landed on (present on success).
    pub fn shard_id(&self) -> Option<&str> {
        self.shard_id.as_deref()
    }

    /// Ordered attempt history.
    pub fn attempts(&self) -> &[DeliveryAttempt] {
        &self.attempts
    }
}

/// The wrapped producer client.
///
/// Implementations must be safe for concurrent [`put_record`] calls; the
/// adapter relies on that without re-verifying it.
///
/// [`put_record`]: ProducerClient::put_record
pub trait ProducerClient: Send + Sync + 'static {
    /// Allocate and start the client. Side-effecting: spins up the client's
    /// internal threads and buffers.
    fn start(settings: &ClientSettings) -> Result<Self, ClientError>
    where
        Self: Sized;

    /// Hand one record to the client. `on_complete` must be invoked exactly
    /// once, from any thread, once the record reaches a terminal state.
    fn put_record(&self, record: Record, on_complete: DeliveryCallback);

    /// Block until every record accepted so far has been acknowledged
    /// (successfully or not) by the remote endpoint.
    fn flush(&self) -> Result<(), ClientError>;

    /// Free the threads, connections, and buffers held by the client.
    fn release(&self) -> Result<(), ClientError>;
}
