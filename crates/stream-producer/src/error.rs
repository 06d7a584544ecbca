//! Error types for the producer adapter.
//!
//! Every failure is classified and forwarded to the caller; the adapter
//! performs no local recovery, substitution, or retry.

use thiserror::Error;

use crate::client::{ClientError, DeliveryOutcome};

/// Result type alias for producer operations.
pub type Result<T> = std::result::Result<T, ProducerError>;

/// Failures surfaced by producer operations.
///
/// Callers that need to tell a delivery failure apart from an
/// infrastructure failure can match on the variant:
///
/// ```rust
/// use stream_producer::{ClientError, ProducerError};
///
/// fn is_infrastructure(err: &ProducerError) -> bool {
///     matches!(err, ProducerError::Client(_) | ProducerError::Shutdown(_))
/// }
///
/// assert!(is_infrastructure(&ProducerError::Client(ClientError::ShutDown)));
/// ```
#[derive(Error, Debug)]
pub enum ProducerError {
    /// Settings rejected before the client was started.
    #[error("invalid producer settings: {0}")]
    Config(String),

    /// The client ran the record through its full retry policy and could
    /// not deliver it.
    #[error(
        "Sending a record failed after {} attempts, last error message: {}.",
        .attempts,
        last_error_display(.last_error)
    )]
    DeliveryFailed {
        /// Number of delivery attempts the client recorded.
        attempts: usize,
        /// Error message of the last attempt, if any attempt was recorded.
        last_error: Option<String>,
    },

    /// The client faulted before producing a delivery outcome. Surfaced
    /// verbatim.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The drain or release phase of shutdown failed.
    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}

impl ProducerError {
    /// Build the delivery failure for an unsuccessful outcome.
    pub fn delivery_failed(outcome: &DeliveryOutcome) -> Self {
        Self::DeliveryFailed {
            attempts: outcome.attempts().len(),
            last_error: outcome
                .attempts()
                .last()
                .map(|attempt| attempt.error_message().to_string()),
        }
    }
}

fn last_error_display(last_error: &Option<String>) -> String {
    match last_error {
        Some(message) => format!("Some({message})"),
        None => "none".to_string(),
    }
}

/// Failure of the one-time shutdown sequence.
///
/// Cloneable: the single shutdown execution hands the same result to every
/// waiter, past and future.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShutdownError {
    /// Flushing outstanding records failed; resources were not released.
    #[error("failed to drain outstanding records: {0}")]
    Drain(String),

    /// Draining succeeded but releasing the client's resources failed.
    #[error("failed to release producer resources: {0}")]
    Release(String),

    /// The shutdown task ended without reporting a result.
    #[error("shutdown aborted: {0}")]
    Aborted(String),
}
