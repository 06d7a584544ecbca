//! Asynchronous adapter over a callback-based stream-producer client.
//!
//! The wrapped client batches, aggregates, retries, and ships records on its
//! own threads; this crate exposes it through a uniform async contract:
//!
//! - Submit a record and await its individual delivery outcome
//! - Shut down gracefully exactly once: drain every outstanding record, then
//!   release the client's resources, no matter how many callers ask
//!
//! Delivery failures, client faults, and shutdown failures surface as
//! distinct error kinds; the adapter never retries, drops, or rewrites a
//! result.

pub mod client;
pub mod config;
pub mod error;
pub mod producer;
pub mod record;

pub use client::{ClientError, DeliveryAttempt, DeliveryCallback, DeliveryOutcome, ProducerClient};

pub use config::ClientSettings;

pub use error::{ProducerError, Result, ShutdownError};

pub use producer::{ProducerStats, RecordProducer, StreamProducer};

pub use record::Record;
