//! Settings handed to the producer client at construction.

use serde::{Deserialize, Serialize};

/// Settings for the wrapped client.
///
/// The adapter treats this as an opaque value: it is checked for basic
/// sanity and passed to [`ProducerClient::start`] untouched. Every knob
/// governs the client's own buffering and delivery machinery.
///
/// [`ProducerClient::start`]: crate::client::ProducerClient::start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Region the destination streams live in.
    #[serde(default = "default_region")]
    pub region: String,

    /// Maximum number of connections the client opens to the backend.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// How long the client may buffer a record before sending (milliseconds).
    #[serde(default = "default_record_max_buffered_time_ms")]
    pub record_max_buffered_time_ms: u64,

    /// Time-to-live for a buffered record before the client fails it
    /// (milliseconds).
    #[serde(default = "default_record_ttl_ms")]
    pub record_ttl_ms: u64,

    /// Per-request timeout inside the client (milliseconds).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Whether the client may aggregate small records into one payload.
    #[serde(default = "default_true")]
    pub aggregation_enabled: bool,
}

fn default_region() -> String {
    "us-east-1".to_string()
}
fn default_max_connections() -> usize {
    24
}
fn default_record_max_buffered_time_ms() -> u64 {
    100
}
fn default_record_ttl_ms() -> u64 {
    30_000
}
fn default_request_timeout_ms() -> u64 {
    6_000
}
fn default_true() -> bool {
    true
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            max_connections: default_max_connections(),
            record_max_buffered_time_ms: default_record_max_buffered_time_ms(),
            record_ttl_ms: default_record_ttl_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            aggregation_enabled: true,
        }
    }
}

impl ClientSettings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.region.is_empty() {
            return Err("region must not be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("max_connections must be greater than 0".to_string());
        }
        if self.record_ttl_ms == 0 {
            return Err("record_ttl_ms must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}
