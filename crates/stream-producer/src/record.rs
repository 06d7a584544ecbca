//! Submission value handed to the producer.

/// A single record bound for a stream.
///
/// Constructed per call and handed to the client verbatim; the adapter
/// performs no validation or rewriting. An absent hash-key override is
/// `None`, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Destination stream name.
    pub stream_name: String,
    /// Key the client uses to route the record to a shard.
    pub partition_key: String,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
    /// Optional override for the hash the client derives from the
    /// partition key.
    pub explicit_hash_key: Option<String>,
}

impl Record {
    /// Create a record for `stream_name` with the given partition key and
    /// payload.
    pub fn new(
        stream_name: impl Into<String>,
        partition_key: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            stream_name: stream_name.into(),
            partition_key: partition_key.into(),
            payload: payload.into(),
            explicit_hash_key: None,
        }
    }

    /// Set an explicit hash key, bypassing the client's partition-key hash.
    pub fn with_explicit_hash_key(mut self, hash_key: impl Into<String>) -> Self {
        self.explicit_hash_key = Some(hash_key.into());
        self
    }
}
