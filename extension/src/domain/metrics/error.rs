//! Errors raised while encoding flat records

use thiserror::Error;

/// A single resource could not be serialized to JSON
#[derive(Error, Debug)]
#[error("failed to encode resource {index}: {source}")]
pub struct EncodingError {
    /// Position of the resource in the batch
    pub index: usize,
    #[source]
    pub source: serde_json::Error,
}

/// One or more resources of a batch were skipped
///
/// The records that did encode are kept in `partial`, joined the same way a
/// fully successful batch would be.
#[derive(Error, Debug)]
#[error("{failed} of {total} resources could not be encoded: {last}")]
pub struct MarshalError {
    pub partial: Vec<u8>,
    pub failed: usize,
    pub total: usize,
    #[source]
    pub last: EncodingError,
}

impl MarshalError {
    /// Bytes produced for the resources that encoded successfully
    pub fn partial(&self) -> &[u8] {
        &self.partial
    }

    /// Split into the partial output and the last encoding error
    pub fn into_parts(self) -> (Vec<u8>, EncodingError) {
        (self.partial, self.last)
    }
}
