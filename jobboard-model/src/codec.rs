//! JSON encoding of job records.
//!
//! Records are stored one per file as pretty-printed JSON so that they stay
//! readable and hand-editable.

use crate::job::Job;

/// Errors that can occur while encoding or decoding a record.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization failed.
    #[error("job encode error: {0}")]
    Encode(#[source] serde_json::Error),
    /// The bytes are not a valid job record.
    #[error("job decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encodes a [`Job`] as pretty JSON bytes.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode(job: &Job) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec_pretty(job).map_err(CodecError::Encode)
}

/// Decodes a [`Job`] from JSON bytes.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the bytes are not a valid record.
pub fn decode(bytes: &[u8]) -> Result<Job, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}
