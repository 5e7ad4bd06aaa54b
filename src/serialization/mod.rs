//! Codecs for governance documents and membership snapshots.
//!
//! - Member info values and proposal documents are JSON (`serde_json`)
//! - Snapshots may also be written as CBOR via `ciborium`
//! - New snapshot fields use #[serde(default)] so older files still load

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// CBOR encoding failed.
    #[error("CBOR encoding failed: {0}")]
    Encode(String),

    /// CBOR decoding failed.
    #[error("CBOR decoding failed: {0}")]
    Decode(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize to CBOR bytes.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes)
        .map_err(|e| SerializationError::Encode(format!("{:?}", e)))?;
    Ok(bytes)
}

/// Deserialize from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    ciborium::from_reader(bytes).map_err(|e| SerializationError::Decode(format!("{:?}", e)))
}

/// Serialize to JSON bytes (the encoding of KV table values).
pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize from JSON bytes.
pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    Ok(serde_json::from_slice(bytes)?)
}
