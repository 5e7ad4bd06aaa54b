//! Member identity derivation from PEM certificates
//!
//! A member id is the lowercase hex SHA-256 digest of the member's
//! DER-encoded certificate. Governance actions such as `remove_member`
//! name their target by certificate, so the classifier converts the PEM
//! back into the id used as the key of the membership tables.
//!
//! # Properties
//!
//! - **Determinism**: the same certificate always yields the same id
//! - **Encoding-insensitive**: line wrapping and surrounding whitespace in
//!   the PEM armor do not change the id

use crate::governance::member::MemberId;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use thiserror::Error;

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "-----END ";

/// Errors while decoding a PEM certificate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("missing PEM BEGIN marker")]
    MissingBegin,

    #[error("missing PEM END marker")]
    MissingEnd,

    #[error("PEM body is empty")]
    EmptyBody,

    #[error("invalid base64 in PEM body: {0}")]
    InvalidBase64(String),
}

/// Extract the DER bytes of the first PEM block in `pem`.
pub fn pem_to_der(pem: &str) -> Result<Vec<u8>, IdentityError> {
    let mut lines = pem.lines().map(str::trim);

    lines
        .by_ref()
        .find(|line| line.starts_with(PEM_BEGIN))
        .ok_or(IdentityError::MissingBegin)?;

    let mut body = String::new();
    let mut terminated = false;
    for line in lines {
        if line.starts_with(PEM_END) {
            terminated = true;
            break;
        }
        body.push_str(line);
    }

    if !terminated {
        return Err(IdentityError::MissingEnd);
    }
    if body.is_empty() {
        return Err(IdentityError::EmptyBody);
    }

    STANDARD
        .decode(body.as_bytes())
        .map_err(|e| IdentityError::InvalidBase64(e.to_string()))
}

/// Compute the member id for a PEM-encoded certificate.
pub fn pem_to_id(pem: &str) -> Result<MemberId, IdentityError> {
    let der = pem_to_der(pem)?;
    Ok(der_to_id(&der))
}

/// Compute the member id for DER certificate bytes.
pub fn der_to_id(der: &[u8]) -> MemberId {
    let digest = Sha256::digest(der);
    MemberId::new(hex::encode(digest))
}
