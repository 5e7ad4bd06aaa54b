//! Membership snapshot files.
//!
//! A snapshot is the host's materialized view of the two governance tables,
//! stored as JSON or CBOR. Loading it yields the in-memory tables the
//! resolver reads.

use super::members::{MemberStore, MEMBERS_INFO_TABLE, MEMBER_ENCRYPTION_KEYS_TABLE};
use super::memory::InMemoryKv;
use crate::governance::member::{MemberId, MemberRecord};
use crate::serialization::{from_cbor, from_json, to_cbor, to_json, SerializationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk encoding of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Cbor,
}

impl SnapshotFormat {
    /// CBOR for `.cbor` files, JSON otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("cbor") => Self::Cbor,
            _ => Self::Json,
        }
    }
}

/// Serializable snapshot of the membership tables.
///
/// Member info values are kept as raw JSON so that records the resolver
/// would read leniently survive a load/save cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub members_info: BTreeMap<String, Value>,

    /// Member id -> encryption public key (PEM).
    #[serde(default)]
    pub encryption_public_keys: BTreeMap<String, String>,
}

impl StoreSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a member record.
    pub fn insert_member(&mut self, id: impl Into<MemberId>, record: &MemberRecord) {
        let id: MemberId = id.into();
        self.members_info
            .insert(id.as_str().to_string(), record.to_value());
    }

    /// Register an encryption public key, marking the member as a recovery member.
    pub fn insert_encryption_key(&mut self, id: impl Into<MemberId>, pem: impl Into<String>) {
        let id: MemberId = id.into();
        self.encryption_public_keys
            .insert(id.as_str().to_string(), pem.into());
    }

    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, SerializationError> {
        match format {
            SnapshotFormat::Json => from_json(bytes),
            SnapshotFormat::Cbor => from_cbor(bytes),
        }
    }

    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, SerializationError> {
        match format {
            SnapshotFormat::Json => to_json(self),
            SnapshotFormat::Cbor => to_cbor(self),
        }
    }

    /// Materialize the two governance tables.
    pub fn into_tables(self) -> Result<MembershipTables, SerializationError> {
        let mut info = InMemoryKv::new(MEMBERS_INFO_TABLE);
        for (id, value) in self.members_info {
            info.put(id, to_json(&value)?);
        }

        let mut encryption_keys = InMemoryKv::new(MEMBER_ENCRYPTION_KEYS_TABLE);
        for (id, pem) in self.encryption_public_keys {
            encryption_keys.put(id, pem);
        }

        Ok(MembershipTables {
            info,
            encryption_keys,
        })
    }
}

/// The member info and encryption key tables, owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipTables {
    pub info: InMemoryKv,
    pub encryption_keys: InMemoryKv,
}

impl Default for MembershipTables {
    fn default() -> Self {
        Self {
            info: InMemoryKv::new(MEMBERS_INFO_TABLE),
            encryption_keys: InMemoryKv::new(MEMBER_ENCRYPTION_KEYS_TABLE),
        }
    }
}

impl MembershipTables {
    /// Borrow the tables as a membership accessor.
    pub fn store(&self) -> MemberStore<'_> {
        MemberStore::new(&self.info, &self.encryption_keys)
    }
}
