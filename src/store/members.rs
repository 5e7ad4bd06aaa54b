//! Membership store accessor.
//!
//! Wraps the two governance tables the host exposes:
//! - member info records (JSON), keyed by member id
//! - member encryption public keys, whose presence marks a recovery member

use super::traits::{KvMap, StoreError, StoreResult};
use crate::governance::member::{MemberId, MemberRecord};
use crate::serialization::from_json;
use serde_json::Value;

/// Name of the member info table.
pub const MEMBERS_INFO_TABLE: &str = "public:ccf.gov.members.info";

/// Name of the member encryption public key table.
pub const MEMBER_ENCRYPTION_KEYS_TABLE: &str = "public:ccf.gov.members.encryption_public_keys";

/// Read-only accessor over a membership snapshot.
pub struct MemberStore<'a> {
    info: &'a dyn KvMap,
    encryption_keys: &'a dyn KvMap,
}

impl<'a> MemberStore<'a> {
    pub fn new(info: &'a dyn KvMap, encryption_keys: &'a dyn KvMap) -> Self {
        Self {
            info,
            encryption_keys,
        }
    }

    /// Fetch and decode a member's record. `None` for unknown members.
    pub fn member_info(&self, member_id: &MemberId) -> StoreResult<Option<MemberRecord>> {
        match self.info.get(member_id.as_key())? {
            Some(bytes) => decode_record(self.info.name(), member_id.as_key(), &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Whether the member has registered an encryption public key.
    pub fn is_recovery_member(&self, member_id: &MemberId) -> StoreResult<bool> {
        self.encryption_keys.has(member_id.as_key())
    }

    /// Visit every member record. Order is unspecified.
    ///
    /// The first record that fails to decode aborts the walk with
    /// `StoreError::Corrupted`.
    pub fn for_each_member(
        &self,
        visitor: &mut dyn FnMut(&MemberId, &MemberRecord),
    ) -> StoreResult<()> {
        let table = self.info.name();
        let mut failure: Option<StoreError> = None;

        self.info.for_each(&mut |key, value| {
            if failure.is_some() {
                return;
            }
            match decode_record(table, key, value) {
                Ok(record) => {
                    let member_id = MemberId::new(String::from_utf8_lossy(key).into_owned());
                    visitor(&member_id, &record);
                }
                Err(e) => failure = Some(e),
            }
        })?;

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn decode_record(table: &str, key: &[u8], bytes: &[u8]) -> StoreResult<MemberRecord> {
    let corrupted = |reason: String| StoreError::Corrupted {
        table: table.to_string(),
        key: String::from_utf8_lossy(key).into_owned(),
        reason,
    };

    // Sequences would otherwise fill the struct fields positionally.
    let value: Value = from_json(bytes).map_err(|e| corrupted(e.to_string()))?;
    if !value.is_object() {
        return Err(corrupted(format!(
            "member record is not a JSON object: {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| corrupted(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
