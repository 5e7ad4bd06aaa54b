//! Member identities and stored member records.
//!
//! Records are owned by the host's membership table and decoded leniently:
//! a field with an unexpected shape reads as absent instead of failing the
//! whole record. Only a value that is not a JSON object at all is corrupt.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque member identity, unique among members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key bytes used in the membership tables.
    pub fn as_key(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Member lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberStatus {
    /// Certificate registered, not yet acknowledged.
    Accepted,
    /// Counts toward the member quorum.
    Active,
    /// No longer participating.
    Retired,
    /// Any other lifecycle string the host stores.
    Other(String),
}

impl From<String> for MemberStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Accepted" => Self::Accepted,
            "Active" => Self::Active,
            "Retired" => Self::Retired,
            _ => Self::Other(status),
        }
    }
}

impl From<MemberStatus> for String {
    fn from(status: MemberStatus) -> Self {
        match status {
            MemberStatus::Accepted => "Accepted".to_string(),
            MemberStatus::Active => "Active".to_string(),
            MemberStatus::Retired => "Retired".to_string(),
            MemberStatus::Other(other) => other,
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("Accepted"),
            Self::Active => f.write_str("Active"),
            Self::Retired => f.write_str("Retired"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// Free-form member data with the operator flag pulled out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberData {
    /// `Some(true)` only when the stored value is the boolean `true`.
    /// Non-boolean values read as absent.
    #[serde(
        default,
        deserialize_with = "bool_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_operator: Option<bool>,

    /// Everything else the host stores alongside the flag.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl MemberData {
    /// Member data flagged as operator.
    pub fn operator() -> Self {
        Self {
            is_operator: Some(true),
            other: Map::new(),
        }
    }

    /// Read member data from an arbitrary JSON value. Non-objects read as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    pub fn is_operator(&self) -> bool {
        self.is_operator == Some(true)
    }

    /// The stored JSON object: extra fields plus `is_operator` when set.
    pub fn to_value(&self) -> Value {
        let mut object = self.other.clone();
        if let Some(flag) = self.is_operator {
            object.insert("is_operator".to_string(), Value::Bool(flag));
        }
        Value::Object(object)
    }
}

/// A decoded entry of the member info table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    #[serde(
        default,
        deserialize_with = "status_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<MemberStatus>,

    #[serde(
        default,
        deserialize_with = "member_data_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub member_data: Option<MemberData>,
}

impl MemberRecord {
    pub fn new(status: MemberStatus) -> Self {
        Self {
            status: Some(status),
            member_data: None,
        }
    }

    /// Record an `Active` operator.
    pub fn active_operator() -> Self {
        Self {
            status: Some(MemberStatus::Active),
            member_data: Some(MemberData::operator()),
        }
    }

    pub fn with_member_data(mut self, member_data: MemberData) -> Self {
        self.member_data = Some(member_data);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(MemberStatus::Active)
    }

    pub fn is_operator(&self) -> bool {
        self.member_data
            .as_ref()
            .map_or(false, MemberData::is_operator)
    }

    /// The record as a member info table value. Always a JSON object.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        if let Some(status) = &self.status {
            object.insert("status".to_string(), Value::String(status.to_string()));
        }
        if let Some(member_data) = &self.member_data {
            object.insert("member_data".to_string(), member_data.to_value());
        }
        Value::Object(object)
    }
}

fn bool_or_absent<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

fn status_or_absent<'de, D>(deserializer: D) -> Result<Option<MemberStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(|s| MemberStatus::from(s.to_string())))
}

fn member_data_or_absent<'de, D>(deserializer: D) -> Result<Option<MemberData>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(MemberData::from_value(&value))
}
