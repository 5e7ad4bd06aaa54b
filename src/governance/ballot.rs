//! Ballot results submitted by members.
//!
//! The host passes one entry per member who voted. Members who did not vote
//! are absent, never present as `vote: false`.

use super::member::MemberId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One member's ballot outcome on a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub member_id: MemberId,
    pub vote: bool,
}

impl Vote {
    pub fn new(member_id: impl Into<MemberId>, vote: bool) -> Self {
        Self {
            member_id: member_id.into(),
            vote,
        }
    }

    pub fn accept(member_id: impl Into<MemberId>) -> Self {
        Self::new(member_id, true)
    }

    pub fn reject(member_id: impl Into<MemberId>) -> Self {
        Self::new(member_id, false)
    }
}

/// Parse a JSON vote list leniently.
///
/// A document that is not an array yields no votes. Entries without a string
/// `member_id` are dropped, and a `vote` that is not a boolean reads as a
/// rejection, so malformed entries can never add support.
pub fn parse_votes(bytes: &[u8]) -> Vec<Vote> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => votes_from_value(&value),
        Err(e) => {
            warn!(error = %e, "vote list is not valid JSON, counting no votes");
            Vec::new()
        }
    }
}

/// Read votes from an already-decoded JSON document.
pub fn votes_from_value(value: &Value) -> Vec<Vote> {
    let Some(entries) = value.as_array() else {
        warn!("vote list is not an array, counting no votes");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let member_id = entry.get("member_id").and_then(Value::as_str)?;
            let vote = entry.get("vote").and_then(Value::as_bool).unwrap_or(false);
            Some(Vote::new(member_id, vote))
        })
        .collect()
}
