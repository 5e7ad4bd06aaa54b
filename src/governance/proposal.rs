//! Proposal documents and their actions.
//!
//! Proposals arrive as JSON `{ "actions": [ { "name", "args" }, ... ] }`.
//! Parsing never fails: a document without an `actions` array is kept as
//! `Proposal::Malformed`, an action without a string name keeps `name: None`,
//! and non-object args read as an empty object.

use super::member::MemberData;
use serde_json::{Map, Value};
use tracing::warn;

/// Action that adds or updates a member.
pub const SET_MEMBER: &str = "set_member";

/// Action that removes a member.
pub const REMOVE_MEMBER: &str = "remove_member";

/// A submitted batch of governance actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Proposal {
    /// Actions in submission order.
    Actions(Vec<Action>),
    /// The document had no readable action list.
    Malformed { reason: String },
}

impl Proposal {
    pub fn new(actions: Vec<Action>) -> Self {
        Self::Actions(actions)
    }

    /// Parse a proposal document from JSON bytes.
    pub fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!(error = %e, "proposal document is not valid JSON");
                Self::Malformed {
                    reason: format!("invalid JSON: {}", e),
                }
            }
        }
    }

    /// Read a proposal from an already-decoded JSON document.
    pub fn from_value(value: &Value) -> Self {
        match value.get("actions") {
            Some(Value::Array(entries)) => {
                Self::Actions(entries.iter().map(Action::from_value).collect())
            }
            Some(_) => {
                warn!("proposal `actions` is not an array");
                Self::Malformed {
                    reason: "`actions` is not an array".to_string(),
                }
            }
            None => {
                warn!("proposal has no `actions` field");
                Self::Malformed {
                    reason: "missing `actions`".to_string(),
                }
            }
        }
    }

    /// The parsed actions. Empty for a malformed document.
    pub fn actions(&self) -> &[Action] {
        match self {
            Self::Actions(actions) => actions,
            Self::Malformed { .. } => &[],
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// A single governance action.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: Option<String>,
    pub args: Map<String, Value>,
}

impl Action {
    /// Build an action from a name and JSON args.
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: Some(name.into()),
            args: into_object(args),
        }
    }

    /// Read an action entry leniently.
    pub fn from_value(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned);
        if name.is_none() {
            warn!("proposal action has no string `name`");
        }

        let args = value.get("args").cloned().map(into_object).unwrap_or_default();

        Self { name, args }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Typed view over the args for the actions the classifier inspects.
    pub fn typed_args(&self) -> ActionArgs {
        match self.name() {
            Some(SET_MEMBER) => ActionArgs::SetMember(SetMemberArgs {
                cert: string_arg(&self.args, "cert"),
                encryption_pub_key: string_arg(&self.args, "encryption_pub_key"),
                member_data: self.args.get("member_data").and_then(MemberData::from_value),
            }),
            Some(REMOVE_MEMBER) => ActionArgs::RemoveMember(RemoveMemberArgs {
                cert: string_arg(&self.args, "cert"),
            }),
            _ => ActionArgs::Other,
        }
    }
}

/// Args of the membership actions that carry operator rules.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionArgs {
    SetMember(SetMemberArgs),
    RemoveMember(RemoveMemberArgs),
    /// Args are not inspected for any other action.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetMemberArgs {
    pub cert: Option<String>,
    pub encryption_pub_key: Option<String>,
    pub member_data: Option<MemberData>,
}

impl SetMemberArgs {
    /// Whether the new member data flags an operator.
    pub fn sets_operator(&self) -> bool {
        self.member_data
            .as_ref()
            .map_or(false, MemberData::is_operator)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveMemberArgs {
    /// PEM certificate of the member to remove.
    pub cert: Option<String>,
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn string_arg(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_owned)
}
