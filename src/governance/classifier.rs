//! Operator privilege and operator-safe action classification.
//!
//! An operator may pass a proposal without member votes only when every
//! action in it is operator-safe:
//! - the action name is on the fixed allowlist, or
//! - `set_member` flags the new member as an operator, or
//! - `remove_member` targets a member who is an operator.
//!
//! Lookup misses and malformed arguments classify as "not operator" /
//! "not operator-safe". Only store failures are returned as errors.

use super::member::MemberId;
use super::proposal::{Action, ActionArgs, Proposal};
use crate::identity::pem_to_id;
use crate::store::{MemberStore, StoreResult};
use serde::Serialize;
use tracing::debug;

/// Actions an operator may pass alone.
pub const OPERATOR_SAFE_ACTIONS: [&str; 18] = [
    "add_node_code",
    "remove_node_code",
    "set_node_data",
    "remove_node",
    "transition_node_to_trusted",
    "set_node_certificate_validity",
    "set_all_nodes_certificate_validity",
    "set_js_app",
    "set_ca_cert_bundle",
    "remove_ca_cert_bundle",
    "set_jwt_issuer",
    "remove_jwt_issuer",
    "set_user",
    "remove_user",
    "set_service_certificate_validity",
    "set_service_configuration",
    "transition_service_to_open",
    "trigger_snapshot",
];

/// Whether `name` is on the operator allowlist.
pub fn is_allowlisted(name: &str) -> bool {
    OPERATOR_SAFE_ACTIONS.contains(&name)
}

/// Why an action was admitted to the operator fast path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperatorRule {
    /// Name is on the allowlist.
    Allowlisted,
    /// `set_member` adding or promoting an operator.
    OperatorPromotion,
    /// `remove_member` targeting an operator.
    OperatorRemoval,
}

/// Classification of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionClass {
    pub name: Option<String>,
    /// `None` when the action is not operator-safe.
    pub rule: Option<OperatorRule>,
}

impl ActionClass {
    pub fn operator_can_pass(&self) -> bool {
        self.rule.is_some()
    }
}

/// Classifies members and actions against a membership snapshot.
pub struct ActionClassifier<'s, 'a> {
    members: &'s MemberStore<'a>,
}

impl<'s, 'a> ActionClassifier<'s, 'a> {
    pub fn new(members: &'s MemberStore<'a>) -> Self {
        Self { members }
    }

    /// True iff the member exists and is flagged `is_operator: true`.
    pub fn is_operator(&self, member_id: &MemberId) -> StoreResult<bool> {
        Ok(self
            .members
            .member_info(member_id)?
            .map_or(false, |record| record.is_operator()))
    }

    /// Which operator rule, if any, admits `action`.
    pub fn operator_rule(&self, action: &Action) -> StoreResult<Option<OperatorRule>> {
        let Some(name) = action.name() else {
            return Ok(None);
        };

        if is_allowlisted(name) {
            return Ok(Some(OperatorRule::Allowlisted));
        }

        let rule = match action.typed_args() {
            ActionArgs::SetMember(args) if args.sets_operator() => {
                Some(OperatorRule::OperatorPromotion)
            }
            ActionArgs::RemoveMember(args) => {
                match args.cert.as_deref().map(pem_to_id) {
                    Some(Ok(target)) => self
                        .is_operator(&target)?
                        .then_some(OperatorRule::OperatorRemoval),
                    Some(Err(e)) => {
                        debug!(error = %e, "remove_member cert is not a readable PEM");
                        None
                    }
                    None => None,
                }
            }
            _ => None,
        };

        Ok(rule)
    }

    /// Whether an operator may pass `action` without member votes.
    pub fn can_operator_pass(&self, action: &Action) -> StoreResult<bool> {
        Ok(self.operator_rule(action)?.is_some())
    }

    /// True iff every action is operator-safe. Vacuously true for an empty
    /// action list; always false for a malformed document.
    pub fn is_operator_change(&self, proposal: &Proposal) -> StoreResult<bool> {
        if proposal.is_malformed() {
            return Ok(false);
        }
        for action in proposal.actions() {
            if !self.can_operator_pass(action)? {
                debug!(action = ?action.name(), "action is not operator-safe");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Per-action classification for reporting.
    pub fn classify(&self, proposal: &Proposal) -> StoreResult<Vec<ActionClass>> {
        proposal
            .actions()
            .iter()
            .map(|action| {
                Ok(ActionClass {
                    name: action.name.clone(),
                    rule: self.operator_rule(action)?,
                })
            })
            .collect()
    }
}
