//! Proposal resolution.
//!
//! A proposal is `Accepted` when either
//! 1. accepting non-operator votes strictly exceed half of the active
//!    non-operator members (floor division), or
//! 2. an operator proposed it and every action is operator-safe.
//!
//! Otherwise it stays `Open`. There is no rejected state: resolution is a
//! pure function of its inputs, and as votes accumulate across calls a
//! proposal can only move from `Open` to `Accepted`.

use super::ballot::{parse_votes, Vote};
use super::classifier::ActionClassifier;
use super::member::MemberId;
use super::proposal::Proposal;
use super::tally::VoteTally;
use crate::store::{MemberStore, StoreResult};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Outcome of resolving a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    Accepted,
    Open,
}

impl Verdict {
    /// The exact string the host expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Open => "Open",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule accepted a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AcceptancePath {
    MemberMajority,
    OperatorFastPath,
}

/// Verdict together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub verdict: Verdict,
    /// `None` while the proposal is open.
    pub path: Option<AcceptancePath>,
    pub tally: VoteTally,
    /// Every action is operator-safe.
    pub operator_change: bool,
    pub proposer_is_operator: bool,
}

impl Resolution {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// Resolves proposals against an injected membership snapshot.
pub struct Resolver<'a> {
    members: MemberStore<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(members: MemberStore<'a>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &MemberStore<'a> {
        &self.members
    }

    /// Decide a proposal.
    ///
    /// Malformed proposal or vote data never fails; only store errors
    /// are returned.
    pub fn resolve(
        &self,
        proposal: &Proposal,
        proposer: &MemberId,
        votes: &[Vote],
    ) -> StoreResult<Resolution> {
        let classifier = ActionClassifier::new(&self.members);

        let tally = VoteTally::compute(votes, &self.members)?;
        let operator_change = classifier.is_operator_change(proposal)?;
        let proposer_is_operator = classifier.is_operator(proposer)?;

        let path = if tally.has_majority() {
            Some(AcceptancePath::MemberMajority)
        } else if operator_change && proposer_is_operator {
            Some(AcceptancePath::OperatorFastPath)
        } else {
            None
        };

        let verdict = if path.is_some() {
            Verdict::Accepted
        } else {
            Verdict::Open
        };

        debug!(
            proposer = %proposer,
            operator_change,
            proposer_is_operator,
            "resolved fast-path inputs"
        );
        info!(verdict = %verdict, path = ?path, "proposal resolved");

        Ok(Resolution {
            verdict,
            path,
            tally,
            operator_change,
            proposer_is_operator,
        })
    }

    /// Decide a proposal from the raw JSON documents the host supplies.
    pub fn resolve_documents(
        &self,
        proposal_json: &[u8],
        proposer: &MemberId,
        votes_json: &[u8],
    ) -> StoreResult<Verdict> {
        let proposal = Proposal::parse(proposal_json);
        let votes = parse_votes(votes_json);
        Ok(self.resolve(&proposal, proposer, &votes)?.verdict)
    }
}
