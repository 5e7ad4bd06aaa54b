//! Member vote tally.
//!
//! Operators never count toward the member quorum, whether they vote or not.

use super::ballot::Vote;
use super::classifier::ActionClassifier;
use crate::store::{MemberStore, StoreResult};
use serde::Serialize;
use tracing::debug;

/// Counts behind the member-majority rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteTally {
    /// Accepting votes from non-operator members.
    pub member_votes: usize,
    /// Non-operator members with status `Active`.
    pub active_members: usize,
    /// Accepting votes from operators. Reported, never counted.
    pub operator_votes: usize,
}

impl VoteTally {
    /// Count votes and active members against the current snapshot.
    ///
    /// Nothing is cached: the membership may change between calls.
    pub fn compute(votes: &[Vote], members: &MemberStore<'_>) -> StoreResult<Self> {
        let classifier = ActionClassifier::new(members);
        let mut tally = Self::default();

        for ballot in votes.iter().filter(|ballot| ballot.vote) {
            if classifier.is_operator(&ballot.member_id)? {
                tally.operator_votes += 1;
            } else {
                tally.member_votes += 1;
            }
        }

        members.for_each_member(&mut |_, record| {
            if record.is_active() && !record.is_operator() {
                tally.active_members += 1;
            }
        })?;

        debug!(
            member_votes = tally.member_votes,
            active_members = tally.active_members,
            operator_votes = tally.operator_votes,
            "computed vote tally"
        );

        Ok(tally)
    }

    /// `floor(active_members / 2)`; support must strictly exceed it.
    pub fn majority_threshold(&self) -> usize {
        self.active_members / 2
    }

    /// Strict majority of active non-operator members. A tie does not pass.
    pub fn has_majority(&self) -> bool {
        self.member_votes > self.majority_threshold()
    }
}
