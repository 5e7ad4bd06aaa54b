//! Governance resolution: members, proposals, ballots and the verdict.
//!
//! - Classifier: operator privilege and operator-safe actions
//! - Tally: member-majority counts, operators excluded
//! - Resolution: combines both into `Accepted` or `Open`

pub mod ballot;
pub mod classifier;
pub mod member;
pub mod proposal;
pub mod resolution;
pub mod tally;

#[cfg(test)]
mod proptests;

pub use ballot::{parse_votes, Vote};
pub use classifier::{ActionClass, ActionClassifier, OperatorRule, OPERATOR_SAFE_ACTIONS};
pub use member::{MemberData, MemberId, MemberRecord, MemberStatus};
pub use proposal::{Action, ActionArgs, Proposal};
pub use resolution::{AcceptancePath, Resolution, Resolver, Verdict};
pub use tally::VoteTally;
