//! Constitution - Governance proposal resolver for confidential ledger networks
//!
//! Decides whether a governance proposal is `Accepted` or stays `Open`.
//!
//! Key principles:
//! - Pure function of (proposal, proposer, votes, membership snapshot)
//! - Membership store injected read-only, never global
//! - Operators never count toward the member quorum
//! - Malformed input degrades to "not qualifying"; only store failures error

pub mod governance;
pub mod identity;
pub mod serialization;
pub mod store;

pub use governance::{Proposal, Resolution, Resolver, Verdict, Vote};
pub use store::{MemberStore, StoreError, StoreResult};
