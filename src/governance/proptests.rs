//! Property-based tests for proposal resolution
//!
//! Tests for:
//! - Majority: enough non-operator support always accepts
//! - Purity: identical inputs give identical verdicts
//! - Monotonicity: one more accepting member vote never reopens a proposal
//! - Fast path: a single non-operator-safe action blocks it

use super::ballot::Vote;
use super::member::{MemberData, MemberId, MemberRecord, MemberStatus};
use super::proposal::{Action, Proposal};
use super::resolution::{Resolver, Verdict};
use crate::store::StoreSnapshot;
use proptest::prelude::*;
use serde_json::json;

const ACTION_POOL: &[&str] = &[
    "set_js_app",
    "trigger_snapshot",
    "set_user",
    "remove_node",
    "set_constitution",
    "set_user_data",
    "set_recovery_threshold",
];

/// (status selector, operator flag, ballot)
type MemberSpec = (u8, bool, Option<bool>);

fn member_specs() -> impl Strategy<Value = Vec<MemberSpec>> {
    prop::collection::vec(
        (0u8..3, any::<bool>(), prop::option::of(any::<bool>())),
        0..16,
    )
}

fn member_id(i: usize) -> MemberId {
    MemberId::new(format!("m{}", i))
}

fn build_snapshot(specs: &[MemberSpec]) -> StoreSnapshot {
    let mut snapshot = StoreSnapshot::new();
    for (i, (status, operator, _)) in specs.iter().enumerate() {
        let status = match status {
            0 => MemberStatus::Active,
            1 => MemberStatus::Accepted,
            _ => MemberStatus::Retired,
        };
        let record = MemberRecord::new(status).with_member_data(MemberData {
            is_operator: Some(*operator),
            ..Default::default()
        });
        snapshot.insert_member(member_id(i), &record);
    }
    snapshot
}

fn build_votes(specs: &[MemberSpec]) -> Vec<Vote> {
    specs
        .iter()
        .enumerate()
        .filter_map(|(i, (_, _, ballot))| ballot.map(|vote| Vote::new(member_id(i), vote)))
        .collect()
}

fn build_proposal(names: &[&str]) -> Proposal {
    Proposal::new(names.iter().map(|name| Action::new(*name, json!({}))).collect())
}

fn proposer_id(specs: &[MemberSpec], index: &prop::sample::Index) -> MemberId {
    if specs.is_empty() {
        MemberId::from("nobody")
    } else {
        member_id(index.index(specs.len()))
    }
}

proptest! {
    /// Property: strict majority of active non-operators accepts any proposal
    #[test]
    fn majority_always_accepts(
        specs in member_specs(),
        names in prop::collection::vec(prop::sample::select(ACTION_POOL), 0..4),
        proposer in any::<prop::sample::Index>(),
    ) {
        let member_votes = specs
            .iter()
            .filter(|(_, operator, ballot)| !operator && *ballot == Some(true))
            .count();
        let active_members = specs
            .iter()
            .filter(|(status, operator, _)| *status == 0 && !operator)
            .count();

        let tables = build_snapshot(&specs).into_tables().unwrap();
        let resolver = Resolver::new(tables.store());
        let resolution = resolver
            .resolve(&build_proposal(&names), &proposer_id(&specs, &proposer), &build_votes(&specs))
            .unwrap();

        prop_assert_eq!(resolution.tally.member_votes, member_votes);
        prop_assert_eq!(resolution.tally.active_members, active_members);
        if member_votes > active_members / 2 {
            prop_assert_eq!(resolution.verdict, Verdict::Accepted);
        }
    }

    /// Property: resolving twice with identical inputs yields the same report
    #[test]
    fn resolution_is_pure(
        specs in member_specs(),
        names in prop::collection::vec(prop::sample::select(ACTION_POOL), 0..4),
        proposer in any::<prop::sample::Index>(),
    ) {
        let tables = build_snapshot(&specs).into_tables().unwrap();
        let resolver = Resolver::new(tables.store());
        let proposal = build_proposal(&names);
        let proposer = proposer_id(&specs, &proposer);
        let votes = build_votes(&specs);

        let first = resolver.resolve(&proposal, &proposer, &votes).unwrap();
        let second = resolver.resolve(&proposal, &proposer, &votes).unwrap();

        prop_assert_eq!(first, second);
    }

    /// Property: adding an accepting non-operator vote never moves Accepted to Open
    #[test]
    fn extra_member_vote_is_monotonic(
        specs in member_specs(),
        names in prop::collection::vec(prop::sample::select(ACTION_POOL), 0..4),
        proposer in any::<prop::sample::Index>(),
    ) {
        let Some(newcomer) = specs
            .iter()
            .position(|(_, operator, ballot)| !operator && ballot.is_none())
        else {
            return Ok(());
        };

        let tables = build_snapshot(&specs).into_tables().unwrap();
        let resolver = Resolver::new(tables.store());
        let proposal = build_proposal(&names);
        let proposer = proposer_id(&specs, &proposer);

        let mut votes = build_votes(&specs);
        let before = resolver.resolve(&proposal, &proposer, &votes).unwrap();

        votes.push(Vote::accept(member_id(newcomer)));
        let after = resolver.resolve(&proposal, &proposer, &votes).unwrap();

        prop_assert_eq!(after.tally.member_votes, before.tally.member_votes + 1);
        if before.verdict == Verdict::Accepted {
            prop_assert_eq!(after.verdict, Verdict::Accepted);
        }
    }

    /// Property: without votes, one non-operator-safe action keeps any proposal open
    #[test]
    fn unsafe_action_blocks_fast_path(
        specs in member_specs(),
        names in prop::collection::vec(prop::sample::select(ACTION_POOL), 0..4),
        proposer in any::<prop::sample::Index>(),
    ) {
        let mut names = names;
        names.push("set_user_data");

        let tables = build_snapshot(&specs).into_tables().unwrap();
        let resolver = Resolver::new(tables.store());
        let resolution = resolver
            .resolve(&build_proposal(&names), &proposer_id(&specs, &proposer), &[])
            .unwrap();

        prop_assert!(!resolution.operator_change);
        prop_assert_eq!(resolution.verdict, Verdict::Open);
    }

    /// Property: operator ballots never change the verdict
    #[test]
    fn operator_votes_are_ignored(
        specs in member_specs(),
        names in prop::collection::vec(prop::sample::select(ACTION_POOL), 0..4),
        proposer in any::<prop::sample::Index>(),
    ) {
        let tables = build_snapshot(&specs).into_tables().unwrap();
        let resolver = Resolver::new(tables.store());
        let proposal = build_proposal(&names);
        let proposer = proposer_id(&specs, &proposer);

        let mut votes = build_votes(&specs);
        let before = resolver.resolve(&proposal, &proposer, &votes).unwrap();

        for (i, (_, operator, _)) in specs.iter().enumerate() {
            if *operator {
                votes.push(Vote::accept(member_id(i)));
            }
        }
        let after = resolver.resolve(&proposal, &proposer, &votes).unwrap();

        prop_assert_eq!(after.verdict, before.verdict);
        prop_assert_eq!(after.tally.member_votes, before.tally.member_votes);
    }
}
