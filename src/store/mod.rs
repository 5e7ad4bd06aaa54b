//! Read-only membership storage handed to the resolver by the host.
//!
//! - Raw byte tables behind the `KvMap` trait
//! - A typed accessor over the member info and encryption key tables
//! - Snapshot files for offline evaluation

pub mod members;
pub mod memory;
pub mod mock;
pub mod snapshot;
pub mod traits;

pub use members::{MemberStore, MEMBERS_INFO_TABLE, MEMBER_ENCRYPTION_KEYS_TABLE};
pub use memory::InMemoryKv;
pub use snapshot::{MembershipTables, SnapshotFormat, StoreSnapshot};
pub use traits::{KvMap, StoreError, StoreResult};
