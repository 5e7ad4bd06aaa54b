//! Reading CLI inputs from disk.
//!
//! Everything is read up front; the resolver only ever sees in-memory data.

use super::config::ConstitutionConfig;
use constitution::store::{MembershipTables, SnapshotFormat, StoreSnapshot};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a whole input file.
pub async fn read_input(path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input");
    Ok(bytes)
}

/// Snapshot path from `--store`, falling back to the config file.
pub fn snapshot_path(
    flag: Option<String>,
    config: &ConstitutionConfig,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    flag.map(PathBuf::from)
        .or_else(|| config.store.snapshot.clone())
        .ok_or_else(|| {
            "No membership snapshot given. Pass --store or set [store] snapshot in the config."
                .into()
        })
}

/// Load a snapshot file into membership tables.
///
/// An unreadable or undecodable snapshot is a hard failure: resolving
/// against an empty membership would understate the active member count.
pub async fn load_tables(path: &Path) -> Result<MembershipTables, Box<dyn std::error::Error>> {
    let bytes = read_input(path).await?;
    let format = SnapshotFormat::from_path(path);

    let snapshot = StoreSnapshot::decode(&bytes, format)
        .map_err(|e| format!("Failed to decode snapshot '{}': {}", path.display(), e))?;
    let tables = snapshot
        .into_tables()
        .map_err(|e| format!("Failed to load snapshot '{}': {}", path.display(), e))?;

    debug!(members = tables.info.len(), ?format, "loaded membership snapshot");
    Ok(tables)
}
