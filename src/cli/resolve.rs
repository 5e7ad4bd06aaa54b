use super::config::ConstitutionConfig;
use super::input::{load_tables, read_input, snapshot_path};
use constitution::governance::{parse_votes, MemberId, Proposal, Resolver};
use std::path::PathBuf;

/// Resolve a proposal against a membership snapshot
///
/// Prints exactly `Accepted` or `Open` on stdout. With `--explain`, prints
/// the full resolution report as JSON instead (verdict, acceptance path,
/// vote tally, fast-path inputs).
///
/// Without `--votes` the proposal is resolved with no ballots, which is how
/// the host evaluates a proposal at submission time.
pub async fn execute(
    proposal: String,
    proposer: String,
    votes: Option<String>,
    store: Option<String>,
    explain: bool,
    config: &ConstitutionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = render(proposal, proposer, votes, store, explain, config).await?;
    println!("{}", output);
    Ok(())
}

async fn render(
    proposal: String,
    proposer: String,
    votes: Option<String>,
    store: Option<String>,
    explain: bool,
    config: &ConstitutionConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let tables = load_tables(&snapshot_path(store, config)?).await?;

    let proposal = Proposal::parse(&read_input(&PathBuf::from(proposal)).await?);
    let votes = match votes {
        Some(path) => parse_votes(&read_input(&PathBuf::from(path)).await?),
        None => Vec::new(),
    };

    let resolver = Resolver::new(tables.store());
    let resolution = resolver.resolve(&proposal, &MemberId::new(proposer), &votes)?;

    if explain {
        Ok(serde_json::to_string_pretty(&resolution)?)
    } else {
        Ok(resolution.verdict.to_string())
    }
}
