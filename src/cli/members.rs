use super::config::ConstitutionConfig;
use super::input::{load_tables, snapshot_path};
use constitution::governance::{MemberId, MemberRecord};

/// List the members of a snapshot with the flags resolution looks at
///
/// Recovery membership is shown for reference only; it never affects a
/// verdict.
pub async fn execute(
    store: Option<String>,
    config: &ConstitutionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = render(store, config).await?;
    print!("{}", output);
    Ok(())
}

async fn render(
    store: Option<String>,
    config: &ConstitutionConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let tables = load_tables(&snapshot_path(store, config)?).await?;
    let members = tables.store();

    let mut records: Vec<(MemberId, MemberRecord)> = Vec::new();
    members.for_each_member(&mut |id, record| records.push((id.clone(), record.clone())))?;
    records.sort_by(|a, b| a.0.cmp(&b.0));

    let mut output = String::new();
    let mut quorum_members = 0;
    for (id, record) in &records {
        let status = record
            .status
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let recovery = members.is_recovery_member(id)?;

        output.push_str(&format!(
            "{}  status={}  operator={}  recovery={}\n",
            id,
            status,
            record.is_operator(),
            recovery
        ));

        if record.is_active() && !record.is_operator() {
            quorum_members += 1;
        }
    }

    output.push_str(&format!(
        "{} members, {} active non-operators, majority needs more than {} votes\n",
        records.len(),
        quorum_members,
        quorum_members / 2
    ));

    Ok(output)
}
