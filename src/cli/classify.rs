use super::config::ConstitutionConfig;
use super::input::{load_tables, read_input, snapshot_path};
use constitution::governance::{ActionClass, ActionClassifier, OperatorRule, Proposal};
use std::path::PathBuf;

/// Show which actions of a proposal an operator may pass alone
///
/// The snapshot is needed because `remove_member` is operator-safe only
/// when its target is an operator.
pub async fn execute(
    proposal: String,
    store: Option<String>,
    config: &ConstitutionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = render(proposal, store, config).await?;
    print!("{}", output);
    Ok(())
}

async fn render(
    proposal: String,
    store: Option<String>,
    config: &ConstitutionConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let tables = load_tables(&snapshot_path(store, config)?).await?;
    let proposal = Proposal::parse(&read_input(&PathBuf::from(proposal)).await?);

    let members = tables.store();
    let classifier = ActionClassifier::new(&members);

    let mut output = String::new();
    if let Proposal::Malformed { reason } = &proposal {
        output.push_str(&format!("Malformed proposal: {}\n", reason));
    }

    for (index, class) in classifier.classify(&proposal)?.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, describe(class)));
    }

    let operator_change = classifier.is_operator_change(&proposal)?;
    output.push_str(&format!(
        "Operator change: {}\n",
        if operator_change { "yes" } else { "no" }
    ));

    Ok(output)
}

fn describe(class: &ActionClass) -> String {
    let name = class.name.as_deref().unwrap_or("<unnamed>");
    match class.rule {
        Some(OperatorRule::Allowlisted) => format!("{}: operator-safe (allowlisted)", name),
        Some(OperatorRule::OperatorPromotion) => {
            format!("{}: operator-safe (adds an operator)", name)
        }
        Some(OperatorRule::OperatorRemoval) => {
            format!("{}: operator-safe (removes an operator)", name)
        }
        None => format!("{}: requires member majority", name),
    }
}
