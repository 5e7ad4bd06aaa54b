use clap::{Parser, Subcommand};

pub mod classify;
pub mod config;
pub mod init;
pub mod input;
pub mod members;
pub mod resolve;
pub mod version;

use config::{init_logging, ConstitutionConfig};

#[derive(Parser)]
#[command(name = "constitution")]
#[command(author = "Constitution Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Governance proposal resolver for confidential ledger networks", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.config/constitution/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether a proposal is Accepted or still Open
    Resolve {
        /// Proposal document (JSON with an `actions` array)
        #[arg(long)]
        proposal: String,

        /// Member id of the proposal's submitter
        #[arg(long)]
        proposer: String,

        /// Ballot results (JSON array of {member_id, vote}); none if omitted
        #[arg(long)]
        votes: Option<String>,

        /// Membership snapshot (overrides [store] snapshot in the config)
        #[arg(long)]
        store: Option<String>,

        /// Print the full resolution report as JSON
        #[arg(long)]
        explain: bool,
    },

    /// Show which proposal actions an operator may pass alone
    Classify {
        /// Proposal document (JSON with an `actions` array)
        #[arg(long)]
        proposal: String,

        /// Membership snapshot (overrides [store] snapshot in the config)
        #[arg(long)]
        store: Option<String>,
    },

    /// List snapshot members with their status, operator and recovery flags
    Members {
        /// Membership snapshot (overrides [store] snapshot in the config)
        #[arg(long)]
        store: Option<String>,
    },

    /// Write a default config file (at --config, or the default location)
    Init {
        /// Membership snapshot the config should point at
        #[arg(long)]
        snapshot: String,

        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Resolve {
            proposal,
            proposer,
            votes,
            store,
            explain,
        } => {
            let config = load_config(cli.config.as_deref())?;
            resolve::execute(proposal, proposer, votes, store, explain, &config).await
        }
        Commands::Classify { proposal, store } => {
            let config = load_config(cli.config.as_deref())?;
            classify::execute(proposal, store, &config).await
        }
        Commands::Members { store } => {
            let config = load_config(cli.config.as_deref())?;
            members::execute(store, &config).await
        }
        // init writes the config, so it must not require a readable one
        Commands::Init { snapshot, force } => init::execute(snapshot, cli.config, force).await,
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

/// Load the config and install logging for commands that read a snapshot.
fn load_config(path: Option<&str>) -> Result<ConstitutionConfig, Box<dyn std::error::Error>> {
    let config = ConstitutionConfig::resolve(path)?;
    init_logging(&config.logging)?;
    Ok(config)
}
