use super::config::{default_config_path, ConstitutionConfig};
use std::path::{Path, PathBuf};

/// Write a default config file pointing at a membership snapshot
///
/// Refuses to overwrite an existing config unless `force` is set.
pub async fn execute(
    snapshot: String,
    config_path: Option<String>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    write_config(&config_path, Path::new(&snapshot), force)?;
    println!("Created config: {}", config_path.display());
    Ok(())
}

fn write_config(
    config_path: &Path,
    snapshot: &Path,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() && !force {
        return Err(format!(
            "Config already exists at: {} (use --force to replace it)",
            config_path.display()
        )
        .into());
    }

    ConstitutionConfig::create_default(config_path, snapshot)
}
