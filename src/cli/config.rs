//! Constitution CLI configuration file handling
//!
//! Configuration files are TOML and live at
//! `~/.config/constitution/config.toml` unless `--config` names another file.
//!
//! ## What is NOT configurable
//!
//! The resolution rules themselves (majority threshold, operator allowlist)
//! are fixed. The config only says where the membership snapshot lives and
//! how to log.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "warn";

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstitutionConfig {
    /// Membership snapshot configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Membership snapshot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file used when `--store` is not given (JSON, or CBOR for `.cbor`)
    pub snapshot: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl ConstitutionConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: ConstitutionConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Load the config named by `--config`, else the default file if it exists,
    /// else built-in defaults. A missing explicit file is an error.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match explicit {
            Some(path) => Self::load(Path::new(path)),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml(snapshot: &Path) -> String {
        format!(
            r#"# Constitution CLI Configuration
#
# The resolution rules (member majority, operator allowlist) are fixed and
# cannot be changed here.

[store]
# Membership snapshot used when --store is not given.
# JSON by default; files ending in .cbor are read as CBOR.
snapshot = {snapshot}

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides this)
level = "warn"

# Log file path (optional, logs to stderr if not specified)
# file = "/var/log/constitution.log"
"#,
            snapshot = toml::Value::String(snapshot.display().to_string())
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(
        config_path: &Path,
        snapshot: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml(snapshot);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("constitution")
        .join("config.toml")
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr (or the configured file) so stdout carries only the
/// verdict. Calling this twice is harmless.
pub fn init_logging(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match &logging.file {
        Some(path) => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Failed to open log file '{}': {}", path.display(), e))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    Ok(())
}
