//! Configuration management for the CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// Prefix of environment variables overriding the config file
const ENV_PREFIX: &str = "OOMD";

/// Persistent CLI defaults, overridden by command-line flags
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format
    pub format: Option<OutputFormat>,
    /// Omit table headers by default
    pub no_headers: Option<bool>,
    /// Default sort field
    pub sort_field: Option<String>,
    /// Read timeout for Kubernetes API requests
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from the default file and `OOMD_*` environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, which may be absent, layered under
    /// the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Failed to parse config file")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("oomd").join("config.json"))
    }
}
