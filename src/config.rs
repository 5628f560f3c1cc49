use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::transport::DEFAULT_TIMEOUT;
use crate::models::mask_secret;

pub const CONFIG_FILE_NAME: &str = ".cloudbackup-cli.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    pub host: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub timeout: Option<u64>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    /// `$HOME/.cloudbackup-cli.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Load an explicitly named file (must exist), or the default file if
    /// it is present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        tracing::debug!("Using config file: {}", path.display());
        Ok(config)
    }
}

/// Values given on the command line or through `BL_*` environment variables.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub timeout: Option<u64>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved settings handed to the API client.
#[derive(Clone)]
pub struct CliConfig {
    pub host: String,
    pub access_key: String,
    pub secret_key: String,
    pub timeout: Duration,
    pub format: OutputFormat,
}

impl CliConfig {
    /// Merge flags/env over the config file over defaults.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let host = pick(overrides.host, file.host)
            .context("API host is not set (use --host, BL_HOST or the config file)")?;
        let access_key = pick(overrides.access_key, file.access_key)
            .context("API access key is not set (use --access-key, BL_ACCESS_KEY or the config file)")?;
        let secret_key = pick(overrides.secret_key, file.secret_key)
            .context("API secret key is not set (use --secret-key, BL_SECRET_KEY or the config file)")?;

        let timeout = match overrides.timeout.or(file.timeout) {
            Some(0) => anyhow::bail!("Timeout must be at least one second"),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            host,
            access_key,
            secret_key,
            timeout,
            format: overrides.format.or(file.format).unwrap_or_default(),
        })
    }
}

fn pick(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    preferred
        .filter(|value| !value.trim().is_empty())
        .or_else(|| fallback.filter(|value| !value.trim().is_empty()))
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("host", &self.host)
            .field("access_key", &self.access_key)
            .field("secret_key", &mask_secret(&self.secret_key))
            .field("timeout", &self.timeout)
            .field("format", &self.format)
            .finish()
    }
}
