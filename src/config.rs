use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::{Error, Result};
use crate::takeover::{DEFAULT_PROBE_DELAY, DEFAULT_REGISTRY_URL};

/// Optional settings read from `depgrab.toml`. Command-line flags win.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DepgrabConfig {
    pub database: Option<PathBuf>,
    pub registry_url: Option<String>,
    pub probe_delay_ms: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl DepgrabConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }

    pub fn registry_url(&self) -> &str {
        self.registry_url.as_deref().unwrap_or(DEFAULT_REGISTRY_URL)
    }

    pub fn probe_delay(&self) -> Duration {
        self.probe_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PROBE_DELAY)
    }

    /// Certificate checks stay off unless the config turns them on
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs.unwrap_or(true)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("depgrab.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("dependencies.db")
}

/// Load the config file. A missing default file is not an error; a missing
/// file that was asked for explicitly is.
pub fn load_config(path: Option<&Path>) -> Result<DepgrabConfig> {
    let explicit = path.is_some();
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        if explicit {
            return Err(Error::Config(format!("config file not found: {}", path.display())));
        }
        return Ok(DepgrabConfig::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: DepgrabConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
