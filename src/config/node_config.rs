//! Node Configuration - identity, simulation timing and server settings
//!
//! Each struct implements `Default` with the demo's built-in values, so the
//! node behaves identically with or without a config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use super::validation;
use crate::decision::SeverityPolicy;
use crate::types::NodeInfo;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one virtual anchor node.
///
/// Search order, first hit wins (`load()` covers steps 2-4):
/// 1. `--config <path>` (binaries call `load_from_file` directly)
/// 2. `$SMARTTRACK_CONFIG`
/// 3. `./node_config.toml`
/// 4. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// Node identity reported in alerts
    #[serde(default)]
    pub node: NodeInfo,

    /// Decision policy and dashboard timing
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where a discovered config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    EnvVar(PathBuf),
    LocalFile(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::EnvVar(p) => write!(f, "{} ({})", p.display(), defaults::CONFIG_ENV_VAR),
            ConfigSource::LocalFile(p) => write!(f, "{}", p.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Result of the config search, including every candidate that was skipped.
#[derive(Debug, Clone)]
pub struct DiscoveredConfig {
    pub config: NodeConfig,
    pub source: ConfigSource,
    /// One message per candidate file that existed (or was named) but failed
    pub fallbacks: Vec<String>,
}

impl NodeConfig {
    /// Load configuration using the standard search order, falling back to
    /// defaults when a file is missing or invalid.
    pub fn load() -> Self {
        let env_path = std::env::var(defaults::CONFIG_ENV_VAR).ok();
        let found = Self::discover(env_path.as_deref(), Path::new(defaults::LOCAL_CONFIG_FILE));

        for reason in &found.fallbacks {
            warn!("{reason}, falling back");
        }
        match &found.source {
            ConfigSource::Defaults => info!("No usable node_config.toml found — using built-in defaults"),
            source => info!(source = %source, node = %found.config.node.id, "Loaded node config"),
        }
        found.config
    }

    /// Walk the search order without logging.
    ///
    /// `env_path` is the value of `SMARTTRACK_CONFIG`, if set; `local` is
    /// the working-directory candidate.
    pub fn discover(env_path: Option<&str>, local: &Path) -> DiscoveredConfig {
        let mut fallbacks = Vec::new();

        if let Some(path) = env_path {
            let p = PathBuf::from(path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        return DiscoveredConfig {
                            config,
                            source: ConfigSource::EnvVar(p),
                            fallbacks,
                        }
                    }
                    Err(e) => fallbacks.push(format!("{} invalid: {e}", defaults::CONFIG_ENV_VAR)),
                }
            } else {
                fallbacks.push(format!(
                    "{} points to non-existent file {path}",
                    defaults::CONFIG_ENV_VAR
                ));
            }
        }

        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    return DiscoveredConfig {
                        config,
                        source: ConfigSource::LocalFile(local.to_path_buf()),
                        fallbacks,
                    }
                }
                Err(e) => fallbacks.push(format!("{} invalid: {e}", local.display())),
            }
        }

        DiscoveredConfig {
            config: Self::default(),
            source: ConfigSource::Defaults,
            fallbacks,
        }
    }

    /// Load from a specific TOML file.
    ///
    /// Unknown keys are logged as warnings; invalid values are an error.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        for w in validation::validate_unknown_keys(&contents) {
            warn!(path = %path.display(), "{}", w);
        }

        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Collect every validation problem rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = validation::validate_node(&self.node);

        if self.simulation.periodic_window_secs == 0 {
            errors.push("simulation.periodic_window_secs must be at least 1".to_string());
        }
        if self.server.addr.trim().is_empty() {
            errors.push("server.addr must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Decision policy configured with this node's periodic window.
    pub fn policy(&self) -> SeverityPolicy {
        SeverityPolicy::new(self.simulation.periodic_window_secs)
    }

    /// Bind address: `SMARTTRACK_ADDR` wins over the file value.
    pub fn server_addr(&self) -> String {
        std::env::var(defaults::ADDR_ENV_VAR).unwrap_or_else(|_| self.server.addr.clone())
    }
}

// ============================================================================
// Simulation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Periodic-mode window; the crack event fires in its first second
    #[serde(default = "default_periodic_window_secs")]
    pub periodic_window_secs: u64,

    /// HTML auto-refresh while periodic mode is selected (0 disables)
    #[serde(default = "default_auto_refresh_secs")]
    pub auto_refresh_secs: u64,
}

fn default_periodic_window_secs() -> u64 {
    defaults::PERIODIC_WINDOW_SECS
}

fn default_auto_refresh_secs() -> u64 {
    defaults::AUTO_REFRESH_SECS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            periodic_window_secs: default_periodic_window_secs(),
            auto_refresh_secs: default_auto_refresh_secs(),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `SMARTTRACK_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}
