//! Core configuration types and loading.

use crate::platform::{ChannelId, RoleId};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the config inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default database file name inside the config directory.
pub const DATABASE_FILE: &str = "bouncer.db";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot token used to log into Discord.
    #[serde(rename = "discord")]
    pub token: String,
    /// Prefix that marks a message as a command (e.g. "!").
    #[serde(rename = "command_prefix")]
    pub prefix: String,
    /// Path to the SQLite database. Relative paths are resolved against
    /// the config directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Channel categories commands are accepted in.
    #[serde(default)]
    pub categories: CategoryConfig,
    /// Roles allowed to run commands.
    #[serde(default)]
    pub roles: RoleConfig,
}

/// Channel category configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryConfig {
    /// Categories commands are enabled in. Commands sent in other
    /// categories are ignored.
    #[serde(default)]
    pub listening: Vec<ChannelId>,
}

/// Role configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleConfig {
    /// Admin roles. Members holding any of these may send commands.
    #[serde(default)]
    pub admin: Vec<RoleId>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `config.toml` from a config directory.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        Self::load(dir.as_ref().join(CONFIG_FILE))
    }

    /// Database location, resolved against the config directory.
    pub fn database_path(&self, config_dir: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => config_dir.join(path),
            None => config_dir.join(DATABASE_FILE),
        }
    }

    /// Whether commands are enabled in the given category.
    pub fn is_listening(&self, category: ChannelId) -> bool {
        self.categories.listening.contains(&category)
    }

    /// Whether any of the given roles is an admin role.
    pub fn has_admin_role(&self, roles: &[RoleId]) -> bool {
        self.roles.admin.iter().any(|admin| roles.contains(admin))
    }
}
