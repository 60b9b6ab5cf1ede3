use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PLUGIN_DIR_ENV: &str = "RESHADY_PLUGIN_DIR";
pub const DECKY_PLUGIN_DIR_ENV: &str = "DECKY_PLUGIN_DIR";
pub const LOG_LEVEL_ENV: &str = "RESHADY_LOG_LEVEL";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot locate plugin directory: {0}")]
    PluginDirUnresolved(String),

    #[error("Plugin directory is not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub plugin_dir: PathBuf,
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Config {
    /// Resolves the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let exe = std::env::current_exe()
            .map_err(|e| ConfigError::PluginDirUnresolved(e.to_string()))?;
        Self::resolve(|key| std::env::var(key).ok(), &exe)
    }

    /// Plugin directory precedence: `RESHADY_PLUGIN_DIR`, then the host's
    /// `DECKY_PLUGIN_DIR`, then the parent of the executable's directory
    /// (the binary ships as `<plugin>/bin/reshady-backend`).
    pub fn resolve<F>(lookup: F, exe: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let plugin_dir = match from_env(PLUGIN_DIR_ENV).or_else(|| from_env(DECKY_PLUGIN_DIR_ENV)) {
            Some(dir) => PathBuf::from(dir),
            None => exe
                .parent()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
                .ok_or_else(|| {
                    ConfigError::PluginDirUnresolved(format!(
                        "{} has no grandparent directory",
                        exe.display()
                    ))
                })?,
        };

        if !plugin_dir.is_dir() {
            return Err(ConfigError::NotADirectory(plugin_dir));
        }

        Ok(Self {
            plugin_dir,
            log_level: from_env(LOG_LEVEL_ENV).unwrap_or_else(default_log_level),
        })
    }
}
