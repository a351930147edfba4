//! # Configuration Management Module
//!
//! Door settings that are not carried by the drop file: idle policy, grace periods,
//! terminal fallbacks and logging. Every field has a default, so the door runs without
//! any configuration file at all.
//!
//! ## Configuration Structure
//!
//! - [`DoorConfig`] - idle timeout, grace periods and session time budget
//! - [`TerminalConfig`] - fallback terminal size and minimum modal box
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ansidoor::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env().await?;
//!     println!("Idle timeout: {:?}", config.door.idle_timeout());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! The file is TOML and is located through the `ANSIDOOR_CONFIG` environment variable.
//! Missing sections and fields fall back to defaults:
//!
//! ```toml
//! [door]
//! idle_timeout_secs = 120
//! decline_grace_ms = 2000
//!
//! [terminal]
//! default_width = 80
//! default_height = 25
//!
//! [logging]
//! level = "info"
//! file = "ansidoor.log"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

/// Environment variable naming the optional TOML configuration file.
pub const CONFIG_ENV_VAR: &str = "ANSIDOOR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub door: DoorConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session policy knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Seconds without a key press at the menu before the session is ended.
    pub idle_timeout_secs: u64,
    /// Delay after the idle farewell so it reaches the remote before the door exits.
    pub idle_grace_ms: u64,
    /// Delay after the "ANSI required" notice before the door exits.
    pub decline_grace_ms: u64,
    /// End the session when the drop file's time-left budget runs out.
    pub enforce_time_limit: bool,
    /// Delay after the time-up notice before the door exits.
    pub time_up_grace_ms: u64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 120,
            idle_grace_ms: 1000,
            decline_grace_ms: 2000,
            enforce_time_limit: true,
            time_up_grace_ms: 1000,
        }
    }
}

impl DoorConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn idle_grace(&self) -> Duration {
        Duration::from_millis(self.idle_grace_ms)
    }

    pub fn decline_grace(&self) -> Duration {
        Duration::from_millis(self.decline_grace_ms)
    }

    pub fn time_up_grace(&self) -> Duration {
        Duration::from_millis(self.time_up_grace_ms)
    }
}

/// Fallbacks used when the terminal size cannot be probed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub default_width: u16,
    pub default_height: u16,
    pub min_modal_width: u16,
    pub min_modal_height: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            default_width: 80,
            default_height: 25,
            min_modal_width: 30,
            min_modal_height: 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("ansidoor.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parse `level` into a filter; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `ANSIDOOR_CONFIG`, or use defaults when it is unset.
    pub async fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)).await,
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.door.idle_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "door.idle_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.terminal.default_width == 0 || self.terminal.default_height == 0 {
            return Err(ConfigError::Invalid(
                "terminal.default_width and terminal.default_height must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_door_conventions() {
        let config = Config::default();
        assert_eq!(config.door.idle_timeout(), Duration::from_secs(120));
        assert_eq!(config.door.decline_grace(), Duration::from_secs(2));
        assert_eq!(config.door.idle_grace(), Duration::from_secs(1));
        assert!(config.door.enforce_time_limit);
        assert_eq!(config.terminal.default_width, 80);
        assert_eq!(config.terminal.default_height, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("[door]\nidle_timeout_secs = 30\n").unwrap();
        assert_eq!(config.door.idle_timeout_secs, 30);
        assert_eq!(config.door.decline_grace_ms, 2000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.terminal.min_modal_width, 30);
    }

    #[test]
    fn zero_idle_timeout_is_rejected() {
        let mut config = Config::default();
        config.door.idle_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "chatty".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Info);
        let logging = LoggingConfig {
            level: "debug".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
    }

    #[tokio::test]
    async fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("door.toml");
        std::fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();
        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Trace);
        assert_eq!(config.logging.file.as_deref(), Some("ansidoor.log"));
    }

    #[tokio::test]
    async fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[door\nidle").unwrap();
        let err = Config::load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
