// ============================================================================
// src/config.rs – module config: parse, defaults, log directory bootstrap
// ============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_LOG_FILE: &str = "/var/log/synapse/messages.json";

/// Zone used when rendering `origin_server_ts` as an ISO-8601 string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Append target (JSON Lines). Parent directories are created at init.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default)]
    pub timezone: Timezone,

    /// Permission bits applied when the log file is first created (unix).
    #[serde(default)]
    pub file_mode: Option<u32>,
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            timezone: Timezone::default(),
            file_mode: None,
        }
    }
}

impl LoggerConfig {
    pub fn with_log_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            log_file: path.into(),
            ..Self::default()
        }
    }

    /// Directory holding the log file, if the path names one.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// Create the log directory and any missing ancestors. Safe to repeat.
    pub fn ensure_log_dir(&self) -> Result<(), ConfigError> {
        if self.log_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyLogFile);
        }
        if let Some(dir) = self.log_dir() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                dir: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Read a standalone config file: TOML by extension, YAML otherwise.
    pub fn load<P: AsRef<Path>>(p: P) -> Result<Self> {
        let s = fs::read_to_string(&p)
            .with_context(|| format!("read config: {}", p.as_ref().display()))?;
        let cfg: Self = if p.as_ref().extension().and_then(|e| e.to_str()) == Some("toml") {
            toml::from_str(&s).context("toml parse")?
        } else {
            serde_yaml::from_str(&s).context("yaml parse")?
        };
        Ok(cfg)
    }
}

/// Turn the host-supplied module mapping into a validated config.
///
/// Unknown keys are ignored; a `null` mapping means "all defaults". The log
/// directory is created here, once, rather than on every event.
pub fn parse_config(raw: &serde_json::Value) -> Result<LoggerConfig, ConfigError> {
    let cfg = if raw.is_null() {
        LoggerConfig::default()
    } else {
        LoggerConfig::deserialize(raw)?
    };
    cfg.ensure_log_dir()?;
    Ok(cfg)
}
