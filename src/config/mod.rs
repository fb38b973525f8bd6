//! Configuration module for gamemaster.
//!
//! Handles loading and parsing the .gmrc configuration file.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::addons::{DEFAULT_BRANCH, DEFAULT_SOURCE_HOST, DEFAULT_USER_AGENT};
use crate::logging::LogConfig;

/// Environment variable overriding the configured addon list.
pub const ADDONS_ENV: &str = "APP_ADDONS";

/// Default .gmrc file content with all settings documented.
const DEFAULT_GMRC: &str = r#"# Gamemaster Configuration File
# =============================
# This file is read on startup.
# Lines starting with '#' are comments.
#
# Addons
# ------
# Comma-separated list of GitHub repositories (owner/repo) to load.
# The APP_ADDONS environment variable overrides this value.
# addons = slack-rpg/addon-official
addons =

# Host serving repository archives and the branch to download.
# source_host = https://github.com
# branch = master

# User-Agent sent with archive downloads.
# user_agent = gamemaster-addon-loader

# Logging Configuration
# ---------------------
# Logs are stored in ~/.gamemaster/logs/ with automatic cleanup.
#
# log_enabled = true       # Enable/disable file logging (true/false)
# log_level = info         # Log level: trace, debug, info, warn, error, off
# log_retention = 24       # Hours to keep log files (default: 24)
"#;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Comma-separated addon batch string.
    pub addons: String,
    /// Base URL of the archive host.
    pub source_host: String,
    /// Branch whose archive is downloaded.
    pub branch: String,
    /// User-Agent for archive requests.
    pub user_agent: String,
    /// Path to config file.
    pub config_path: PathBuf,
    /// Logging configuration.
    pub log_config: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addons: String::new(),
            source_host: DEFAULT_SOURCE_HOST.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            config_path: Self::default_config_path(),
            log_config: LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default config file path (~/.gmrc).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gmrc")
    }

    /// Loads configuration from the default path, creating it if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if config cannot be read.
    pub fn load() -> io::Result<Self> {
        let path = Self::default_config_path();
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path, then applies environment
    /// overrides.
    ///
    /// # Errors
    /// Returns error if config cannot be read.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::parse_str(&content);
        config.config_path = path.to_path_buf();
        config.apply_env_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Parses config file content without touching the environment.
    #[must_use]
    pub fn parse_str(content: &str) -> Self {
        let mut config = Self::default();
        config.parse(content);
        config
    }

    /// Creates the default config file.
    fn create_default_config(path: &Path) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_GMRC.as_bytes())?;
        Ok(())
    }

    /// Parses the config file content.
    fn parse(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Remove inline comments
                let value = value.split('#').next().unwrap_or(value).trim();

                self.apply_setting(key, value);
            }
        }
    }

    /// Applies a single setting.
    fn apply_setting(&mut self, key: &str, value: &str) {
        match key {
            "addons" => {
                self.addons = value.to_string();
            }
            "source_host" | "source-host" => {
                if !value.is_empty() {
                    self.source_host = value.trim_end_matches('/').to_string();
                }
            }
            "branch" => {
                if !value.is_empty() {
                    self.branch = value.to_string();
                }
            }
            "user_agent" => {
                if !value.is_empty() {
                    self.user_agent = value.to_string();
                }
            }
            "log_level" => {
                self.log_config.level = LogConfig::parse_level(value);
            }
            "log_retention" | "log_retention_hours" => {
                self.log_config.retention_hours = LogConfig::parse_retention(value);
            }
            "log_enabled" | "logging" => {
                self.log_config.enabled = parse_bool(value);
            }
            _ => {
                tracing::debug!("Ignoring unknown config key: {}", key);
            }
        }
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addons) = lookup(ADDONS_ENV).filter(|v| !v.trim().is_empty()) {
            self.addons = addons.trim().to_string();
        }
    }
}

/// Parses a boolean setting (`true`, `yes`, `1`, `on`).
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "1" | "on")
}
