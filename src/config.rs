//! Configuration management for Rollcall
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_ALLOWED_ABSENCES, DEFAULT_DATABASE_URL, DEFAULT_LATE_REQUEST_HOURS, DEFAULT_POLL_INTERVAL_SECONDS,
    DEFAULT_PORT, ENV_DATABASE_URL, ENV_PORT,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub rules: RulesConfig,
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser; empty allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SeaORM connection URL (`sqlite://...` or `postgres://...`)
    pub url: String,
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// One of "error", "warn", "info", "debug", "trace"
    pub level: String,
    /// Also write records to a log file
    pub to_file: bool,
    /// Log file location; defaults to the user data directory
    pub file: Option<PathBuf>,
}

/// Attendance and voting rule parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Excuse requests filed this many hours or less before a meeting are late
    pub late_request_hours: i64,
    /// Allowance used for users without a role
    pub default_allowed_absences: i32,
    /// How often clients should poll the active voting event
    pub poll_interval_seconds: u64,
}

/// Identity configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Users signing in with these emails get the admin role
    pub admin_emails: Vec<String>,
    /// Bearer token -> identity subject
    pub tokens: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 8,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            to_file: false,
            file: None,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            late_request_hours: DEFAULT_LATE_REQUEST_HOURS,
            default_allowed_absences: DEFAULT_ALLOWED_ABSENCES,
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECONDS,
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .with_context(|| format!("Invalid logging level '{}'", self.level))
    }
}

impl AuthConfig {
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|e| e.eq_ignore_ascii_case(email))
    }
}

impl Config {
    /// Load configuration from `path`, or search the default locations when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("rollcall.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("rollcall").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    /// Environment variables win over file values
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        if let Ok(port) = std::env::var(ENV_PORT) {
            self.server.port = port
                .parse()
                .with_context(|| format!("{} must be a port number, got '{}'", ENV_PORT, port))?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port cannot be 0");
        }

        if self.database.url.trim().is_empty() {
            anyhow::bail!("database.url cannot be empty");
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }

        self.logging.level_filter()?;

        if self.rules.late_request_hours < 0 {
            anyhow::bail!("rules.late_request_hours cannot be negative");
        }
        if self.rules.default_allowed_absences < 0 {
            anyhow::bail!("rules.default_allowed_absences cannot be negative");
        }
        if self.rules.poll_interval_seconds == 0 || self.rules.poll_interval_seconds > 3600 {
            anyhow::bail!(
                "rules.poll_interval_seconds must be between 1 and 3600, got {}",
                self.rules.poll_interval_seconds
            );
        }

        for (token, subject) in &self.auth.tokens {
            if token.is_empty() || subject.is_empty() {
                anyhow::bail!("auth.tokens entries need a non-empty token and subject");
            }
        }

        Ok(())
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# Rollcall Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("rollcall"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
