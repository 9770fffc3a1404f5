//! Logging setup.
//!
//! Everything logs through the `log` macros; this module wires the `fern`
//! dispatcher that formats records and sends them to stdout and, when
//! configured, to a log file.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::LoggingConfig;
use crate::constants::{LOG_DIR_NAME, LOG_FILE_NAME};

/// Install the global logger. Does nothing when logging is disabled.
///
/// Can only succeed once per process; a second call returns an error.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter()?)
        // sqlx logs every statement at info
        .level_for("sqlx", log::LevelFilter::Warn)
        .chain(std::io::stdout());

    if config.to_file {
        let path = match &config.file {
            Some(path) => path.clone(),
            None => get_log_file_path()?,
        };
        dispatch = dispatch.chain(open_log_file(path)?);
    }

    dispatch.apply().context("Failed to install logger")?;
    Ok(())
}

/// Default location for the log file
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

fn open_log_file(path: PathBuf) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
    }
    fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))
}
