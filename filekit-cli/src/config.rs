//! CLI 配置
//!
//! 包含 CLI 特有的配置：配置文件读取和分目标日志级别

use filekit_config::{LogLevel, StoreConfig};
use std::path::Path;
use tracing::Level;

/// 默认配置文件名（位于当前工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "filekit.json";

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub store: Option<Level>,
    pub cli: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            store: None,
            cli: None,
        }
    }
}

impl LogConfig {
    /// Build from the store config. Every level, per-target overrides
    /// included, is raised by the number of `-v` occurrences.
    pub fn from_config(config: &StoreConfig, verbose: u8) -> Self {
        let level = |l: LogLevel| to_tracing(l.raised(verbose));
        Self {
            global: level(config.log_level),
            store: config.log_targets.store.map(level),
            cli: config.log_targets.cli.map(level),
        }
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "filekit::store" => self.store.unwrap_or(self.global),
            "filekit::cli" => self.cli.unwrap_or(self.global),
            _ => self.global,
        }
    }
}

/// Map a config level onto a tracing level
pub fn to_tracing(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

/// Read the store configuration.
///
/// An explicitly given file must exist. Without one, `filekit.json` in the
/// working directory is used when present, otherwise defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<StoreConfig, String> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(StoreConfig::default());
            }
            default
        }
    };
    read_config(path)
}

fn read_config(path: &Path) -> Result<StoreConfig, String> {
    if !path.exists() {
        return Err(format!("Config file '{}' not found", path.display()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;

    StoreConfig::from_json(&content).map_err(|e| format!("Cannot parse '{}': {}", path.display(), e))
}
