//! Filekit Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Filekit crates.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Retry policy for verified writes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of write-and-verify attempts (at least one is always made)
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds
    pub initial_backoff_ms: u64,
    /// Upper bound for any single delay, in milliseconds
    pub max_backoff_ms: u64,
}

impl RetryConfig {
    /// Delay to wait after the given failed attempt (1-based).
    ///
    /// Doubles from `initial_backoff_ms` and saturates at `max_backoff_ms`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(63);
        let millis = self
            .initial_backoff_ms
            .checked_mul(1u64 << shift)
            .unwrap_or(u64::MAX)
            .min(self.max_backoff_ms);
        Duration::from_millis(millis)
    }

    /// Effective attempt count (`max_attempts` of zero still makes one attempt)
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 10,
            max_backoff_ms: 1000,
        }
    }
}

/// Log verbosity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Get the string name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse a level name, case-insensitive. "silent" maps to `Error`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Raise verbosity by `steps` levels, saturating at `Trace`
    pub fn raised(self, steps: u8) -> Self {
        let order = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let index = order.iter().position(|l| *l == self).unwrap_or(2);
        order[(index + steps as usize).min(order.len() - 1)]
    }
}

/// Per-target log level overrides. Unset targets use `log_level`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogTargets {
    /// Level for `filekit::store`
    pub store: Option<LogLevel>,
    /// Level for `filekit::cli`
    pub cli: Option<LogLevel>,
}

/// Store configuration, usually read from `filekit.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory that relative paths resolve against
    pub base_dir: Option<PathBuf>,
    /// Base log level
    pub log_level: LogLevel,
    /// Per-target overrides of `log_level`
    pub log_targets: LogTargets,
    /// Verified-write retry policy
    pub retry: RetryConfig,
}

impl StoreConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}
