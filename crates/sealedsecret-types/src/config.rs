//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::enums::{LogLevel, PayloadBinding};

/// Configuration handed to `Provider::new`.
///
/// There is no global provider instance; every caller builds one from this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealerConfig {
    /// How the binding label is attached to the symmetric payload
    #[serde(default)]
    pub payload_binding: PayloadBinding,

    /// Refuse certificates whose validity window has closed
    #[serde(default = "default_reject_expired")]
    pub reject_expired_certificates: bool,

    /// Logging output
    #[serde(default)]
    pub log: LogConfig,
}

fn default_reject_expired() -> bool {
    true
}

impl Default for SealerConfig {
    fn default() -> Self {
        Self {
            payload_binding: PayloadBinding::default(),
            reject_expired_certificates: default_reject_expired(),
            log: LogConfig::default(),
        }
    }
}

/// Log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level for this output
    #[serde(default)]
    pub level: LogLevel,
    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Optional log file; stderr when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: default_log_format(),
            path: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    Pretty,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = crate::SealError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(crate::SealError::Config(format!("Invalid log format: {}", s))),
        }
    }
}
