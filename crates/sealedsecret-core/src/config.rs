//! Configuration management for sealedsecret.
//!
//! This module provides multi-layer configuration support with:
//! - File-based configuration (YAML)
//! - Environment variable overrides
//! - Programmatic updates
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables
//! 2. Programmatically set values
//! 3. Values loaded from file
//! 4. Default values
//!
//! ## Example
//!
//! ```no_run
//! use sealedsecret_core::config::Config;
//!
//! let mut config = Config::load("/etc/sealedsecret/config.yml")?.with_env()?;
//! config.set("payload_binding", "unbound")?;
//!
//! let sealer = config.sealer_config()?;
//! assert!(sealer.reject_expired_certificates);
//! # Ok::<(), sealedsecret_types::SealError>(())
//! ```

use sealedsecret_types::{LogFormat, LogLevel, PayloadBinding, Result, SealError, SealerConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "SEALEDSECRET_";

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

const LAYERS_BY_PRIORITY: [ConfigLayer; 4] = [
    ConfigLayer::Environment,
    ConfigLayer::Set,
    ConfigLayer::Loaded,
    ConfigLayer::Default,
];

/// Main configuration structure with multi-layer support.
#[derive(Clone, Debug, Default)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Create a configuration holding only the built-in defaults.
    pub fn new() -> Result<Self> {
        let defaults = serde_json::to_value(SealerConfig::default())?;
        let mut layers = HashMap::new();
        layers.insert(ConfigLayer::Default, defaults);
        Ok(Self { layers, file_path: None })
    }

    /// Create a new configuration from a file path.
    ///
    /// If the file doesn't exist, only the defaults are present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::new()?;

        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| SealError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

            if !content.trim().is_empty() {
                let value: Value = serde_yaml::from_str(&content)
                    .map_err(|e| SealError::Config(format!("Failed to parse config {}: {}", path.display(), e)))?;

                if !value.is_null() {
                    config.layers.insert(ConfigLayer::Loaded, value);
                }
            }
            tracing::debug!(path = %path.display(), "loaded configuration file");
        }

        config.file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply overrides from the process environment.
    ///
    /// A known variable with an unparseable value fails the whole load.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(std::env::vars().filter(|(k, _)| k.starts_with(ENV_PREFIX)))
    }

    /// Apply overrides from an explicit set of variables.
    ///
    /// Unknown `SEALEDSECRET_*` variables are ignored; known ones with
    /// unparseable values are an error.
    pub fn with_env_from<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut layer = Value::Object(Default::default());

        for (key, raw) in vars {
            let raw = raw.as_ref();
            let (path, value) = match key.as_ref() {
                "SEALEDSECRET_PAYLOAD_BINDING" => (
                    "payload_binding",
                    serde_json::to_value(raw.parse::<PayloadBinding>()?)?,
                ),
                "SEALEDSECRET_REJECT_EXPIRED_CERTIFICATES" => {
                    ("reject_expired_certificates", Value::Bool(parse_bool(raw)?))
                }
                "SEALEDSECRET_LOG_LEVEL" => ("log.level", serde_json::to_value(raw.parse::<LogLevel>()?)?),
                "SEALEDSECRET_LOG_FORMAT" => ("log.format", serde_json::to_value(raw.parse::<LogFormat>()?)?),
                "SEALEDSECRET_LOG_PATH" => ("log.path", Value::String(raw.to_string())),
                _ => continue,
            };
            set_value_at_path(&mut layer, path, value)?;
        }

        self.layers.insert(ConfigLayer::Environment, layer);
        Ok(self)
    }

    /// Get a configuration value by dotted key, respecting layer priority.
    ///
    /// Returns None if the key doesn't exist in any layer.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        for layer in &LAYERS_BY_PRIORITY {
            if let Some(layer_data) = self.layers.get(layer) {
                if let Some(value) = crate::util::data::get_path(layer_data, key) {
                    if let Ok(typed_value) = serde_json::from_value(value.clone()) {
                        return Some(typed_value);
                    }
                }
            }
        }

        None
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| SealError::Config(format!("Failed to serialize value: {}", e)))?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert(Value::Object(Default::default()));

        set_value_at_path(set_layer, key, value)
    }

    /// Path this configuration was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Resolve all layers into a typed `SealerConfig`.
    pub fn sealer_config(&self) -> Result<SealerConfig> {
        serde_json::from_value(self.merged_data())
            .map_err(|e| SealError::Config(format!("Failed to parse sealer config: {}", e)))
    }

    /// Get merged data from all layers, lowest priority first.
    fn merged_data(&self) -> Value {
        let mut merged = Value::Object(serde_json::Map::new());

        for layer in LAYERS_BY_PRIORITY.iter().rev() {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = crate::util::data::deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }

    /// Get the default configuration path (`<config dir>/sealedsecret/config.yml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::APP_NAME).join("config.yml"))
    }
}

/// Load the sealer configuration from an explicit path, or the default path,
/// with environment overrides applied on top.
pub fn load_sealer_config(path: Option<&Path>) -> Result<SealerConfig> {
    load_sealer_config_with(path, std::env::vars())
}

/// Like [`load_sealer_config`], with the environment supplied by the caller.
pub fn load_sealer_config_with<I, K, V>(path: Option<&Path>, vars: I) -> Result<SealerConfig>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let config = match path.map(Path::to_path_buf).or_else(Config::default_path) {
        Some(path) => Config::load(path)?,
        None => Config::new()?,
    };
    config.with_env_from(vars)?.sealer_config()
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SealError::Config(format!("Invalid boolean: {}", raw))),
    }
}

// Set value at dotted path, creating intermediate objects as needed
fn set_value_at_path(data: &mut Value, path: &str, value: Value) -> Result<()> {
    let parts: Vec<&str> = path.split('.').filter(|p| !p.is_empty()).collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(SealError::Config("Empty path".to_string()));
    };

    let mut current = data;
    for part in parents {
        if !current.is_object() {
            *current = Value::Object(Default::default());
        }
        current = match current {
            Value::Object(map) => map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Default::default())),
            _ => return Err(SealError::Bug(format!("config path {} lost its parent", path))),
        };
    }

    if !current.is_object() {
        *current = Value::Object(Default::default());
    }
    if let Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }

    Ok(())
}
