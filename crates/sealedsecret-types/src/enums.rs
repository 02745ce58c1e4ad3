//! Common enumerations used throughout sealedsecret.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{SealError, Result};

/// Disclosure scope of a sealed value.
///
/// Controls how tightly the ciphertext is bound to the secret's name and
/// namespace on the decrypting side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SealingScope {
    /// Bound to the exact name and namespace
    #[default]
    Strict,
    /// Bound to the namespace; any name may decrypt
    NamespaceWide,
    /// Not bound to a namespace at all
    ClusterWide,
}

impl SealingScope {
    /// All scopes, in the order they are documented.
    pub const ALL: [SealingScope; 3] = [
        SealingScope::Strict,
        SealingScope::NamespaceWide,
        SealingScope::ClusterWide,
    ];

    /// Resolve an optional scope token.
    ///
    /// An absent token means `strict`. A present token must match one of the
    /// three names exactly; there is no fallback for unknown or empty tokens.
    ///
    /// # Example
    ///
    /// ```
    /// use sealedsecret_types::SealingScope;
    ///
    /// assert_eq!(SealingScope::resolve(None).unwrap(), SealingScope::Strict);
    /// assert_eq!(
    ///     SealingScope::resolve(Some("cluster-wide")).unwrap(),
    ///     SealingScope::ClusterWide,
    /// );
    /// assert!(SealingScope::resolve(Some("Strict")).is_err());
    /// ```
    pub fn resolve(token: Option<&str>) -> Result<Self> {
        match token {
            None => Ok(Self::default()),
            Some(token) => token.parse(),
        }
    }

    /// The token naming this scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            SealingScope::Strict => "strict",
            SealingScope::NamespaceWide => "namespace-wide",
            SealingScope::ClusterWide => "cluster-wide",
        }
    }
}

impl FromStr for SealingScope {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(SealingScope::Strict),
            "namespace-wide" => Ok(SealingScope::NamespaceWide),
            "cluster-wide" => Ok(SealingScope::ClusterWide),
            _ => Err(SealError::InvalidScope(s.to_string())),
        }
    }
}

impl fmt::Display for SealingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the binding label is attached to the symmetric payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadBinding {
    /// Label is AES-GCM associated data as well as the OAEP label
    #[default]
    Label,
    /// Label is only the OAEP label; payload carries no associated data
    Unbound,
}

impl FromStr for PayloadBinding {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "label" => Ok(PayloadBinding::Label),
            "unbound" => Ok(PayloadBinding::Unbound),
            _ => Err(SealError::Config(format!("Invalid payload binding: {}", s))),
        }
    }
}

impl fmt::Display for PayloadBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadBinding::Label => write!(f, "label"),
            PayloadBinding::Unbound => write!(f, "unbound"),
        }
    }
}

/// Log level enumeration for the logging system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Detailed trace messages
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" | "OFF" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(SealError::Config(format!("Invalid log level: {}", s))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => write!(f, "NONE"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Trace => write!(f, "TRACE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_tokens_round_trip() {
        for scope in SealingScope::ALL {
            assert_eq!(scope.as_str().parse::<SealingScope>().unwrap(), scope);
            assert_eq!(SealingScope::resolve(Some(scope.as_str())).unwrap(), scope);
        }
    }

    #[test]
    fn test_scope_default_is_explicit() {
        assert_eq!(SealingScope::resolve(None).unwrap(), SealingScope::Strict);
    }

    #[test]
    fn test_unknown_scope_never_falls_back() {
        for token in ["", "Strict", "STRICT", "namespace", "cluster_wide", " strict", "global"] {
            match SealingScope::resolve(Some(token)) {
                Err(SealError::InvalidScope(t)) => assert_eq!(t, token),
                other => panic!("expected InvalidScope for {:?}, got {:?}", token, other),
            }
        }
    }

    #[test]
    fn test_scope_serde_uses_tokens() {
        let json = serde_json::to_string(&SealingScope::NamespaceWide).unwrap();
        assert_eq!(json, "\"namespace-wide\"");
        let scope: SealingScope = serde_json::from_str("\"cluster-wide\"").unwrap();
        assert_eq!(scope, SealingScope::ClusterWide);
    }

    #[test]
    fn test_payload_binding_parse() {
        assert_eq!("label".parse::<PayloadBinding>().unwrap(), PayloadBinding::Label);
        assert_eq!("Unbound".parse::<PayloadBinding>().unwrap(), PayloadBinding::Unbound);
        assert!("aad".parse::<PayloadBinding>().is_err());
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::None.as_directive(), "off");
        assert!(LogLevel::Debug > LogLevel::Info);
    }
}
