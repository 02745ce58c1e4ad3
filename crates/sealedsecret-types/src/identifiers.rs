//! Binding labels and resource identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::enums::SealingScope;

/// Public binding label tied to every ciphertext.
///
/// The label is derived from the secret's namespace, name, and scope using
/// the same convention the decrypting controller applies:
///
/// - `strict`: `"<namespace>/<name>"`
/// - `namespace-wide`: `"<namespace>"`
/// - `cluster-wide`: empty
///
/// # Example
///
/// ```
/// use sealedsecret_types::{BindingLabel, SealingScope};
///
/// let label = BindingLabel::derive("prod", "db-pass", SealingScope::Strict);
/// assert_eq!(label.as_bytes(), b"prod/db-pass");
///
/// let label = BindingLabel::derive("prod", "db-pass", SealingScope::NamespaceWide);
/// assert_eq!(label.as_bytes(), b"prod");
///
/// let label = BindingLabel::derive("prod", "db-pass", SealingScope::ClusterWide);
/// assert!(label.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingLabel(Vec<u8>);

impl BindingLabel {
    /// Derive the label for a secret. Pure and total.
    pub fn derive(namespace: &str, name: &str, scope: SealingScope) -> Self {
        let label = match scope {
            SealingScope::Strict => format!("{}/{}", namespace, name),
            SealingScope::NamespaceWide => namespace.to_string(),
            SealingScope::ClusterWide => String::new(),
        };
        Self(label.into_bytes())
    }

    /// Raw label bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the label is empty (cluster-wide).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label as text. Labels are built from UTF-8 strings, so this never loses data.
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl AsRef<[u8]> for BindingLabel {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for BindingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// Identifier of a sealed resource: the binding label rendered as text.
///
/// Cluster-wide resources have an empty identifier. Callers must not read an
/// empty identifier as "no resource".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap an identifier supplied by the host, e.g. on import.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&BindingLabel> for ResourceId {
    fn from(label: &BindingLabel) -> Self {
        Self(label.as_text())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
