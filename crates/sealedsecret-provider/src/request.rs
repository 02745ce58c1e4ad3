//! Typed create requests, validated once at the host boundary.

use sealedsecret_types::{Result, SealError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use zeroize::Zeroizing;

/// Attribute names as the host declares them.
pub mod attr {
    /// Secret name
    pub const NAME: &str = "name";
    /// Secret namespace
    pub const NAMESPACE: &str = "namespace";
    /// Disclosure scope token
    pub const SCOPE: &str = "scope";
    /// PEM certificate or public key
    pub const CERTIFICATE: &str = "certificate";
    /// Single plaintext value
    pub const VALUE: &str = "value";
    /// Map of plaintext values
    pub const VALUES: &str = "values";
}

/// Plaintext that is wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive(Zeroizing<String>);

impl Sensitive {
    /// Wrap a plaintext.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the plaintext.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Sensitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sensitive(<redacted>)")
    }
}

impl From<&str> for Sensitive {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Sensitive {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Attributes every sealed resource is bound by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretBinding {
    /// Secret name
    pub name: String,
    /// Secret namespace
    pub namespace: String,
    /// Scope token; `None` means the default (`strict`)
    pub scope: Option<String>,
    /// PEM certificate or public key
    pub certificate: String,
}

impl SecretBinding {
    /// Binding with the default scope.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, certificate: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            scope: None,
            certificate: certificate.into(),
        }
    }

    /// Set an explicit scope token.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    fn from_attributes(attrs: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            name: required_string(attrs, attr::NAME)?,
            namespace: required_string(attrs, attr::NAMESPACE)?,
            scope: optional_string(attrs, attr::SCOPE)?,
            certificate: required_string(attrs, attr::CERTIFICATE)?,
        })
    }
}

/// Create request for the single-value resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSecretRequest {
    /// Binding attributes
    pub binding: SecretBinding,
    /// Plaintext to seal
    pub value: Sensitive,
}

impl RawSecretRequest {
    /// Build a request.
    pub fn new(binding: SecretBinding, value: impl Into<Sensitive>) -> Self {
        Self {
            binding,
            value: value.into(),
        }
    }

    /// Validate a host attribute map.
    ///
    /// # Example
    ///
    /// ```
    /// use sealedsecret_provider::RawSecretRequest;
    ///
    /// let attrs = serde_json::json!({
    ///     "name": "db-pass",
    ///     "namespace": "prod",
    ///     "certificate": "-----BEGIN CERTIFICATE-----...",
    ///     "value": "hunter2",
    /// });
    /// let request = RawSecretRequest::from_attributes(attrs.as_object().unwrap()).unwrap();
    /// assert_eq!(request.binding.scope, None);
    /// assert_eq!(request.value.expose(), "hunter2");
    /// ```
    pub fn from_attributes(attrs: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            binding: SecretBinding::from_attributes(attrs)?,
            value: Sensitive::new(required_string(attrs, attr::VALUE)?),
        })
    }
}

/// Create request for the multi-value resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSecretsRequest {
    /// Binding attributes
    pub binding: SecretBinding,
    /// Plaintexts to seal, keyed by caller-chosen names
    pub values: BTreeMap<String, Sensitive>,
}

impl RawSecretsRequest {
    /// Build a request.
    pub fn new<K, V>(binding: SecretBinding, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Sensitive>,
    {
        Self {
            binding,
            values: values.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Validate a host attribute map.
    pub fn from_attributes(attrs: &Map<String, Value>) -> Result<Self> {
        let binding = SecretBinding::from_attributes(attrs)?;

        let raw = attrs
            .get(attr::VALUES)
            .filter(|v| !v.is_null())
            .ok_or(SealError::MissingAttribute(attr::VALUES))?;
        let map = raw.as_object().ok_or_else(|| SealError::InvalidAttribute {
            attribute: attr::VALUES,
            reason: "expected a map of strings".to_string(),
        })?;

        let mut values = BTreeMap::new();
        for (key, value) in map {
            let text = value.as_str().ok_or_else(|| SealError::InvalidAttribute {
                attribute: attr::VALUES,
                reason: format!("entry `{}` is not a string", key),
            })?;
            values.insert(key.clone(), Sensitive::new(text));
        }

        Ok(Self { binding, values })
    }
}

fn required_string(attrs: &Map<String, Value>, name: &'static str) -> Result<String> {
    optional_string(attrs, name)?.ok_or(SealError::MissingAttribute(name))
}

fn optional_string(attrs: &Map<String, Value>, name: &'static str) -> Result<Option<String>> {
    match attrs.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SealError::InvalidAttribute {
            attribute: name,
            reason: format!("expected a string, found {}", type_name(other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
