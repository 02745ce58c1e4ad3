//! Digests of the create-time inputs.
//!
//! State keeps these instead of the plaintext, so a later plan can tell
//! whether any immutable input changed without the secret ever being
//! persisted.

use crate::request::{RawSecretRequest, RawSecretsRequest, SecretBinding, Sensitive};
use sealedsecret_types::{Result, SealingScope};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

const VALUE_DOMAIN: &[u8] = b"sealedsecret.value.v1\0";

/// Digests of every input that forces replacement when it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFingerprint {
    /// Secret name
    pub name: String,
    /// Secret namespace
    pub namespace: String,
    /// Resolved scope
    pub scope: SealingScope,
    /// Hex SHA-256 of the certificate text
    pub certificate: String,
    /// Value digests
    pub values: ValueDigests,
}

/// Digest of a single value or of each entry in a value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDigests {
    /// The `value` attribute
    Single(String),
    /// The `values` attribute, per key
    Multi(BTreeMap<String, String>),
}

/// An input that cannot change in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmutableAttribute {
    /// `name`
    Name,
    /// `namespace`
    Namespace,
    /// `scope`
    Scope,
    /// `certificate`
    Certificate,
    /// `value`
    Value,
    /// `values`
    Values,
}

impl ImmutableAttribute {
    /// Attribute name as the host sees it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImmutableAttribute::Name => "name",
            ImmutableAttribute::Namespace => "namespace",
            ImmutableAttribute::Scope => "scope",
            ImmutableAttribute::Certificate => "certificate",
            ImmutableAttribute::Value => "value",
            ImmutableAttribute::Values => "values",
        }
    }
}

impl fmt::Display for ImmutableAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InputFingerprint {
    /// Fingerprint a single-value request.
    pub fn of_single(request: &RawSecretRequest) -> Result<Self> {
        Self::build(&request.binding, ValueDigests::Single(value_digest(&request.value)))
    }

    /// Fingerprint a multi-value request.
    pub fn of_multi(request: &RawSecretsRequest) -> Result<Self> {
        let digests = request
            .values
            .iter()
            .map(|(key, value)| (key.clone(), value_digest(value)))
            .collect();
        Self::build(&request.binding, ValueDigests::Multi(digests))
    }

    fn build(binding: &SecretBinding, values: ValueDigests) -> Result<Self> {
        Ok(Self {
            name: binding.name.clone(),
            namespace: binding.namespace.clone(),
            scope: SealingScope::resolve(binding.scope.as_deref())?,
            certificate: hex::encode(Sha256::digest(binding.certificate.as_bytes())),
            values,
        })
    }

    /// Attributes whose digests differ from `other`, in declaration order.
    pub fn changed_attributes(&self, other: &InputFingerprint) -> Vec<ImmutableAttribute> {
        let mut changed = Vec::new();
        if self.name != other.name {
            changed.push(ImmutableAttribute::Name);
        }
        if self.namespace != other.namespace {
            changed.push(ImmutableAttribute::Namespace);
        }
        if self.scope != other.scope {
            changed.push(ImmutableAttribute::Scope);
        }
        if self.certificate != other.certificate {
            changed.push(ImmutableAttribute::Certificate);
        }
        match (&self.values, &other.values) {
            (ValueDigests::Single(a), ValueDigests::Single(b)) if a == b => {}
            (ValueDigests::Multi(a), ValueDigests::Multi(b)) if a == b => {}
            (ValueDigests::Multi(_), _) | (_, ValueDigests::Multi(_)) => {
                changed.push(ImmutableAttribute::Values)
            }
            _ => changed.push(ImmutableAttribute::Value),
        }
        changed
    }
}

fn value_digest(value: &Sensitive) -> String {
    let mut hasher = Sha256::new();
    hasher.update(VALUE_DOMAIN);
    hasher.update(value.expose().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealedsecret_types::SealError;

    fn single(value: &str) -> RawSecretRequest {
        RawSecretRequest::new(SecretBinding::new("db-pass", "prod", "CERT"), value)
    }

    #[test]
    fn test_fingerprint_hides_value() {
        let fp = InputFingerprint::of_single(&single("hunter2")).unwrap();
        let json = serde_json::to_string(&fp).unwrap();
        assert!(!json.contains("hunter2"));
        assert_eq!(fp.scope, SealingScope::Strict);
        match &fp.values {
            ValueDigests::Single(digest) => {
                assert_eq!(digest.len(), 64);
                assert_ne!(digest, &hex::encode(Sha256::digest(b"hunter2")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_identical_inputs_match() {
        let a = InputFingerprint::of_single(&single("hunter2")).unwrap();
        let b = InputFingerprint::of_single(&single("hunter2")).unwrap();
        assert_eq!(a, b);
        assert!(a.changed_attributes(&b).is_empty());
    }

    #[test]
    fn test_default_scope_equals_explicit_strict() {
        let implicit = InputFingerprint::of_single(&single("v")).unwrap();
        let mut request = single("v");
        request.binding = request.binding.with_scope("strict");
        let explicit = InputFingerprint::of_single(&request).unwrap();
        assert!(implicit.changed_attributes(&explicit).is_empty());
    }

    #[test]
    fn test_changed_attributes() {
        let base = InputFingerprint::of_single(&single("v")).unwrap();

        let mut request = single("v2");
        request.binding.namespace = "staging".to_string();
        let changed = InputFingerprint::of_single(&request).unwrap();
        assert_eq!(
            base.changed_attributes(&changed),
            vec![ImmutableAttribute::Namespace, ImmutableAttribute::Value]
        );

        let mut request = single("v");
        request.binding.certificate = "OTHER".to_string();
        let changed = InputFingerprint::of_single(&request).unwrap();
        assert_eq!(base.changed_attributes(&changed), vec![ImmutableAttribute::Certificate]);
    }

    #[test]
    fn test_multi_entry_changes() {
        let binding = SecretBinding::new("app", "prod", "CERT");
        let a = InputFingerprint::of_multi(&RawSecretsRequest::new(binding.clone(), [("a", "1"), ("b", "2")])).unwrap();
        let b = InputFingerprint::of_multi(&RawSecretsRequest::new(binding.clone(), [("a", "1")])).unwrap();
        let c = InputFingerprint::of_multi(&RawSecretsRequest::new(binding, [("b", "2"), ("a", "1")])).unwrap();

        assert_eq!(a.changed_attributes(&b), vec![ImmutableAttribute::Values]);
        assert!(a.changed_attributes(&c).is_empty());
    }

    #[test]
    fn test_invalid_scope() {
        let mut request = single("v");
        request.binding.scope = Some("Strict".to_string());
        assert!(matches!(
            InputFingerprint::of_single(&request),
            Err(SealError::InvalidScope(token)) if token == "Strict"
        ));
    }
}
