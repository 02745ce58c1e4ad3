//! `sealedsecret_raw_secret`: one plaintext sealed into one ciphertext.

use crate::fingerprint::InputFingerprint;
use crate::lifecycle::{SealedResource, SealedState};
use crate::provider::Provider;
use crate::request::RawSecretRequest;
use sealedsecret_types::{ResourceId, Result};
use serde::{Deserialize, Serialize};

/// Recorded state of a single sealed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSecretState {
    /// Binding label as text
    pub id: ResourceId,
    /// Input digests
    pub fingerprint: InputFingerprint,
    /// Base64 sealed envelope
    pub encrypted_value: String,
}

impl SealedState for RawSecretState {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn fingerprint(&self) -> &InputFingerprint {
        &self.fingerprint
    }
}

/// Single-value resource.
#[derive(Debug, Clone, Copy)]
pub struct RawSecret<'p> {
    provider: &'p Provider,
}

impl<'p> RawSecret<'p> {
    /// Host-facing type name.
    pub const TYPE_NAME: &'static str = "sealedsecret_raw_secret";

    pub(crate) fn new(provider: &'p Provider) -> Self {
        Self { provider }
    }
}

impl SealedResource for RawSecret<'_> {
    type Request = RawSecretRequest;
    type State = RawSecretState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn fingerprint(&self, request: &RawSecretRequest) -> Result<InputFingerprint> {
        InputFingerprint::of_single(request)
    }

    fn create(&self, request: &RawSecretRequest) -> Result<RawSecretState> {
        let prepared = self.provider.prepare(&request.binding)?;
        let sealed = prepared
            .sealer(self.provider)
            .seal(request.value.expose().as_bytes())?;

        let id = prepared.id();
        tracing::info!(resource = Self::TYPE_NAME, id = %id, scope = %prepared.scope, "sealed value");

        Ok(RawSecretState {
            id,
            fingerprint: self.fingerprint(request)?,
            encrypted_value: sealed.into_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::ImmutableAttribute;
    use crate::lifecycle::{Plan, Tracked};
    use crate::request::SecretBinding;
    use sealedsecret_seal::{testing, SealedValue};
    use sealedsecret_types::{BindingLabel, PayloadBinding, SealError, SealerConfig, SealingScope};

    fn request(value: &str) -> RawSecretRequest {
        let binding = SecretBinding::new("db-pass", "prod", testing::rsa_fixture().certificate_pem.clone());
        RawSecretRequest::new(binding, value)
    }

    fn open(state: &RawSecretState, label: &BindingLabel, binding: PayloadBinding) -> Vec<u8> {
        let sealed = SealedValue::parse(&state.encrypted_value).unwrap();
        testing::open(&testing::rsa_fixture().private, label, binding, &sealed).unwrap()
    }

    #[test]
    fn test_create_strict() {
        let provider = Provider::default();
        let state = provider.raw_secret().create(&request("hunter2")).unwrap();

        assert_eq!(state.id.as_str(), "prod/db-pass");
        let label = BindingLabel::derive("prod", "db-pass", SealingScope::Strict);
        assert_eq!(open(&state, &label, PayloadBinding::Label), b"hunter2");
    }

    #[test]
    fn test_create_unbound_payload() {
        let provider = Provider::new(SealerConfig {
            payload_binding: PayloadBinding::Unbound,
            ..SealerConfig::default()
        });
        let state = provider.raw_secret().create(&request("hunter2")).unwrap();
        let label = BindingLabel::derive("prod", "db-pass", SealingScope::Strict);
        assert_eq!(open(&state, &label, PayloadBinding::Unbound), b"hunter2");
    }

    #[test]
    fn test_scope_ids() {
        let provider = Provider::default();

        let mut namespace_wide = request("v");
        namespace_wide.binding = namespace_wide.binding.with_scope("namespace-wide");
        let state = provider.raw_secret().create(&namespace_wide).unwrap();
        assert_eq!(state.id.as_str(), "prod");

        let mut cluster_wide = request("v");
        cluster_wide.binding = cluster_wide.binding.with_scope("cluster-wide");
        let state = provider.raw_secret().create(&cluster_wide).unwrap();
        assert_eq!(state.id.as_str(), "");
        let label = BindingLabel::derive("prod", "db-pass", SealingScope::ClusterWide);
        assert_eq!(open(&state, &label, PayloadBinding::Label), b"v");
    }

    #[test]
    fn test_empty_certificate() {
        let mut req = request("v");
        req.binding.certificate = String::new();
        let result = Provider::default().raw_secret().create(&req);
        assert!(matches!(result, Err(SealError::MalformedKey(_))));
    }

    #[test]
    fn test_small_key_records_nothing() {
        let mut req = request("v");
        req.binding.certificate = testing::small_rsa_public_pem();
        let provider = Provider::default();
        let resource = provider.raw_secret();
        match resource.apply(None, &req) {
            Err(SealError::EncryptionFailure(msg)) => assert!(msg.contains("512-bit"), "{}", msg),
            other => panic!("expected EncryptionFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_unchanged_inputs_keep_state() {
        let provider = Provider::default();
        let resource = provider.raw_secret();
        let req = request("hunter2");

        let first = resource.apply(None, &req).unwrap();
        let prior = Tracked::Sealed(first.clone());
        assert_eq!(resource.plan(Some(&prior), &req).unwrap(), Plan::Keep);

        let second = resource.apply(Some(prior), &req).unwrap();
        assert_eq!(second.encrypted_value, first.encrypted_value);
    }

    #[test]
    fn test_each_input_forces_replace() {
        let provider = Provider::default();
        let resource = provider.raw_secret();
        let base = request("hunter2");
        let prior = Tracked::Sealed(resource.create(&base).unwrap());

        let mut renamed = base.clone();
        renamed.binding.name = "api-key".to_string();
        let mut moved = base.clone();
        moved.binding.namespace = "staging".to_string();
        let mut widened = base.clone();
        widened.binding.scope = Some("namespace-wide".to_string());
        let mut rekeyed = base.clone();
        rekeyed.binding.certificate = testing::fresh_rsa_fixture().certificate_pem;
        let mut rotated = base.clone();
        rotated.value = "hunter3".into();

        let cases = [
            (ImmutableAttribute::Name, renamed),
            (ImmutableAttribute::Namespace, moved),
            (ImmutableAttribute::Scope, widened),
            (ImmutableAttribute::Certificate, rekeyed),
            (ImmutableAttribute::Value, rotated),
        ];

        for (attribute, req) in cases {
            assert_eq!(
                resource.plan(Some(&prior), &req).unwrap(),
                Plan::Replace { changed: vec![attribute] },
                "changing {}",
                attribute
            );
        }
    }

    #[test]
    fn test_rename_replaces_with_new_id() {
        let provider = Provider::default();
        let resource = provider.raw_secret();
        let prior = resource.create(&request("v")).unwrap();

        let mut renamed = request("v");
        renamed.binding.name = "api-key".to_string();
        let next = resource.apply(Some(Tracked::Sealed(prior.clone())), &renamed).unwrap();

        assert_eq!(next.id.as_str(), "prod/api-key");
        assert_ne!(next.encrypted_value, prior.encrypted_value);
    }

    #[test]
    fn test_import_then_apply_replaces() {
        let provider = Provider::default();
        let resource = provider.raw_secret();
        let imported = resource.import(ResourceId::new("prod/db-pass"));
        assert_eq!(imported.id().as_str(), "prod/db-pass");

        let req = request("v");
        assert_eq!(
            resource.plan(Some(&imported), &req).unwrap(),
            Plan::Replace { changed: vec![] }
        );
        let state = resource.apply(Some(imported), &req).unwrap();
        assert_eq!(state.id.as_str(), "prod/db-pass");
    }

    #[test]
    fn test_imported_cluster_wide_is_tracked() {
        let provider = Provider::default();
        let resource = provider.raw_secret();
        let imported = resource.import(ResourceId::new(""));
        assert_ne!(resource.plan(Some(&imported), &request("v")).unwrap(), Plan::Create);
        resource.delete(imported);
    }

    #[test]
    fn test_state_serialization_has_no_plaintext() {
        let state = Provider::default().raw_secret().create(&request("hunter2")).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert!(!json.contains("hunter2"));
        let back: RawSecretState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
