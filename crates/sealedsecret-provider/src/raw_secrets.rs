//! `sealedsecret_raw_secrets`: a map of plaintexts sealed under one label.

use crate::fingerprint::InputFingerprint;
use crate::lifecycle::{SealedResource, SealedState};
use crate::provider::Provider;
use crate::request::RawSecretsRequest;
use sealedsecret_types::{ResourceId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recorded state of a sealed value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSecretsState {
    /// Binding label as text
    pub id: ResourceId,
    /// Input digests
    pub fingerprint: InputFingerprint,
    /// Base64 sealed envelope per input key
    pub encrypted_values: BTreeMap<String, String>,
}

impl SealedState for RawSecretsState {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn fingerprint(&self) -> &InputFingerprint {
        &self.fingerprint
    }
}

/// Multi-value resource.
///
/// The certificate is parsed and the label derived once; each value then
/// gets its own session key. If any value fails to seal the whole create
/// fails and no map is returned.
#[derive(Debug, Clone, Copy)]
pub struct RawSecrets<'p> {
    provider: &'p Provider,
}

impl<'p> RawSecrets<'p> {
    /// Host-facing type name.
    pub const TYPE_NAME: &'static str = "sealedsecret_raw_secrets";

    pub(crate) fn new(provider: &'p Provider) -> Self {
        Self { provider }
    }
}

impl SealedResource for RawSecrets<'_> {
    type Request = RawSecretsRequest;
    type State = RawSecretsState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn fingerprint(&self, request: &RawSecretsRequest) -> Result<InputFingerprint> {
        InputFingerprint::of_multi(request)
    }

    fn create(&self, request: &RawSecretsRequest) -> Result<RawSecretsState> {
        let prepared = self.provider.prepare(&request.binding)?;
        let sealer = prepared.sealer(self.provider);

        let encrypted_values = request
            .values
            .iter()
            .map(|(key, value)| {
                let sealed = sealer.seal(value.expose().as_bytes())?;
                tracing::debug!(resource = Self::TYPE_NAME, entry = %key, "sealed entry");
                Ok((key.clone(), sealed.into_string()))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        let id = prepared.id();
        tracing::info!(
            resource = Self::TYPE_NAME,
            id = %id,
            scope = %prepared.scope,
            count = encrypted_values.len(),
            "sealed values"
        );

        Ok(RawSecretsState {
            id,
            fingerprint: self.fingerprint(request)?,
            encrypted_values,
        })
    }
}
