//! Provider entry point.

use crate::raw_secret::RawSecret;
use crate::raw_secrets::RawSecrets;
use crate::request::SecretBinding;
use sealedsecret_seal::{KeyLoader, Sealer, SealingKey};
use sealedsecret_types::{BindingLabel, ResourceId, Result, SealerConfig, SealingScope};

/// Owns the configuration every resource seals with.
///
/// Build one per host session from a [`SealerConfig`]; there is no shared
/// global instance.
#[derive(Debug, Clone)]
pub struct Provider {
    config: SealerConfig,
    loader: KeyLoader,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new(SealerConfig::default())
    }
}

impl Provider {
    /// Create a provider.
    pub fn new(config: SealerConfig) -> Self {
        let loader = KeyLoader::new(config.reject_expired_certificates);
        Self { config, loader }
    }

    /// Active configuration.
    pub fn config(&self) -> &SealerConfig {
        &self.config
    }

    /// Resource type names the provider registers.
    pub fn resource_types(&self) -> [&'static str; 2] {
        [RawSecret::TYPE_NAME, RawSecrets::TYPE_NAME]
    }

    /// The single-value resource.
    pub fn raw_secret(&self) -> RawSecret<'_> {
        RawSecret::new(self)
    }

    /// The multi-value resource.
    pub fn raw_secrets(&self) -> RawSecrets<'_> {
        RawSecrets::new(self)
    }

    /// Resolve scope, derive the label, then load the key, in that order, so
    /// a bad scope is reported before the certificate is looked at.
    pub(crate) fn prepare(&self, binding: &SecretBinding) -> Result<Prepared> {
        let scope = SealingScope::resolve(binding.scope.as_deref())?;
        let label = BindingLabel::derive(&binding.namespace, &binding.name, scope);
        let key = self.loader.load(binding.certificate.as_bytes())?;
        Ok(Prepared { scope, label, key })
    }
}

/// Parsed inputs shared by every value sealed in one create.
pub(crate) struct Prepared {
    pub(crate) scope: SealingScope,
    pub(crate) label: BindingLabel,
    pub(crate) key: SealingKey,
}

impl Prepared {
    pub(crate) fn sealer(&self, provider: &Provider) -> Sealer<'_> {
        Sealer::new(&self.key, &self.label, provider.config.payload_binding)
    }

    pub(crate) fn id(&self) -> ResourceId {
        ResourceId::from(&self.label)
    }
}
