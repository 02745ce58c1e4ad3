//! # sealedsecret provider
//!
//! Resource types a host drives to produce sealed secrets:
//!
//! - `sealedsecret_raw_secret`: one value, one ciphertext
//! - `sealedsecret_raw_secrets`: a map of values, one ciphertext each
//!
//! Both are create-only. Every input is immutable, so a change plans a
//! replacement that seals again with fresh randomness. State carries digests
//! of the inputs, never the plaintext.
//!
//! ## Example
//!
//! ```no_run
//! use sealedsecret_provider::{Provider, RawSecretRequest, SealedResource, SecretBinding};
//! use sealedsecret_types::SealerConfig;
//!
//! let provider = Provider::new(SealerConfig::default());
//! let binding = SecretBinding::new("db-pass", "prod", std::fs::read_to_string("cert.pem")?);
//! let state = provider.raw_secret().apply(None, &RawSecretRequest::new(binding, "hunter2"))?;
//! println!("{} = {}", state.id, state.encrypted_value);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fingerprint;
pub mod lifecycle;
pub mod provider;
pub mod raw_secret;
pub mod raw_secrets;
pub mod request;

pub use fingerprint::{ImmutableAttribute, InputFingerprint, ValueDigests};
pub use lifecycle::{Plan, SealedResource, SealedState, Tracked};
pub use provider::Provider;
pub use raw_secret::{RawSecret, RawSecretState};
pub use raw_secrets::{RawSecrets, RawSecretsState};
pub use request::{RawSecretRequest, RawSecretsRequest, SecretBinding, Sensitive};
