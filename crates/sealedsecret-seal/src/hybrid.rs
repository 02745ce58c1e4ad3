//! Hybrid RSA-OAEP / AES-256-GCM sealing.
//!
//! Each call draws a fresh 32-byte session key, encrypts the plaintext with
//! AES-256-GCM under it, and wraps the session key with RSA-OAEP(SHA-256)
//! using the binding label as the OAEP label. The session key is used for
//! exactly one message, so the GCM nonce is fixed at zero and is not carried
//! in the envelope.

use crate::envelope::{Envelope, SealedValue};
use crate::key::SealingKey;
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::Oaep;
use sealedsecret_types::{BindingLabel, PayloadBinding, Result, SealError};
use sha2::Sha256;
use zeroize::Zeroizing;

/// Session key size (AES-256).
pub const SESSION_KEY_BYTES: usize = 32;

/// AES-GCM nonce size.
pub const NONCE_BYTES: usize = 12;

const ZERO_NONCE: [u8; NONCE_BYTES] = [0u8; NONCE_BYTES];

/// Seals plaintexts under one key and one label.
///
/// Borrows the key and label so a batch of values shares a single parse of
/// the certificate and a single label derivation.
#[derive(Debug, Clone, Copy)]
pub struct Sealer<'a> {
    key: &'a SealingKey,
    label: &'a BindingLabel,
    binding: PayloadBinding,
}

impl<'a> Sealer<'a> {
    /// Create a sealer.
    pub fn new(key: &'a SealingKey, label: &'a BindingLabel, binding: PayloadBinding) -> Self {
        Self { key, label, binding }
    }

    /// Seal one plaintext with the operating system's randomness source.
    pub fn seal(&self, plaintext: &[u8]) -> Result<SealedValue> {
        self.seal_with_rng(&mut OsRng, plaintext)
    }

    /// Seal one plaintext drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// `EncryptionFailure` when the randomness source fails, when the RSA
    /// modulus is too small to wrap a session key, or when the cipher
    /// rejects the payload.
    pub fn seal_with_rng<R>(&self, rng: &mut R, plaintext: &[u8]) -> Result<SealedValue>
    where
        R: RngCore + CryptoRng,
    {
        let blob = hybrid_encrypt(rng, self.key, self.label, self.binding, plaintext)?;
        Ok(SealedValue::from_bytes(&blob))
    }
}

/// Produce raw envelope bytes for one plaintext.
pub fn hybrid_encrypt<R>(
    rng: &mut R,
    key: &SealingKey,
    label: &BindingLabel,
    binding: PayloadBinding,
    plaintext: &[u8],
) -> Result<Vec<u8>>
where
    R: RngCore + CryptoRng,
{
    let mut session_key = Zeroizing::new([0u8; SESSION_KEY_BYTES]);
    rng.try_fill_bytes(session_key.as_mut())
        .map_err(|e| SealError::EncryptionFailure(format!("randomness source unavailable: {}", e)))?;

    let padding = Oaep::new_with_label::<Sha256, _>(label.as_text());
    let wrapped_key = key
        .rsa()
        .encrypt(rng, padding, session_key.as_ref())
        .map_err(|e| {
            SealError::EncryptionFailure(format!(
                "cannot wrap session key with a {}-bit key: {}",
                key.bits(),
                e
            ))
        })?;

    let cipher = Aes256Gcm::new_from_slice(session_key.as_ref())
        .map_err(|e| SealError::EncryptionFailure(format!("invalid session key: {}", e)))?;

    let aad: &[u8] = match binding {
        PayloadBinding::Label => label.as_bytes(),
        PayloadBinding::Unbound => &[],
    };
    let payload = cipher
        .encrypt(Nonce::from_slice(&ZERO_NONCE), Payload { msg: plaintext, aad })
        .map_err(|e| SealError::EncryptionFailure(format!("payload encryption failed: {}", e)))?;

    Envelope {
        wrapped_key: &wrapped_key,
        payload: &payload,
    }
    .encode()
}
