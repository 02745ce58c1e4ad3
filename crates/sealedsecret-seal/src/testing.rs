//! Key and certificate fixtures for tests.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! downstream crates. [`open`] plays the part of the decrypting controller so
//! tests can check what was sealed; it is not part of the sealing API.

use crate::envelope::{Envelope, SealedValue};
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey};
use sealedsecret_types::{BindingLabel, PayloadBinding, Result, SealError};
use sha2::Sha256;

/// Common name of fixture certificates.
pub const CERT_COMMON_NAME: &str = "sealed-secrets-controller";

/// A 2048-bit RSA key pair with its public forms.
pub struct RsaFixture {
    /// Private half, used only by [`open`]
    pub private: RsaPrivateKey,
    /// SPKI `PUBLIC KEY` PEM
    pub public_pem: String,
    /// Self-signed certificate PEM valid far into the future
    pub certificate_pem: String,
}

static RSA_FIXTURE: Lazy<RsaFixture> = Lazy::new(|| {
    let private = RsaPrivateKey::new(&mut OsRng, 2048).expect("generate fixture key");
    let public_pem = private
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("encode fixture public key");
    let certificate_pem = rsa_certificate_pem(&private, None);
    RsaFixture {
        private,
        public_pem,
        certificate_pem,
    }
});

/// Shared fixture; key generation is slow, so it happens once per test binary.
pub fn rsa_fixture() -> &'static RsaFixture {
    &RSA_FIXTURE
}

/// Generate a fresh key pair (for tests that need a second, different key).
pub fn fresh_rsa_fixture() -> RsaFixture {
    let private = RsaPrivateKey::new(&mut OsRng, 2048).expect("generate key");
    let public_pem = private
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("encode public key");
    let certificate_pem = rsa_certificate_pem(&private, None);
    RsaFixture {
        private,
        public_pem,
        certificate_pem,
    }
}

/// Self-signed RSA certificate for `key`. With `validity`, the certificate is
/// valid between the two `(year, month, day)` dates.
pub fn rsa_certificate_pem(key: &RsaPrivateKey, validity: Option<((i32, u8, u8), (i32, u8, u8))>) -> String {
    let pkcs8 = key.to_pkcs8_pem(LineEnding::LF).expect("encode private key");
    let key_pair = rcgen::KeyPair::from_pem(&pkcs8).expect("load key into rcgen");

    let mut params = rcgen::CertificateParams::new(vec![CERT_COMMON_NAME.to_string()]);
    params.alg = &rcgen::PKCS_RSA_SHA256;
    params.key_pair = Some(key_pair);
    params
        .distinguished_name
        .push(rcgen::DnType::CommonName, CERT_COMMON_NAME);
    if let Some(((y1, m1, d1), (y2, m2, d2))) = validity {
        params.not_before = rcgen::date_time_ymd(y1, m1, d1);
        params.not_after = rcgen::date_time_ymd(y2, m2, d2);
    }

    rcgen::Certificate::from_params(params)
        .and_then(|cert| cert.serialize_pem())
        .expect("build RSA certificate")
}

/// RSA certificate that expired on January 1, 2001.
pub fn expired_certificate_pem() -> String {
    rsa_certificate_pem(&rsa_fixture().private, Some(((2000, 1, 1), (2001, 1, 1))))
}

/// ECDSA P-256 certificate.
pub fn ecdsa_certificate_pem() -> String {
    rcgen::generate_simple_self_signed(vec![CERT_COMMON_NAME.to_string()])
        .and_then(|cert| cert.serialize_pem())
        .expect("build ECDSA certificate")
}

/// Public key too small to wrap a session key with OAEP(SHA-256).
pub fn small_rsa_public_pem() -> String {
    RsaPrivateKey::new(&mut OsRng, 512)
        .expect("generate small key")
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("encode small key")
}

/// Decrypt a sealed value the way the controller does.
pub fn open(
    private: &RsaPrivateKey,
    label: &BindingLabel,
    binding: PayloadBinding,
    sealed: &SealedValue,
) -> Result<Vec<u8>> {
    let blob = sealed.decode()?;
    let envelope = Envelope::parse(&blob)?;

    let session_key = private
        .decrypt(Oaep::new_with_label::<Sha256, _>(label.as_text()), envelope.wrapped_key)
        .map_err(|e| SealError::EncryptionFailure(format!("unwrap failed: {}", e)))?;

    let aad: &[u8] = match binding {
        PayloadBinding::Label => label.as_bytes(),
        PayloadBinding::Unbound => &[],
    };
    let cipher = Aes256Gcm::new_from_slice(&session_key)
        .map_err(|e| SealError::EncryptionFailure(e.to_string()))?;
    cipher
        .decrypt(
            Nonce::from_slice(&[0u8; 12]),
            Payload {
                msg: envelope.payload,
                aad,
            },
        )
        .map_err(|e| SealError::EncryptionFailure(format!("open failed: {}", e)))
}
