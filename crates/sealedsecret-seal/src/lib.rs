//! # sealedsecret seal
//!
//! Seals plaintext values so that only the holder of the controller's RSA
//! private key can recover them.
//!
//! - [`key`]: parse a certificate or public key from PEM
//! - [`hybrid`]: RSA-OAEP key wrap + AES-256-GCM payload, bound to a label
//! - [`envelope`]: the wire layout and its base64 text form
//!
//! ## Example
//!
//! ```no_run
//! use sealedsecret_seal::{KeyLoader, Sealer};
//! use sealedsecret_types::{BindingLabel, PayloadBinding, SealingScope};
//!
//! let pem = std::fs::read("cert.pem")?;
//! let key = KeyLoader::default().load(&pem)?;
//! let label = BindingLabel::derive("prod", "db-pass", SealingScope::Strict);
//!
//! let sealed = Sealer::new(&key, &label, PayloadBinding::Label).seal(b"hunter2")?;
//! println!("{}", sealed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod hybrid;
pub mod key;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use envelope::{Envelope, SealedValue};
pub use hybrid::Sealer;
pub use key::{KeyLoader, KeySource, SealingKey};

use sealedsecret_types::{BindingLabel, PayloadBinding, Result};

/// Seal one plaintext under `key`, bound to `label`, with the label also
/// authenticating the payload.
pub fn seal(key: &SealingKey, label: &BindingLabel, plaintext: &[u8]) -> Result<SealedValue> {
    Sealer::new(key, label, PayloadBinding::Label).seal(plaintext)
}
